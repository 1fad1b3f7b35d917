//! # Extract Question Merge
//!
//! 从半结构化源文本中提取、规整并合并题目记录的整理工具
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 纯数据结构与加载器
//! - `QuestionBank` / `QuestionRecord` - 题库存储文档
//! - `Topic` - 固定主题集合与关键词表
//! - `ExtractionReport` - 提取批次报告
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个输入
//! - `GapAnalyzer` - 题号差距分析能力
//! - `QuestionExtractor` - 题块定位与拆解能力
//! - `TopicClassifier` - 关键词计分分类能力
//! - `AnswerIdentifier` - 答案猜测能力（低置信度启发式）
//! - `MergeService` / `BankStore` - 合并与存储读写能力
//! - `SummaryReporter` - 只读统计能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个题号"的完整提取流程
//! - `ExtractCtx` - 上下文封装（题号 + 批次位置）
//! - `ExtractFlow` - 流程编排（extract → classify → answer）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 命令分发与批量提取，管理存储与报告
//! - `orchestrator/merge_processor` - 合并操作，保证备份先行
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Command, Config};
pub use error::{ConfigError, ExtractError, MergeError, StoreError};
pub use models::{CorrectAnswer, Difficulty, QuestionBank, QuestionRecord, Topic};
pub use orchestrator::App;
pub use services::{
    AnswerIdentifier, BankStore, GapAnalyzer, MergeService, QuestionExtractor, SummaryReporter,
    TopicClassifier,
};
pub use workflow::{ExtractCtx, ExtractFlow, ExtractResult};
