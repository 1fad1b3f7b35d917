//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量提取处理器
//! - 管理应用生命周期（初始化、命令分发）
//! - 加载题库存储与源文本
//! - 按缺失题号顺序遍历提取（`Vec<u32>`）
//! - 写出提取报告并输出全局统计
//!
//! ### `merge_processor` - 合并处理器
//! - 加载人工修正记录（TOML 或提取报告）
//! - 备份 → 合并 → 落盘，备份失败即中止
//! - 输出合并统计
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<题号>)
//!     ↓
//! workflow::ExtractFlow (处理单个题号)
//!     ↓
//! services (能力层：extractor / classifier / answer / gap / merge / store)
//!     ↓
//! models (数据层：QuestionBank / QuestionRecord / Topic / Report)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管提取批次，merge_processor 管合并
//! 2. **单写者**：只有编排层触发存储文件的写入
//! 3. **向下依赖**：编排层 → workflow → services → models
//! 4. **无业务逻辑**：只做调度和统计，不做具体解析判断

pub mod batch_processor;
pub mod merge_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use merge_processor::run_merge;
