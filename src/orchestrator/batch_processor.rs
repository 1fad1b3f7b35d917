//! 批量提取处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责命令分发与批量提取。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、加载题库存储、读入源文本
//! 2. **命令分发**：analyze / extract / merge / summary
//! 3. **批量提取**：按差距分析得到的缺失题号逐个走 ExtractFlow
//! 4. **报告落盘**：提取结果与失败题号写入报告文件
//! 5. **全局统计**：批次结束后必定输出成功/失败汇总
//!
//! ## 设计特点
//!
//! - **顺序执行**：单任务逐题处理，一次运行就是 读取 → 计算 → 落盘 的原子序列
//! - **软失败隔离**：单题失败只记入失败列表，绝不中断批次
//! - **向下委托**：委托 workflow::ExtractFlow 处理单个题号

use crate::config::{Command, Config};
use crate::models::question::QuestionBank;
use crate::models::report::ExtractionReport;
use crate::orchestrator::merge_processor;
use crate::services::bank_store::{self, BankStore};
use crate::services::{GapAnalyzer, SummaryReporter};
use crate::utils::logging::{init_log_file, truncate_text};
use crate::workflow::{ExtractCtx, ExtractFlow, ExtractResult};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    bank: QuestionBank,
    source: String,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        // 加载题库存储
        let store = BankStore::new(&config);
        let bank = store.load().await?;

        // 读入源文本
        let source = fs::read_to_string(&config.source_file)
            .await
            .with_context(|| format!("无法读取源文本: {}", config.source_file))?;

        Ok(Self {
            config,
            bank,
            source,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(self, command: Command) -> Result<()> {
        match command {
            Command::Analyze => {
                let analyzer = GapAnalyzer::new();
                let report = analyzer.analyze(&self.bank, &self.source);
                analyzer.log_report(&report);
                Ok(())
            }
            Command::Extract => self.run_extract().await,
            Command::Merge { from_report } => {
                merge_processor::run_merge(&self.config, self.bank, from_report).await
            }
            Command::Summary => {
                SummaryReporter::new().report(&self.bank);
                Ok(())
            }
        }
    }

    /// 完整提取流程：差距分析 → 逐题提取 → 写报告
    async fn run_extract(&self) -> Result<()> {
        let analyzer = GapAnalyzer::new();
        let gap_report = analyzer.analyze(&self.bank, &self.source);
        analyzer.log_report(&gap_report);

        let missing = gap_report.numbers_to_extract();
        if missing.is_empty() {
            info!("✅ 没有缺失题号，无需提取");
            return Ok(());
        }

        info!("\n📦 开始提取 {} 个缺失题号", missing.len());

        // 创建流程对象（只创建一次，复用）
        let flow = ExtractFlow::new();
        let total = missing.len();

        let mut extracted = Vec::new();
        let mut failed = Vec::new();

        // ========== 逐个处理缺失题号 ==========
        for (index, &number) in missing.iter().enumerate() {
            let ctx = ExtractCtx::new(number, index + 1, total);
            log_question_start(&ctx);

            match flow.run(&self.source, &ctx) {
                ExtractResult::Extracted(record) => extracted.push(record),
                ExtractResult::Failed(number) => failed.push(number),
            }
        }

        let report = ExtractionReport::new(
            extracted,
            failed,
            missing,
            chrono::Local::now().format("%Y-%m-%d").to_string(),
        );

        bank_store::save_report(Path::new(&self.config.report_file), &report).await?;

        // 汇总必定输出，无论成败
        print_extract_stats(&report, &self.config);

        // 抽样展示；详细模式下全部列出
        let sample_count = if self.config.verbose_logging {
            report.extracted_questions.len()
        } else {
            5
        };
        log_samples(&report, sample_count);

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题库提取与合并模式");
    info!("📄 存储文件: {}", config.store_file);
    info!("📄 源文本: {}", config.source_file);
    info!("{}", "=".repeat(60));
}

fn log_question_start(ctx: &ExtractCtx) {
    info!("\n{}", "─".repeat(30));
    info!("{} 开始提取", ctx);
}

fn print_extract_stats(report: &ExtractionReport, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 提取批次统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "✅ 成功: {}/{}",
        report.extraction_info.total_extracted,
        report.extraction_info.missing_numbers.len()
    );
    info!("❌ 失败: {}", report.extraction_info.total_failed);
    if !report.failed_extractions.is_empty() {
        warn!("失败题号: {:?}", report.failed_extractions);
    }
    info!("{}", "=".repeat(60));
    info!("\n报告已保存至: {}", config.report_file);
}

/// 抽样展示提取结果，便于人工快速核对
fn log_samples(report: &ExtractionReport, count: usize) {
    for record in report.extracted_questions.iter().take(count) {
        info!(
            "  Q{}: {} [{}]",
            record.number,
            truncate_text(&record.question, 60),
            record.topic
        );
    }
}
