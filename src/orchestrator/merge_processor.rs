//! 合并处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责一次合并操作的完整编排：加载修正记录、备份、合并、落盘。
//!
//! ## 核心保证
//!
//! 备份写入必须在主存储文件被改动之前完成；备份失败时整个合并中止，
//! 主文件保持原样（fail-closed）。合并要么整体成功并报告新总量，
//! 要么显式失败且不留下部分状态。

use crate::config::Config;
use crate::error::MergeError;
use crate::models::loaders::load_corrections;
use crate::models::question::QuestionBank;
use crate::services::bank_store::{self, BankStore};
use crate::services::merge::{MergeOutcome, MergeService};
use anyhow::Result;
use std::path::Path;
use tracing::{info, warn};

/// 执行一次合并操作
///
/// # 参数
/// - `config`: 配置
/// - `bank`: 已加载的题库（合并在内存副本上进行，校验失败不落盘）
/// - `from_report`: true 时直接消费提取报告，否则读人工修正文件
pub async fn run_merge(config: &Config, mut bank: QuestionBank, from_report: bool) -> Result<()> {
    // 加载待合并记录
    let new_records = if from_report {
        info!("📁 从提取报告加载记录: {}", config.report_file);
        bank_store::load_report(Path::new(&config.report_file))
            .await?
            .extracted_questions
    } else {
        info!("📁 从修正文件加载记录: {}", config.corrections_file);
        load_corrections(Path::new(&config.corrections_file)).await?
    };

    if new_records.is_empty() {
        warn!("⚠️ 没有待合并的记录，合并结束");
        return Ok(());
    }

    log_merge_start(new_records.len(), bank.questions.len());

    let store = BankStore::new(config);

    // 备份先行：失败直接中止，主文件不被触碰
    store
        .backup()
        .await
        .map_err(|source| MergeError::BackupFailed { source })?;

    let outcome = MergeService::new().merge(&mut bank, new_records)?;

    store.save(&bank).await?;

    log_merge_complete(&outcome, config);

    Ok(())
}

// ========== 日志辅助函数 ==========

fn log_merge_start(incoming: usize, existing: usize) {
    info!("{}", "=".repeat(60));
    info!("📦 开始合并: 新增 {} 条, 现有 {} 条", incoming, existing);
    info!("{}", "=".repeat(60));
}

fn log_merge_complete(outcome: &MergeOutcome, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("✅ 合并完成");
    info!("新增: {} 条", outcome.added);
    info!("总题数: {}", outcome.total);
    if outcome.flagged > 0 {
        warn!("⚠️ 待人工复核: {} 条", outcome.flagged);
    }
    info!("{}", "=".repeat(60));
    info!("\n存储已更新: {}", config.store_file);
    info!("备份位于: {}", config.backup_file);
}
