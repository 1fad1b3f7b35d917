//! 题库存储服务 - 业务能力层
//!
//! 只负责存储文件、备份文件与提取报告的读写能力，不关心流程。
//! JSON 一律人类可读缩进输出，非 ASCII 字符保持原样。

use crate::config::Config;
use crate::error::StoreError;
use crate::models::question::QuestionBank;
use crate::models::report::ExtractionReport;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// 题库存储服务
pub struct BankStore {
    store_path: PathBuf,
    backup_path: PathBuf,
}

impl BankStore {
    /// 从配置创建存储服务
    pub fn new(config: &Config) -> Self {
        Self {
            store_path: PathBuf::from(&config.store_file),
            backup_path: PathBuf::from(&config.backup_file),
        }
    }

    /// 使用自定义路径创建
    pub fn with_paths(store_path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: store_path.into(),
            backup_path: backup_path.into(),
        }
    }

    /// 读取题库存储文件
    pub async fn load(&self) -> Result<QuestionBank, StoreError> {
        let path = self.store_path.display().to_string();

        let content = fs::read_to_string(&self.store_path)
            .await
            .map_err(|e| StoreError::read_failed(path.as_str(), e))?;

        let bank: QuestionBank = serde_json::from_str(&content)
            .map_err(|e| StoreError::JsonParseFailed { path, source: e })?;

        info!(
            "✓ 已加载题库: {} 道题目 (更新于 {})",
            bank.questions.len(),
            bank.exam_info.last_updated
        );

        Ok(bank)
    }

    /// 写回题库存储文件
    pub async fn save(&self, bank: &QuestionBank) -> Result<(), StoreError> {
        write_json(&self.store_path, bank).await
    }

    /// 将当前存储文件逐字节拷贝到备份位置
    ///
    /// 必须在任何改动主文件的操作之前调用
    pub async fn backup(&self) -> Result<(), StoreError> {
        fs::copy(&self.store_path, &self.backup_path)
            .await
            .map_err(|e| StoreError::write_failed(self.backup_path.display().to_string(), e))?;

        info!("✓ 备份已写入: {}", self.backup_path.display());
        Ok(())
    }
}

/// 写出提取结果报告
pub async fn save_report(path: &Path, report: &ExtractionReport) -> Result<(), StoreError> {
    write_json(path, report).await
}

/// 读回提取结果报告（合并时直接消费报告用）
pub async fn load_report(path: &Path) -> Result<ExtractionReport, StoreError> {
    let display = path.display().to_string();

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::read_failed(display.as_str(), e))?;

    serde_json::from_str(&content).map_err(|e| StoreError::JsonParseFailed {
        path: display,
        source: e,
    })
}

/// 以缩进 JSON 写出任意可序列化值
async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| StoreError::JsonEncodeFailed { source: e })?;

    fs::write(path, json)
        .await
        .map_err(|e| StoreError::write_failed(path.display().to_string(), e))?;

    Ok(())
}
