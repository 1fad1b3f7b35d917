use crate::models::question::QuestionRecord;
use serde::{Deserialize, Serialize};

/// 默认的复核提示语
const DEFAULT_NOTE: &str = "Review and verify correct answers before merging";

/// 提取批次的结果报告
///
/// 成功提取的记录带临时 id（合并前必须重排），失败题号单独列出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub extracted_questions: Vec<QuestionRecord>,
    pub failed_extractions: Vec<u32>,
    pub extraction_info: ExtractionInfo,
}

/// 提取批次的统计信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionInfo {
    pub total_extracted: usize,
    pub total_failed: usize,
    pub missing_numbers: Vec<u32>,
    pub extraction_date: String,

    #[serde(default)]
    pub note: String,
}

impl ExtractionReport {
    /// 汇总一次提取批次
    ///
    /// # 参数
    /// - `extracted`: 成功提取的记录
    /// - `failed`: 提取失败的题号
    /// - `missing_numbers`: 本批次请求的全部题号
    /// - `extraction_date`: 日期（`%Y-%m-%d`）
    pub fn new(
        extracted: Vec<QuestionRecord>,
        failed: Vec<u32>,
        missing_numbers: Vec<u32>,
        extraction_date: String,
    ) -> Self {
        let extraction_info = ExtractionInfo {
            total_extracted: extracted.len(),
            total_failed: failed.len(),
            missing_numbers,
            extraction_date,
            note: DEFAULT_NOTE.to_string(),
        };

        Self {
            extracted_questions: extracted,
            failed_extractions: failed,
            extraction_info,
        }
    }
}
