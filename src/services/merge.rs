//! 合并服务 - 业务能力层
//!
//! 将人工修正后的记录并入题库：校验、追加、按题号排序、重排全部 id。
//! 本模块只做内存中的纯合并；备份与落盘顺序由编排层保证。

use crate::error::MergeError;
use crate::models::question::{QuestionBank, QuestionRecord};
use std::collections::BTreeSet;
use tracing::warn;

/// 合并结果统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    /// 新增记录数
    pub added: usize,
    /// 合并后的总题数
    pub total: usize,
    /// 因答案未在选项中而标记待复核的记录数
    pub flagged: usize,
}

/// 合并服务
pub struct MergeService;

impl MergeService {
    pub fn new() -> Self {
        Self
    }

    /// 将新记录并入题库
    ///
    /// # 参数
    /// - `bank`: 题库（就地修改）
    /// - `new_records`: 人工修正后的新记录
    ///
    /// # 返回
    /// 合并统计；题号与现有记录或批内重复时返回校验错误，题库保持原样
    pub fn merge(
        &self,
        bank: &mut QuestionBank,
        new_records: Vec<QuestionRecord>,
    ) -> Result<MergeOutcome, MergeError> {
        // 校验先行：任何冲突都在改动题库之前报出
        let mut seen: BTreeSet<u32> = bank.questions.iter().map(|q| q.number).collect();
        let mut conflicts = Vec::new();
        for record in &new_records {
            if !seen.insert(record.number) {
                conflicts.push(record.number);
            }
        }
        if !conflicts.is_empty() {
            return Err(MergeError::Validation {
                reason: format!("题号重复: {:?}", conflicts),
            });
        }

        // 单选答案应当逐字等于某个选项；配对/排序题的占位答案不在其列，
        // 不拒绝，但强制标记待复核
        let mut records = new_records;
        let mut flagged = 0;
        for record in &mut records {
            if let Some(answer) = record.correct_answer.as_single() {
                if !record.options.is_empty() && !record.options.iter().any(|o| o == answer) {
                    warn!(
                        "⚠️ 题号 {} 的答案不在选项中（疑似配对题占位符），已标记待复核",
                        record.number
                    );
                    record.needs_review = true;
                    flagged += 1;
                }
            }
        }

        let added = records.len();
        bank.questions.extend(records);

        // 按题号升序排列（题号一致时按原 id 稳定），随后全量重排 id 为 1..N
        bank.questions.sort_by_key(|q| (q.number, q.id));
        for (index, question) in bank.questions.iter_mut().enumerate() {
            question.id = (index + 1) as u32;
        }

        bank.exam_info.total_questions = bank.questions.len();
        bank.exam_info.last_updated = chrono::Local::now().format("%Y-%m-%d").to_string();

        Ok(MergeOutcome {
            added,
            total: bank.questions.len(),
            flagged,
        })
    }
}

impl Default for MergeService {
    fn default() -> Self {
        Self::new()
    }
}
