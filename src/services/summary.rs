//! 题库统计服务 - 业务能力层
//!
//! 对题库存储做只读聚合并打印摘要：总量、编号空缺、主题分布、题型分布

use crate::models::question::{CorrectAnswer, QuestionBank};
use std::collections::BTreeSet;
use tracing::info;

/// 题型分布
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnswerTypeStats {
    pub single_choice: usize,
    pub multiple_choice: usize,
    pub matching: usize,
}

/// 题库统计服务
pub struct SummaryReporter;

impl SummaryReporter {
    pub fn new() -> Self {
        Self
    }

    /// 打印题库摘要
    pub fn report(&self, bank: &QuestionBank) {
        info!("{}", "=".repeat(60));
        info!("📊 题库统计摘要");
        info!("{}", "=".repeat(60));
        info!("总题数: {}", bank.exam_info.total_questions);
        info!("上次更新: {}", bank.exam_info.last_updated);

        let numbers: Vec<u32> = {
            let mut n = bank.question_numbers();
            n.sort_unstable();
            n
        };

        if let (Some(min), Some(max)) = (numbers.first(), numbers.last()) {
            info!("\n📋 题号范围: {} - {}", min, max);
            let gaps = self.numbering_gaps(bank);
            if gaps.is_empty() {
                info!("✅ 编号无空缺");
            } else {
                info!("⚠️ 仍缺失题号: {:?}", gaps);
            }
        }

        info!("\n📂 主题分布:");
        let total = bank.questions.len().max(1);
        for (topic, count) in self.topic_distribution(bank) {
            let percentage = (count as f64 / total as f64) * 100.0;
            info!("  {:<20}: {:>3} 道 ({:>5.1}%)", topic, count, percentage);
        }

        let types = self.answer_type_stats(bank);
        info!("\n📝 题型分布:");
        info!("  单选: {}", types.single_choice);
        info!("  多选/排序: {}", types.multiple_choice);
        info!("  配对: {}", types.matching);

        let pending = self.needs_review_count(bank);
        if pending > 0 {
            info!("\n⚠️ 待人工复核: {} 道", pending);
        }
        info!("{}", "=".repeat(60));
    }

    /// 期望连续范围 [1, max] 内缺失的题号
    pub fn numbering_gaps(&self, bank: &QuestionBank) -> Vec<u32> {
        let existing: BTreeSet<u32> = bank.question_numbers().into_iter().collect();
        match existing.iter().next_back() {
            Some(&max) => (1..=max).filter(|n| !existing.contains(n)).collect(),
            None => Vec::new(),
        }
    }

    /// 主题分布，按数量降序（数量一致按名称排序，保证输出稳定）
    pub fn topic_distribution(&self, bank: &QuestionBank) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for question in &bank.questions {
            match counts.iter_mut().find(|(name, _)| *name == question.topic) {
                Some((_, count)) => *count += 1,
                None => counts.push((question.topic.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// 题型分布
    ///
    /// 答案为多元素列表计多选；单字符串含 "matching" 或题干含 "match"
    /// 计配对/排序；其余计单选
    pub fn answer_type_stats(&self, bank: &QuestionBank) -> AnswerTypeStats {
        let mut stats = AnswerTypeStats::default();

        for question in &bank.questions {
            match &question.correct_answer {
                CorrectAnswer::Multiple(answers) if answers.len() > 1 => {
                    stats.multiple_choice += 1;
                }
                CorrectAnswer::Multiple(_) => {
                    stats.single_choice += 1;
                }
                CorrectAnswer::Single(answer) => {
                    if answer.to_lowercase().contains("matching")
                        || question.question.to_lowercase().contains("match")
                    {
                        stats.matching += 1;
                    } else {
                        stats.single_choice += 1;
                    }
                }
            }
        }

        stats
    }

    /// 待人工复核的记录数
    pub fn needs_review_count(&self, bank: &QuestionBank) -> usize {
        bank.questions.iter().filter(|q| q.needs_review).count()
    }
}

impl Default for SummaryReporter {
    fn default() -> Self {
        Self::new()
    }
}
