//! 主题分类服务 - 业务能力层
//!
//! 基于关键词命中计数为题目文本选择主题标签

use crate::models::topic::Topic;

/// 主题分类服务
///
/// 对每个主题统计其关键词在文本中出现的个数（子串匹配），
/// 取非零最高分；同分时按 `Topic::ALL` 定义顺序先到者胜。
/// 全部为零时落到 "General IT"。相同输入永远得到相同结果。
pub struct TopicClassifier;

impl TopicClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 为文本选择主题
    ///
    /// # 参数
    /// - `content`: 题干与选项拼接后的文本
    pub fn classify(&self, content: &str) -> Topic {
        let content_lower = content.to_lowercase();

        let mut best: Option<(Topic, usize)> = None;
        for topic in Topic::ALL {
            let score = topic
                .keywords()
                .iter()
                .filter(|keyword| content_lower.contains(*keyword))
                .count();

            if score > 0 && best.map_or(true, |(_, max)| score > max) {
                best = Some((topic, score));
            }
        }

        best.map(|(topic, _)| topic).unwrap_or(Topic::GeneralIt)
    }
}

impl Default for TopicClassifier {
    fn default() -> Self {
        Self::new()
    }
}
