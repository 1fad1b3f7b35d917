//! 答案识别服务 - 业务能力层
//!
//! 在解释文本中为每个选项寻找佐证，给出低置信度的答案猜测。
//! 这只是尽力而为的启发式，不是标准答案来源。

use phf::phf_set;
use tracing::debug;

/// 正向指示词：出现在选项提及附近时视为该选项正确的弱证据
static POSITIVE_INDICATORS: phf::Set<&'static str> = phf_set! {
    "is", "are", "provides", "allows", "correct", "best", "should", "can",
};

/// 指示词窗口半径（字符数）
const WINDOW_RADIUS: usize = 50;

/// 答案猜测结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerGuess {
    /// 猜测的答案文本；无选项时为空串
    pub answer: String,
    /// 未能在解释中确认时为 true，需要人工复核
    pub needs_review: bool,
}

/// 答案识别服务
///
/// 职责：
/// - 按选项顺序在解释中做不区分大小写的子串查找
/// - 命中位置前后 50 字符内出现正向指示词即采纳该选项
/// - 无一命中时回退到第一个选项并标记待复核
pub struct AnswerIdentifier;

impl AnswerIdentifier {
    pub fn new() -> Self {
        Self
    }

    /// 猜测正确答案
    ///
    /// # 参数
    /// - `options`: 选项列表（按出现顺序）
    /// - `explanation`: 解释文本
    /// - `stem`: 题干
    pub fn identify(&self, options: &[String], explanation: &str, stem: &str) -> AnswerGuess {
        if options.is_empty() {
            return AnswerGuess {
                answer: String::new(),
                needs_review: true,
            };
        }

        let explanation_lower = explanation.to_lowercase();

        // 第一个在指示词窗口内得到佐证的选项立即胜出，不再继续评分
        for option in options {
            let option_lower = option.to_lowercase();
            if let Some(pos) = explanation_lower.find(&option_lower) {
                let window = indicator_window(&explanation_lower, pos);
                if POSITIVE_INDICATORS.iter().any(|word| window.contains(word)) {
                    return AnswerGuess {
                        answer: option.clone(),
                        needs_review: false,
                    };
                }
            }
        }

        let stem_lower = stem.to_lowercase();
        if stem_lower.contains("match")
            || stem_lower.contains("place")
            || stem_lower.contains("select")
        {
            debug!("匹配/排序类题目，默认取第一个选项，待人工复核");
        }

        AnswerGuess {
            answer: options[0].clone(),
            needs_review: true,
        }
    }
}

impl Default for AnswerIdentifier {
    fn default() -> Self {
        Self::new()
    }
}

/// 取命中位置前后各 50 字符的窗口
fn indicator_window(text: &str, pos: usize) -> &str {
    let start = clamp_to_char_boundary(text, pos.saturating_sub(WINDOW_RADIUS));
    let end = clamp_to_char_boundary(text, (pos + WINDOW_RADIUS).min(text.len()));
    &text[start..end]
}

/// 窗口边界必须落在字符边界上
fn clamp_to_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
