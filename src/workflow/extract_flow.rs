//! 题目提取流程 - 流程层
//!
//! 核心职责：定义"一个缺失题号"的完整处理流程
//!
//! 流程顺序：
//! 1. 定位并拆解题块（extractor）
//! 2. 主题分类（classifier）
//! 3. 答案猜测（answer）
//! 4. 组装带临时 id 的题目记录

use tracing::{info, warn};

use crate::models::question::{CorrectAnswer, Difficulty, QuestionRecord};
use crate::services::{AnswerIdentifier, QuestionExtractor, TopicClassifier};
use crate::utils::logging::truncate_text;
use crate::workflow::extract_ctx::ExtractCtx;

/// 临时 id 的偏移量；合并前必须重排
const PROVISIONAL_ID_BASE: u32 = 1000;

/// 单个题号的提取结果
#[derive(Debug, Clone)]
pub enum ExtractResult {
    /// 提取成功
    Extracted(QuestionRecord),
    /// 提取失败（软失败，记入失败列表）
    Failed(u32),
}

/// 题目提取流程
///
/// - 编排完整的单题提取流程
/// - 软失败（找不到标记、题干为空）折算为 Failed，绝不中断批次
/// - 不持有任何文件资源，只依赖业务能力（services）
pub struct ExtractFlow {
    extractor: QuestionExtractor,
    classifier: TopicClassifier,
    identifier: AnswerIdentifier,
}

impl ExtractFlow {
    /// 创建新的提取流程
    pub fn new() -> Self {
        Self {
            extractor: QuestionExtractor::new(),
            classifier: TopicClassifier::new(),
            identifier: AnswerIdentifier::new(),
        }
    }

    /// 提取单个题号
    ///
    /// # 参数
    /// - `source`: 完整源文本
    /// - `ctx`: 提取上下文
    pub fn run(&self, source: &str, ctx: &ExtractCtx) -> ExtractResult {
        let block = match self.extractor.extract(source, ctx.number) {
            Ok(block) => block,
            Err(err) => {
                warn!("{} ⚠️ {}", ctx, err);
                return ExtractResult::Failed(err.number());
            }
        };

        info!("{} 题干: {}", ctx, truncate_text(&block.stem, 60));

        // 主题由题干与选项拼接后的文本决定
        let content = format!("{} {}", block.stem, block.options.join(" "));
        let topic = self.classifier.classify(&content);

        let guess = self
            .identifier
            .identify(&block.options, &block.explanation, &block.stem);

        info!(
            "{} ✓ 选项 {} 个, 主题: {}, 答案猜测: {}",
            ctx,
            block.options.len(),
            topic,
            if guess.answer.is_empty() {
                "(无)"
            } else {
                guess.answer.as_str()
            }
        );

        ExtractResult::Extracted(QuestionRecord {
            id: PROVISIONAL_ID_BASE + block.number,
            number: block.number,
            question: block.stem,
            options: block.options,
            correct_answer: CorrectAnswer::Single(guess.answer),
            explanation: block.explanation,
            topic: topic.name().to_string(),
            difficulty: Difficulty::Medium,
            needs_review: guess.needs_review,
        })
    }
}

impl Default for ExtractFlow {
    fn default() -> Self {
        Self::new()
    }
}
