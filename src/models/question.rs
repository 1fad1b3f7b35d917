use serde::{Deserialize, Serialize};

/// 正确答案
///
/// 题库中存在三种形态：
/// - 单选题：一个字符串，逐字等于 `options` 中的某一项
/// - 多选/排序题：字符串列表
/// - 配对题：无法还原为平铺答案，存储占位字符串（如 "Multiple matching pairs"）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    /// 单个答案（或配对题占位符）
    Single(String),
    /// 多个答案（按顺序）
    Multiple(Vec<String>),
}

impl CorrectAnswer {
    /// 单个答案的文本（多答案时返回 None）
    pub fn as_single(&self) -> Option<&str> {
        match self {
            CorrectAnswer::Single(s) => Some(s.as_str()),
            CorrectAnswer::Multiple(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CorrectAnswer::Single(s) => s.is_empty(),
            CorrectAnswer::Multiple(v) => v.is_empty(),
        }
    }
}

impl Default for CorrectAnswer {
    fn default() -> Self {
        CorrectAnswer::Single(String::new())
    }
}

/// 难度等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

/// 单条题目记录
///
/// `id` 在每次合并后重排为 1..N 的连续序列；`number` 是源文档中的稳定题号，
/// 唯一但允许存在空缺。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u32,
    pub number: u32,
    pub question: String,

    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: CorrectAnswer,

    #[serde(default)]
    pub explanation: String,
    pub topic: String,

    #[serde(default)]
    pub difficulty: Difficulty,

    /// 答案出自启发式猜测、尚未人工复核时为 true
    #[serde(default, skip_serializing_if = "is_false")]
    pub needs_review: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// 题库元信息
///
/// 除固定字段外，原样保留存储文件中的其余键
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamInfo {
    pub total_questions: usize,
    pub last_updated: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// 题库存储文档（纯数据，无行为）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    pub exam_info: ExamInfo,
    pub questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// 收集所有题号
    pub fn question_numbers(&self) -> Vec<u32> {
        self.questions.iter().map(|q| q.number).collect()
    }
}
