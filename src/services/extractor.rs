//! 题块提取服务 - 业务能力层
//!
//! 只负责"从源文本定位并拆解一个题块"的能力，不关心流程

use crate::error::ExtractError;
use regex::Regex;

/// 从源文本拆解出的题块
///
/// 题干已做空白归一化；选项保持出现顺序
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionBlock {
    pub number: u32,
    pub stem: String,
    pub options: Vec<String>,
    pub explanation: String,
}

/// 题块提取服务
///
/// 职责：
/// - 按题号定位起始行（行首 "N. "，题号必须完整匹配）
/// - 以下一个题号标记为界截取题块
/// - 将题块拆解为题干、选项列表、解释
pub struct QuestionExtractor {
    /// 行首题号标记，捕获组为题号本身
    marker: Regex,
}

impl QuestionExtractor {
    pub fn new() -> Self {
        Self {
            marker: Regex::new(r"^(\d+)\.\s+").expect("题号标记正则应当合法"),
        }
    }

    /// 提取指定题号的题块
    ///
    /// # 参数
    /// - `source`: 完整源文本
    /// - `number`: 目标题号
    ///
    /// # 返回
    /// 拆解后的题块；找不到起始标记返回 `NotFound`，题干为空返回 `EmptyStem`
    pub fn extract(&self, source: &str, number: u32) -> Result<QuestionBlock, ExtractError> {
        let lines: Vec<&str> = source.lines().collect();

        // 定位起始行：标记必须从第 0 列开始，题号逐字相等（"2" 不能匹配 "25."）
        let start = lines
            .iter()
            .position(|line| self.is_start_line(line, number))
            .ok_or(ExtractError::NotFound { number })?;

        // 向后扫描到下一个题号标记（不含），否则到文本结尾
        let end = lines[start + 1..]
            .iter()
            .position(|line| self.marker.is_match(line))
            .map(|offset| start + 1 + offset)
            .unwrap_or(lines.len());

        let block = &lines[start..end];

        let stem = normalize_whitespace(self.marker.replace(block[0], "").as_ref());
        if stem.is_empty() {
            return Err(ExtractError::EmptyStem { number });
        }

        let (options, explanation) = parse_block_body(&block[1..]);

        Ok(QuestionBlock {
            number,
            stem,
            options,
            explanation,
        })
    }

    /// 判断某行是否是指定题号的起始行
    fn is_start_line(&self, line: &str, number: u32) -> bool {
        self.marker
            .captures(line)
            .map(|caps| caps[1] == number.to_string())
            .unwrap_or(false)
    }
}

impl Default for QuestionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// 对题块正文逐行分类，拆出选项列表和解释
///
/// 规则（按出现顺序应用）：
/// - "explanation:" 开头的行（不区分大小写）开启解释；后续非空行持续拼接，
///   遇到空行或 "other case" 开头的行停止，此后整块解析结束
/// - 空行、"other case"/"case" 开头、整行括号包裹、长度不足 3 字符的行跳过
/// - 其余长度小于 150、不以 ":" 结尾、不以 "explanation" 开头的行计为选项
/// - 收集到 4 个及以上选项时只保留前 4 个，不足 4 个原样返回
fn parse_block_body(body: &[&str]) -> (Vec<String>, String) {
    let mut options: Vec<String> = Vec::new();
    let mut explanation = String::new();

    let mut i = 0;
    while i < body.len() {
        let line = body[i].trim();

        if line.is_empty() {
            i += 1;
            continue;
        }

        let lower = line.to_lowercase();

        if lower.starts_with("explanation:") {
            explanation = line[12..].trim().to_string();

            // 持续拼接解释行，直到空行或 "other case"
            i += 1;
            while i < body.len() {
                let next = body[i].trim();
                if next.is_empty() || next.to_lowercase().starts_with("other case") {
                    break;
                }
                explanation.push(' ');
                explanation.push_str(next);
                i += 1;
            }
            break;
        }

        if lower.starts_with("other case")
            || lower.starts_with("case")
            || (line.starts_with('(') && line.ends_with(')'))
            || line.chars().count() < 3
        {
            i += 1;
            continue;
        }

        if line.chars().count() < 150 && !line.ends_with(':') && !lower.starts_with("explanation") {
            options.push(line.to_string());
        }

        i += 1;
    }

    if options.len() >= 4 {
        options.truncate(4);
    }

    (options, explanation.trim().to_string())
}

/// 折叠连续空白为单个空格并去除首尾空白
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
