use crate::models::question::QuestionRecord;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 人工修正文件的顶层结构
///
/// ```toml
/// [[questions]]
/// id = 1025
/// number = 25
/// question = "..."
/// options = ["PAN", "WAN", "LAN", "MAN"]
/// correct_answer = "LAN"
/// explanation = "..."
/// topic = "Networking"
/// difficulty = "medium"
/// ```
#[derive(Debug, Deserialize)]
struct CorrectionsFile {
    #[serde(default)]
    questions: Vec<QuestionRecord>,
}

/// 从 TOML 文件加载人工修正后的题目记录
pub async fn load_corrections(path: &Path) -> Result<Vec<QuestionRecord>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取修正文件: {}", path.display()))?;

    let file: CorrectionsFile = toml::from_str(&content)
        .with_context(|| format!("无法解析修正文件: {}", path.display()))?;

    tracing::info!("成功加载 {} 条修正记录", file.questions.len());

    Ok(file.questions)
}
