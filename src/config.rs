use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 题库存储文件（JSON）
    pub store_file: String,
    /// 源文本文件
    pub source_file: String,
    /// 提取结果报告文件
    pub report_file: String,
    /// 合并前的备份文件
    pub backup_file: String,
    /// 人工修正文件（TOML）
    pub corrections_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_file: "data/questions.json".to_string(),
            source_file: "webtext.md".to_string(),
            report_file: "missing_questions.json".to_string(),
            backup_file: "data/questions_backup.json".to_string(),
            corrections_file: "corrections.toml".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            store_file: std::env::var("STORE_FILE").unwrap_or(default.store_file),
            source_file: std::env::var("SOURCE_FILE").unwrap_or(default.source_file),
            report_file: std::env::var("REPORT_FILE").unwrap_or(default.report_file),
            backup_file: std::env::var("BACKUP_FILE").unwrap_or(default.backup_file),
            corrections_file: std::env::var("CORRECTIONS_FILE").unwrap_or(default.corrections_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}

/// 运行命令
///
/// 由第一个命令行参数决定；缺省时执行完整的提取流程
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// 只做题号差距分析
    Analyze,
    /// 差距分析 + 提取缺失题目 + 写报告
    Extract,
    /// 合并人工修正记录（from_report 为 true 时直接消费提取报告）
    Merge { from_report: bool },
    /// 打印题库统计
    Summary,
}

impl Command {
    /// 从命令行参数解析命令
    pub fn parse(args: &[String]) -> Result<Self, ConfigError> {
        let Some(name) = args.first() else {
            return Ok(Command::Extract);
        };

        match name.as_str() {
            "analyze" => Ok(Command::Analyze),
            "extract" => Ok(Command::Extract),
            "merge" => Ok(Command::Merge {
                from_report: args.iter().any(|a| a == "--from-report"),
            }),
            "summary" => Ok(Command::Summary),
            other => Err(ConfigError::UnknownCommand {
                given: other.to_string(),
            }),
        }
    }
}
