use thiserror::Error;

/// 提取阶段错误
///
/// 均为软失败：单个题号提取失败只计入失败列表，不中断批次
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// 源文本中找不到该题号的起始标记
    #[error("源文本中未找到题号 {number} 的起始标记")]
    NotFound { number: u32 },

    /// 找到题块但题干剥离后为空
    #[error("题号 {number} 的题干为空")]
    EmptyStem { number: u32 },
}

impl ExtractError {
    /// 错误对应的题号
    pub fn number(&self) -> u32 {
        match self {
            ExtractError::NotFound { number } | ExtractError::EmptyStem { number } => *number,
        }
    }
}

/// 存储文件操作错误
///
/// 致命错误：中止当前操作
#[derive(Debug, Error)]
pub enum StoreError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// JSON 序列化失败
    #[error("JSON序列化失败: {source}")]
    JsonEncodeFailed {
        #[source]
        source: serde_json::Error,
    },
}

// ========== 便捷构造函数 ==========

impl StoreError {
    /// 创建文件读取错误
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

/// 合并阶段错误
///
/// 整体失败：备份或校验不通过时，主存储文件必须保持原样
#[derive(Debug, Error)]
pub enum MergeError {
    /// 备份写入失败，合并在主文件被改动之前中止
    #[error("备份写入失败，合并已中止: {source}")]
    BackupFailed {
        #[source]
        source: StoreError,
    },

    /// 新记录与现有题库冲突
    #[error("记录校验失败: {reason}")]
    Validation { reason: String },
}

/// 配置错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 未知命令
    #[error("未知命令: {given}（可用: analyze / extract / merge / summary）")]
    UnknownCommand { given: String },
}
