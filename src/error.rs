//! 错误类型定义
//!
//! 这个模块定义了库中使用的所有错误类型，使用 thiserror 提供丰富的错误信息。

/// IIS 日志迁移的结果类型
pub type Result<T> = std::result::Result<T, TransferError>;

/// IIS 日志迁移错误类型
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite错误
    #[error("SQLite错误: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// 配置文件解析错误
    #[error("配置解析错误: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// 配置文件序列化错误
    #[error("配置序列化错误: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 数据行出现在 #Fields 指令之前，无法确定列名
    #[error("缺少 #Fields 指令 (行{line}): {content}")]
    MalformedInput { line: usize, content: String },

    /// 数据行的值数量与当前字段列表不一致
    #[error("字段数不匹配 (行{line}): 期望 {expected} 个，实际 {actual} 个: {content}")]
    MalformedRecord {
        line: usize,
        expected: usize,
        actual: usize,
        content: String,
    },

    /// 日志错误（仅在启用 logging feature 时可用）
    #[cfg(feature = "logging")]
    #[error("日志错误: {0}")]
    Log(#[from] crate::logging::LogError),

    /// 其他错误
    #[error("未知错误: {0}")]
    Other(String),
}

impl TransferError {
    /// 创建一个缺少 #Fields 指令的格式错误
    pub fn malformed_input(line: usize, content: String) -> Self {
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!("行{} 缺少 #Fields 指令: {}", line, content);
        }
        Self::MalformedInput { line, content }
    }

    /// 创建一个字段数不匹配的记录错误
    pub fn malformed_record(
        line: usize,
        expected: usize,
        actual: usize,
        content: String,
    ) -> Self {
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!(
                "行{} 字段数不匹配: 期望 {} 个，实际 {} 个",
                line,
                expected,
                actual
            );
        }
        Self::MalformedRecord { line, expected, actual, content }
    }

    /// 创建一个配置错误
    pub fn config<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!("配置错误: {}", message);
        }
        Self::Config(message)
    }

    /// 创建一个其他类型错误
    pub fn other<S: Into<String>>(message: S) -> Self {
        let message = message.into();
        #[cfg(feature = "logging")]
        {
            crate::logging::ensure_logger_initialized();
            tracing::error!("未知错误: {}", message);
        }
        Self::Other(message)
    }

    /// 检查是否为 IO 错误
    pub fn is_io_error(&self) -> bool {
        matches!(self, TransferError::Io(_))
    }

    /// 检查是否为缺少 #Fields 指令的错误
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, TransferError::MalformedInput { .. })
    }

    /// 检查是否为字段数不匹配的错误
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, TransferError::MalformedRecord { .. })
    }

    /// 检查是否为格式类错误（两种格式错误之一）
    pub fn is_malformed(&self) -> bool {
        self.is_malformed_input() || self.is_malformed_record()
    }

    /// 检查是否为配置错误
    pub fn is_config_error(&self) -> bool {
        matches!(self, TransferError::Config(_))
    }
}
