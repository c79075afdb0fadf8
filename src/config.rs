//! 配置管理模块
//!
//! 提供统一的配置文件读取和管理功能

use crate::error::{Result, TransferError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 主配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 日志配置
    pub log: LogConfig,
    /// IIS 日志迁移配置
    pub transfer: TransferConfig,
    /// SQLite 输出配置
    pub sqlite: SqliteConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 是否启用控制台输出
    pub enable_stdout: bool,
    /// 日志输出目录
    pub log_dir: String,
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// IIS 日志迁移配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// IIS 日志文件目录
    pub iislog_dir: String,
    /// 目标数据表名
    pub table_name: String,
    /// 格式错误处理策略 (skip, abort)
    pub on_malformed: String,
    /// 是否写入错误文件
    pub write_errors: bool,
    /// 错误输出文件路径
    pub errors_out_path: String,
}

/// SQLite 输出配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqliteConfig {
    /// 数据库文件路径
    pub out_path: String,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 从字符串加载配置
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// 加载运行配置：优先读取当前目录下的 config.toml，不存在或解析失败时使用默认值
    pub fn load() -> Self {
        match std::fs::read_to_string("config.toml") {
            Ok(content) => match Self::from_str(&content) {
                Ok(config) => config,
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!("配置文件解析失败，使用默认配置: {_e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        // 验证日志级别
        match self.log.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(TransferError::config(format!(
                    "无效的日志级别: {}",
                    self.log.level
                )));
            }
        }

        // 验证格式错误处理策略
        match self.transfer.on_malformed.as_str() {
            "skip" | "abort" => {}
            _ => {
                return Err(TransferError::config(format!(
                    "无效的格式错误处理策略: {}",
                    self.transfer.on_malformed
                )));
            }
        }

        // 表名必须是可以安全拼入 SQL 的标识符
        if !crate::exporter::sqlite::is_valid_identifier(
            &self.transfer.table_name,
        ) {
            return Err(TransferError::config(format!(
                "无效的表名: {}",
                self.transfer.table_name
            )));
        }

        if self.sqlite.out_path.is_empty() {
            return Err(TransferError::config("数据库文件路径不能为空"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log: LogConfig {
                enable_stdout: true,
                log_dir: "logs".to_string(),
                level: "info".to_string(),
            },
            transfer: TransferConfig {
                iislog_dir: "iislog".to_string(),
                table_name: "RawLog".to_string(),
                on_malformed: "skip".to_string(),
                write_errors: true,
                errors_out_path: "transfer_errors.txt".to_string(),
            },
            sqlite: SqliteConfig { out_path: "rawlog.sqlite".to_string() },
        }
    }
}
