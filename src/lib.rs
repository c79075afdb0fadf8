// 核心模块 - 始终可用
pub mod config;
pub mod error;
pub mod exporter;
pub mod iislog;
pub mod input_path;
pub mod process;

// 日志模块 - 需要 logging 功能
#[cfg(feature = "logging")]
pub mod logging;
