//! IIS 日志解析模块
//!
//! 提供 IIS 日志的格式识别、指令解析和插入语句生成

pub mod sniffer;
pub mod transpiler;
pub mod types;

// 重新导出核心类型和函数
pub use sniffer::{IIS_SOFTWARE_SIGNATURE, is_iis_log, sniff_reader};
pub use transpiler::{MalformedPolicy, RecordTranspiler};
pub use types::{FieldList, InsertStatement};
