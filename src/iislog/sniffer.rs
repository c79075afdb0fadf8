//! IIS 日志格式识别
//!
//! 在完整解析之前，通过头部指令判断候选文件是否来自 IIS。
//! 逐行扫描，一旦命中签名立即返回，不缓存整个文件。

use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// IIS 日志的软件签名指令前缀
pub const IIS_SOFTWARE_SIGNATURE: &str =
    "#Software: Microsoft Internet Information Services";

/// 从已打开的读取器中识别 IIS 日志
///
/// 逐行向前扫描，找到以 [`IIS_SOFTWARE_SIGNATURE`] 开头的行即返回
/// `Ok(true)`；读到文件末尾仍未找到返回 `Ok(false)`。
/// 读取器的游标会被消耗，完整解析需要重新打开文件。
pub fn sniff_reader<R: BufRead>(reader: R) -> Result<bool> {
    for line in reader.lines() {
        let line = line?;
        if line.starts_with(IIS_SOFTWARE_SIGNATURE) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// 判断指定路径的文件是否为 IIS 日志
pub fn is_iis_log<P: AsRef<Path>>(path: P) -> Result<bool> {
    let file = File::open(path.as_ref())?;
    let recognized = sniff_reader(BufReader::new(file))?;

    #[cfg(feature = "logging")]
    tracing::debug!(
        "文件 {} 识别结果: {}",
        path.as_ref().display(),
        if recognized { "IIS 日志" } else { "非 IIS 日志" }
    );

    Ok(recognized)
}
