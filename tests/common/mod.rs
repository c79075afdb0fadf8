//! 集成测试公共模块

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// 创建测试用的 IIS 日志文件
pub fn create_test_iislog(
    dir: &TempDir,
    filename: &str,
    content: &str,
) -> std::path::PathBuf {
    let file_path = dir.path().join(filename);
    fs::write(&file_path, content).expect("Failed to write test file");
    file_path
}

/// 标准测试 IIS 日志内容（W3C Extended Log Format）
#[allow(dead_code)]
pub const SAMPLE_IISLOG_CONTENT: &str = "\
#Software: Microsoft Internet Information Services 7.5
#Version: 1.0
#Date: 2023-01-01 00:00:00
#Fields: date time c-ip cs-method cs-uri-stem
2023-01-01 00:00:00 10.0.0.1 GET /index.html
2023-01-01 00:00:01 - POST -
";

/// 不含 IIS 软件签名的日志内容
#[allow(dead_code)]
pub const NON_IIS_CONTENT: &str = "\
#Software: Apache HTTP Server 2.4
#Fields: date time c-ip
2023-01-01 00:00:00 10.0.0.1
";

/// 中途更换字段列表的日志内容
#[allow(dead_code)]
pub const FIELD_CHANGE_CONTENT: &str = "\
#Software: Microsoft Internet Information Services 10.0
#Fields: date time
2023-01-01 00:00:00
#Fields: date time sc-status
2023-01-02 00:00:00 200
";

/// 含字段数不匹配行的日志内容
#[allow(dead_code)]
pub const MALFORMED_CONTENT: &str = "\
#Software: Microsoft Internet Information Services 8.5
#Fields: date time c-ip
2023-01-01 00:00:00 10.0.0.1
2023-01-01 00:00:01
2023-01-01 00:00:02 10.0.0.2
";

/// 验证文件存在且非空
#[allow(dead_code)]
pub fn verify_output_file_exists(path: &Path) -> bool {
    path.exists() && fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false)
}
