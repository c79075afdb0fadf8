//! 配置模块集成测试

use iislog_transfer::config::Config;
use tempfile::TempDir;

#[test]
fn test_config_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let config = Config::default();
    config.save_to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded.transfer.table_name, config.transfer.table_name);
    assert_eq!(loaded.sqlite.out_path, config.sqlite.out_path);
    assert_eq!(loaded.log.level, config.log.level);
}

#[test]
fn test_from_file_missing_path_returns_err() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("no_config.toml");
    let result = Config::from_file(&missing);
    assert!(result.is_err());
    assert!(result.unwrap_err().is_io_error());
}

#[test]
fn test_custom_table_name_accepted() {
    let content = r#"
[log]
enable_stdout = false
log_dir = "logs"
level = "debug"

[transfer]
iislog_dir = "C:/inetpub/logs/LogFiles/W3SVC1"
table_name = "AccessLog"
on_malformed = "abort"
write_errors = false
errors_out_path = "errors.txt"

[sqlite]
out_path = "access.sqlite"
"#;
    let config = Config::from_str(content).unwrap();
    assert_eq!(config.transfer.table_name, "AccessLog");
    assert_eq!(config.transfer.on_malformed, "abort");
    assert!(!config.log.enable_stdout);
}

#[test]
fn test_invalid_level_rejected() {
    let mut config = Config::default();
    config.log.level = "verbose".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_injection_prone_table_name_rejected() {
    let mut config = Config::default();
    config.transfer.table_name = "RawLog; DROP TABLE RawLog".to_string();
    let result = config.validate();
    assert!(result.unwrap_err().is_config_error());
}
