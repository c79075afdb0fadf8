use anyhow::Result;
use iislog_transfer::{
    config::Config,
    exporter::{SqlExporter, SqliteExporter},
    input_path::get_iislog_dir,
    process::{process_iislog_dir, write_error_files},
};
use std::path::Path;
use std::time::Instant;

pub fn run() -> Result<()> {
    let config = Config::load();

    #[cfg(feature = "logging")]
    init_logging_from_config(&config);

    let dir = get_iislog_dir(&config.transfer.iislog_dir);
    if !dir.exists() {
        println!("目录不存在: {}", dir.display());
        return Ok(());
    }

    let mut exporter =
        SqliteExporter::new(Path::new(&config.sqlite.out_path))?;

    let start = Instant::now();
    let (total_files, total_records, error_files) =
        process_iislog_dir(&dir, &config.transfer, &mut exporter)?;
    exporter.finalize()?;
    let elapsed = start.elapsed();

    println!(
        "\n迁移完成，共处理 {total_files} 个文件，成功写入 {total_records} 条记录，失败 {} 条，总耗时: {elapsed:.2?}",
        error_files.len()
    );

    if config.transfer.write_errors {
        write_error_files(&error_files, &config.transfer.errors_out_path)?;
    }

    Ok(())
}

#[cfg(feature = "logging")]
fn init_logging_from_config(config: &Config) {
    use iislog_transfer::logging::{LogConfig, init_logging};
    use std::str::FromStr;
    use tracing::Level;

    let level =
        Level::from_str(&config.log.level).unwrap_or(Level::INFO);
    let log_config = LogConfig::new()
        .level(level)
        .log_dir(config.log.log_dir.clone())
        .enable_stdout(config.log.enable_stdout);
    // 初始化失败（例如已经初始化过）不影响迁移流程
    let _ = init_logging(log_config);
}
