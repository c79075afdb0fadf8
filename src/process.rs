//! 目录扫描与迁移流程
//!
//! 遍历目录下的 *.log 文件，先用格式识别过滤非 IIS 日志，
//! 再逐条把数据行写入导出器。单个文件的错误不会中断整个批处理。

use crate::config::TransferConfig;
use crate::error::Result;
use crate::exporter::SqlExporter;
use crate::iislog::{MalformedPolicy, RecordTranspiler, is_iis_log};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

// 提炼复杂返回类型，避免 clippy::type_complexity 警告
type ProcessOutcome = (usize, usize, Vec<(String, String)>);

/// 扫描指定目录，迁移所有可识别的 IIS 日志文件。
///
/// # 参数
/// * `dir` - 日志文件夹路径（可为 Path/PathBuf）
/// * `config` - 迁移配置（表名、格式错误处理策略等）
/// * `exporter` - 接收插入语句的导出器
///
/// # 返回
/// * `Ok((文件数, 记录数, 错误列表))`
///   - 文件数：被识别并处理的 IIS 日志文件数量
///   - 记录数：成功写入的记录条数
///   - 错误列表：Vec<(文件名, 错误详情)>
///
/// # Errors
/// 目录不存在或不可读时返回 `Err`；单个文件的读取、格式、
/// 写入错误均收集到错误列表，不会使整个批处理失败。
///
/// # 行为说明
/// - 仅处理扩展名为 .log 的文件（不区分大小写）
/// - 未命中软件签名的文件不算错误，跳过并记录日志
/// - 格式错误按配置的策略处理：skip 跳过该行，abort 中止该文件
pub fn process_iislog_dir<P: AsRef<Path>>(
    dir: P,
    config: &TransferConfig,
    exporter: &mut dyn SqlExporter,
) -> Result<ProcessOutcome> {
    let policy = MalformedPolicy::from_str(&config.on_malformed)?;
    let mut total_files = 0;
    let mut total_records = 0;
    let mut error_files: Vec<(String, String)> = Vec::new();

    // 遍历目录下的所有文件
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let path = entry.path();
        // 跳过非文件项（例如目录）
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("log"))
        {
            continue;
        }

        // 先识别文件来源，再进行完整解析
        match is_iis_log(&path) {
            Ok(true) => {}
            Ok(false) => {
                #[cfg(feature = "logging")]
                tracing::info!("{name} 不是 IIS 日志文件，已跳过");
                continue;
            }
            Err(e) => {
                error_files.push((name.to_string(), format!("读取失败: {e}")));
                continue;
            }
        }

        total_files += 1;

        #[cfg(feature = "logging")]
        let file_start = std::time::Instant::now();

        total_records +=
            process_file(&path, name, config, policy, exporter, &mut error_files);

        #[cfg(feature = "logging")]
        tracing::trace!("文件 {name} 迁移耗时: {:.2?}", file_start.elapsed());
    }

    Ok((total_files, total_records, error_files))
}

/// 迁移单个已识别的 IIS 日志文件，返回成功写入的记录数。
fn process_file(
    path: &Path,
    name: &str,
    config: &TransferConfig,
    policy: MalformedPolicy,
    exporter: &mut dyn SqlExporter,
    error_files: &mut Vec<(String, String)>,
) -> usize {
    let transpiler = match RecordTranspiler::from_path(path, &config.table_name)
    {
        Ok(transpiler) => transpiler,
        Err(e) => {
            error_files.push((name.to_string(), format!("打开失败: {e}")));
            return 0;
        }
    };

    let mut transferred = 0;
    for item in transpiler {
        match item {
            Ok(statement) => match exporter.export_statement(&statement) {
                Ok(()) => transferred += 1,
                Err(e) => {
                    // 单条写入失败不终止文件，由调用方在错误列表中查看
                    error_files.push((name.to_string(), format!("写入失败: {e}")));
                }
            },
            Err(e) if e.is_malformed() => {
                error_files.push((name.to_string(), e.to_string()));
                if policy == MalformedPolicy::Abort {
                    #[cfg(feature = "logging")]
                    tracing::warn!("文件 {name} 存在格式错误，按配置中止该文件");
                    break;
                }
            }
            Err(e) => {
                // 文件级 IO 错误，终止当前文件但继续批处理
                error_files.push((name.to_string(), format!("读取失败: {e}")));
                break;
            }
        }
    }

    transferred
}

/// 将所有迁移失败的文件及错误详情写入指定路径。
///
/// # 参数
/// * `error_files` - 错误文件及详情列表 Vec<(文件名, 错误详情)>
/// * `out_path` - 错误报告输出路径
///
/// # 行为说明
/// - 若 `error_files` 为空则直接返回 Ok
/// - 否则覆盖写入 `out_path`，并在日志中输出所有错误
///
/// # Errors
/// 文件写入失败时返回 IO 错误。
pub fn write_error_files(
    error_files: &[(String, String)],
    out_path: &str,
) -> Result<()> {
    // 无错误则无需写入
    if error_files.is_empty() {
        return Ok(());
    }

    #[cfg(feature = "logging")]
    tracing::info!("以下文件迁移失败，已写入 {out_path}:");

    // 覆盖写入错误报告
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(out_path)?;
    for (fname, content) in error_files {
        writeln!(file, "{fname}: {content}")?;
        #[cfg(feature = "logging")]
        tracing::info!("  {fname}: {content}");
    }
    Ok(())
}
