//! IIS 日志记录转写器
//!
//! 读取 W3C Extended Log Format 的头部指令和数据行，维护当前字段列表，
//! 把每条数据行转换为一条参数化插入语句。
//!
//! 值永远不会拼接进 SQL 文本：[`InsertStatement`] 携带有序列名和
//! 位置参数值，由存储层通过预编译语句消费。占位符 `-` 转换为 NULL。
//!
//! ## 使用示例
//!
//! ```no_run
//! use iislog_transfer::iislog::RecordTranspiler;
//!
//! let transpiler = RecordTranspiler::from_path("u_ex230101.log", "RawLog")?;
//! for item in transpiler {
//!     match item {
//!         Ok(statement) => println!("{} 列", statement.column_count()),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! # Ok::<(), iislog_transfer::error::TransferError>(())
//! ```

use crate::error::{Result, TransferError};
use crate::iislog::types::{FieldList, InsertStatement};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::str::FromStr;

/// 字段列表指令前缀
const FIELDS_DIRECTIVE: &str = "#Fields:";

/// NULL 值占位符
const NULL_PLACEHOLDER: &str = "-";

/// 格式错误处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// 跳过错误行，继续处理当前文件
    Skip,
    /// 中止当前文件，继续处理其余文件
    Abort,
}

impl FromStr for MalformedPolicy {
    type Err = TransferError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "skip" => Ok(MalformedPolicy::Skip),
            "abort" => Ok(MalformedPolicy::Abort),
            _ => Err(TransferError::config(format!(
                "无效的格式错误处理策略: {s}"
            ))),
        }
    }
}

/// IIS 日志记录转写器
///
/// 惰性迭代器，每条数据行产出一条 [`InsertStatement`]，头部指令行
/// 只更新内部状态不产出记录。迭代消耗读取器，重新处理需要新的文件句柄。
pub struct RecordTranspiler<R: BufRead> {
    lines: Lines<R>,
    table: String,
    fields: Option<FieldList>,
    line_num: usize,
}

impl RecordTranspiler<BufReader<File>> {
    /// 打开文件并创建转写器
    pub fn from_path<P: AsRef<Path>>(path: P, table: &str) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file), table))
    }
}

impl<R: BufRead> RecordTranspiler<R> {
    /// 基于已打开的读取器创建转写器
    pub fn new(reader: R, table: &str) -> Self {
        Self {
            lines: reader.lines(),
            table: table.to_string(),
            fields: None,
            line_num: 0,
        }
    }

    /// 当前生效的字段列表（尚未遇到 #Fields 指令时为 None）
    pub fn current_fields(&self) -> Option<&FieldList> {
        self.fields.as_ref()
    }

    /// 解析 #Fields 指令行，更新当前字段列表
    fn update_fields(&mut self, rest: &str) {
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        let columns: Vec<String> = rest
            .split(' ')
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect();

        #[cfg(feature = "logging")]
        tracing::debug!(
            "行{} 更新字段列表: {} 个字段",
            self.line_num,
            columns.len()
        );

        self.fields = Some(columns.into());
    }

    /// 把一条数据行转换为插入语句
    fn transpile_data_line(&self, line: &str) -> Result<InsertStatement> {
        let Some(fields) = self.fields.clone() else {
            return Err(TransferError::malformed_input(
                self.line_num,
                line.to_string(),
            ));
        };

        let tokens: Vec<&str> = line.split(' ').collect();
        if tokens.len() != fields.len() {
            return Err(TransferError::malformed_record(
                self.line_num,
                fields.len(),
                tokens.len(),
                line.to_string(),
            ));
        }

        let values = tokens
            .iter()
            .map(|token| {
                if *token == NULL_PLACEHOLDER {
                    None
                } else {
                    Some((*token).to_string())
                }
            })
            .collect();

        Ok(InsertStatement { table: self.table.clone(), columns: fields, values })
    }
}

impl<R: BufRead> Iterator for RecordTranspiler<R> {
    type Item = Result<InsertStatement>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => {
                    self.line_num += 1;
                    return Some(Err(e.into()));
                }
            };
            self.line_num += 1;

            // IIS 日志使用 CRLF 行尾，BufRead::lines 只去掉 \n
            let line = raw.trim_end_matches('\r');

            if let Some(rest) = line.strip_prefix(FIELDS_DIRECTIVE) {
                self.update_fields(rest);
                continue;
            }

            // 其他指令行和注释行不产出记录
            if line.starts_with('#') {
                continue;
            }

            if line.is_empty() {
                continue;
            }

            return Some(self.transpile_data_line(line));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
#Software: Microsoft Internet Information Services 7.5
#Fields: date time c-ip cs-method cs-uri-stem
2023-01-01 00:00:00 10.0.0.1 GET /index.html
2023-01-01 00:00:01 - POST -
";

    fn collect(content: &str) -> Vec<Result<InsertStatement>> {
        RecordTranspiler::new(Cursor::new(content.to_string()), "RawLog")
            .collect()
    }

    #[test]
    fn test_sample_produces_two_statements() {
        let items = collect(SAMPLE);
        assert_eq!(items.len(), 2);

        let first = items[0].as_ref().unwrap();
        assert_eq!(first.table, "RawLog");
        assert_eq!(
            first.columns.as_ref(),
            &[
                "date".to_string(),
                "time".to_string(),
                "c-ip".to_string(),
                "cs-method".to_string(),
                "cs-uri-stem".to_string(),
            ]
        );
        assert_eq!(
            first.values,
            vec![
                Some("2023-01-01".to_string()),
                Some("00:00:00".to_string()),
                Some("10.0.0.1".to_string()),
                Some("GET".to_string()),
                Some("/index.html".to_string()),
            ]
        );

        let second = items[1].as_ref().unwrap();
        assert_eq!(second.columns, first.columns);
        assert_eq!(
            second.values,
            vec![
                Some("2023-01-01".to_string()),
                Some("00:00:01".to_string()),
                None,
                Some("POST".to_string()),
                None,
            ]
        );
    }

    #[test]
    fn test_dash_token_becomes_null() {
        let content = "#Fields: a b c\n- x -\n";
        let items = collect(content);
        let statement = items[0].as_ref().unwrap();
        assert_eq!(
            statement.values,
            vec![None, Some("x".to_string()), None]
        );
        assert_eq!(statement.null_count(), 2);
    }

    #[test]
    fn test_data_line_before_fields_directive_is_malformed_input() {
        let content = "#Software: Microsoft Internet Information Services 7.5\n2023-01-01 00:00:00 GET\n";
        let items = collect(content);
        assert_eq!(items.len(), 1);
        assert!(items[0].as_ref().unwrap_err().is_malformed_input());
    }

    #[test]
    fn test_token_count_mismatch_is_malformed_record() {
        let content = "#Fields: date time c-ip\n2023-01-01 00:00:00\n";
        let items = collect(content);
        assert_eq!(items.len(), 1);
        let err = items[0].as_ref().unwrap_err();
        assert!(err.is_malformed_record());
        let display = format!("{err}");
        assert!(display.contains('3'));
        assert!(display.contains('2'));
    }

    #[test]
    fn test_fields_directive_change_takes_effect_immediately() {
        let content = "\
#Fields: date time
2023-01-01 00:00:00
#Fields: date time c-ip
2023-01-02 00:00:00 10.0.0.1
";
        let items = collect(content);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_ref().unwrap().column_count(), 2);
        assert_eq!(items[1].as_ref().unwrap().column_count(), 3);
    }

    #[test]
    fn test_directive_change_does_not_affect_emitted_statements() {
        let content = "\
#Fields: date
2023-01-01
#Fields: date time
2023-01-02 00:00:00
";
        let mut transpiler =
            RecordTranspiler::new(Cursor::new(content.to_string()), "RawLog");
        let first = transpiler.next().unwrap().unwrap();
        assert_eq!(first.column_count(), 1);
        let second = transpiler.next().unwrap().unwrap();
        assert_eq!(second.column_count(), 2);
        // 已产出的记录保持旧版本的字段列表
        assert_eq!(first.columns.as_ref(), &["date".to_string()]);
    }

    #[test]
    fn test_other_directives_are_skipped() {
        let content = "\
#Software: Microsoft Internet Information Services 7.5
#Version: 1.0
#Date: 2023-01-01 00:00:00
#Fields: date
2023-01-01
";
        let items = collect(content);
        assert_eq!(items.len(), 1);
        assert!(items[0].is_ok());
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "#Fields: date time\r\n2023-01-01 00:00:00\r\n";
        let items = collect(content);
        assert_eq!(items.len(), 1);
        let statement = items[0].as_ref().unwrap();
        assert_eq!(statement.values[1], Some("00:00:00".to_string()));
    }

    #[test]
    fn test_embedded_quote_survives_literally() {
        // 值作为位置参数传递，单引号无需转义即可原样保留
        let content = "#Fields: cs-uri-stem\n/o'brien.html\n";
        let items = collect(content);
        assert_eq!(
            items[0].as_ref().unwrap().values[0],
            Some("/o'brien.html".to_string())
        );
    }

    #[test]
    fn test_current_fields_state() {
        let content = "#Fields: date time\n2023-01-01 00:00:00\n";
        let mut transpiler =
            RecordTranspiler::new(Cursor::new(content.to_string()), "RawLog");
        assert!(transpiler.current_fields().is_none());
        let _ = transpiler.next();
        assert_eq!(transpiler.current_fields().map(|f| f.len()), Some(2));
    }

    #[test]
    fn test_malformed_policy_from_str() {
        assert_eq!(
            MalformedPolicy::from_str("skip").unwrap(),
            MalformedPolicy::Skip
        );
        assert_eq!(
            MalformedPolicy::from_str("abort").unwrap(),
            MalformedPolicy::Abort
        );
        assert!(MalformedPolicy::from_str("ignore").is_err());
    }

    #[test]
    fn test_whitespace_only_file_yields_nothing() {
        let items = collect("\n\n\r\n");
        assert!(items.is_empty());
    }
}
