//! SQLite 数据库导出器
//!
//! 目标表在首次写入时按插入语句的列名创建，运行过程中出现的新列
//! 通过 ALTER TABLE 补充。值只作为位置参数绑定，不拼入 SQL 文本。

use super::{SqlExporter, TransferStats};
use crate::error::{Result, TransferError};
use crate::iislog::InsertStatement;
use lazy_static::lazy_static;
use regex::Regex;
use rusqlite::Connection;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

lazy_static! {
    /// 合法的 SQL 标识符，兼容 W3C 字段名中的连字符和括号
    /// （例如 c-ip、cs(User-Agent)、time-taken）
    static ref IDENTIFIER_RE: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9_()\-]*$").unwrap();
}

/// 校验标识符是否可以安全地拼入 SQL 语句
///
/// 字段列表来自文件头部，不可信任，所以表名和列名在进入
/// DDL/DML 文本之前必须通过白名单校验。
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// 校验并包裹为带引号的 SQL 标识符
fn quote_identifier(name: &str) -> Result<String> {
    if !is_valid_identifier(name) {
        return Err(TransferError::other(format!("非法的 SQL 标识符: {name}")));
    }
    Ok(format!("\"{name}\""))
}

/// SQLite 同步数据库导出器
pub struct SqliteExporter {
    connection: Connection,
    /// 每个已初始化的表对应的已知列集合
    table_columns: HashMap<String, HashSet<String>>,
    stats: TransferStats,
    db_path: PathBuf,
}

impl SqliteExporter {
    /// 创建新的 SQLite 导出器，打开（或创建）数据库文件
    pub fn new(db_path: &Path) -> Result<Self> {
        #[cfg(feature = "logging")]
        tracing::info!("创建 SQLite 导出器: {}", db_path.display());

        let connection = Connection::open(db_path)?;

        Ok(Self {
            connection,
            table_columns: HashMap::new(),
            stats: TransferStats::new(),
            db_path: db_path.to_path_buf(),
        })
    }

    /// 创建内存数据库导出器（测试用）
    pub fn in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        Ok(Self {
            connection,
            table_columns: HashMap::new(),
            stats: TransferStats::new(),
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// 数据库文件路径
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// 确保目标表存在且包含语句需要的所有列
    fn ensure_table(&mut self, statement: &InsertStatement) -> Result<()> {
        if statement.columns.is_empty() {
            return Err(TransferError::other(format!(
                "空字段列表，无法写入表 {}",
                statement.table
            )));
        }

        let table_sql = quote_identifier(&statement.table)?;

        let mut known = match self.table_columns.remove(&statement.table) {
            Some(known) => known,
            None => {
                // 首次写入该表：建表（若不存在），再读出实际列集合，
                // 表可能在之前的运行中已经建立
                let column_defs = statement
                    .columns
                    .iter()
                    .map(|name| {
                        quote_identifier(name).map(|q| format!("{q} TEXT"))
                    })
                    .collect::<Result<Vec<_>>>()?
                    .join(", ");
                self.connection.execute(
                    &format!(
                        "CREATE TABLE IF NOT EXISTS {table_sql} ({column_defs})"
                    ),
                    [],
                )?;

                #[cfg(feature = "logging")]
                tracing::debug!("SQLite 表结构已就绪: {}", statement.table);

                let mut known = HashSet::new();
                let mut pragma = self
                    .connection
                    .prepare(&format!("PRAGMA table_info({table_sql})"))?;
                let names =
                    pragma.query_map([], |row| row.get::<_, String>(1))?;
                for name in names {
                    known.insert(name?);
                }
                known
            }
        };

        // 中途更新的字段列表可能引入新列
        for column in statement.columns.iter() {
            if !known.contains(column) {
                let column_sql = quote_identifier(column)?;
                self.connection.execute(
                    &format!(
                        "ALTER TABLE {table_sql} ADD COLUMN {column_sql} TEXT"
                    ),
                    [],
                )?;

                #[cfg(feature = "logging")]
                tracing::debug!(
                    "表 {} 新增列: {}",
                    statement.table,
                    column
                );

                known.insert(column.clone());
            }
        }

        self.table_columns.insert(statement.table.clone(), known);
        Ok(())
    }

    /// 执行一条参数化插入
    fn execute_statement(&mut self, statement: &InsertStatement) -> Result<()> {
        self.ensure_table(statement)?;

        let columns_sql = statement
            .columns
            .iter()
            .map(|name| quote_identifier(name))
            .collect::<Result<Vec<_>>>()?
            .join(", ");
        let placeholders = (1..=statement.values.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_identifier(&statement.table)?,
            columns_sql,
            placeholders
        );

        self.connection
            .execute(&sql, rusqlite::params_from_iter(statement.values.iter()))?;
        Ok(())
    }
}

impl SqlExporter for SqliteExporter {
    fn name(&self) -> &str {
        "SQLite"
    }

    fn export_statement(&mut self, statement: &InsertStatement) -> Result<()> {
        match self.execute_statement(statement) {
            Ok(()) => {
                self.stats.transferred_records += 1;
                Ok(())
            }
            Err(e) => {
                self.stats.failed_records += 1;
                #[cfg(feature = "logging")]
                tracing::warn!("SQLite 插入记录失败: {}", e);
                Err(e)
            }
        }
    }

    fn finalize(&mut self) -> Result<()> {
        self.stats.finish();

        #[cfg(feature = "logging")]
        tracing::info!(
            "SQLite 导出完成: {} ({})",
            self.stats,
            self.db_path.display()
        );

        Ok(())
    }

    fn get_stats(&self) -> TransferStats {
        self.stats.clone()
    }
}
