//! 数据导出模块
//!
//! 提供统一的插入语句执行接口和 SQLite 实现

pub mod sqlite;
pub mod stats;

pub use sqlite::SqliteExporter;
pub use stats::TransferStats;

use crate::error::Result;
use crate::iislog::InsertStatement;

/// 同步 SQL 导出器的统一接口
pub trait SqlExporter {
    /// 导出器名称
    fn name(&self) -> &str;

    /// 执行单条插入语句
    fn export_statement(&mut self, statement: &InsertStatement) -> Result<()>;

    /// 批量执行插入语句
    fn export_batch(&mut self, statements: &[InsertStatement]) -> Result<()> {
        for statement in statements {
            self.export_statement(statement)?;
        }
        Ok(())
    }

    /// 完成导出，清理资源
    fn finalize(&mut self) -> Result<()> {
        Ok(())
    }

    /// 获取导出统计信息
    fn get_stats(&self) -> TransferStats {
        TransferStats::default()
    }
}
