use std::sync::Arc;

/// 有序字段名列表，来自最近一次 #Fields 指令。
///
/// 使用 `Arc` 共享：同一指令作用范围内的所有记录持有同一份列表，
/// 指令在文件中途更新时旧记录仍然引用更新前的版本。
pub type FieldList = Arc<[String]>;

/// 单条插入语句，对应一条数据行
///
/// 值与列名按位置一一对应，`None` 表示 SQL NULL（来自占位符 `-`）。
/// 值只作为位置参数传递给预编译语句，不拼入 SQL 文本。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    /// 目标数据表名
    pub table: String,
    /// 有序列名列表（生成该记录时生效的字段列表版本）
    pub columns: FieldList,
    /// 有序值列表，与列名位置对应
    pub values: Vec<Option<String>>,
}

impl InsertStatement {
    /// 列数（等于值数）
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 统计 NULL 值数量
    pub fn null_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}
