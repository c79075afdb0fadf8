//! 迁移统计信息模块

/// 迁移统计信息
#[derive(Debug, Default, Clone)]
pub struct TransferStats {
    /// 已写入的记录数
    pub transferred_records: usize,
    /// 写入失败的记录数
    pub failed_records: usize,
    /// 迁移开始时间
    pub start_time: Option<std::time::Instant>,
    /// 迁移完成时间
    pub end_time: Option<std::time::Instant>,
}

impl TransferStats {
    /// 创建新的统计信息，记录开始时间
    pub fn new() -> Self {
        Self {
            start_time: Some(std::time::Instant::now()),
            ..Default::default()
        }
    }

    /// 标记迁移完成，记录结束时间
    pub fn finish(&mut self) {
        self.end_time = Some(std::time::Instant::now());
    }

    /// 计算迁移持续时间
    pub fn duration(&self) -> Option<std::time::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.duration_since(start)),
            _ => None,
        }
    }

    /// 计算每秒写入记录数
    pub fn records_per_second(&self) -> Option<f64> {
        self.duration().map(|d| {
            if d.as_secs_f64() > 0.0 {
                self.transferred_records as f64 / d.as_secs_f64()
            } else {
                0.0
            }
        })
    }

    /// 计算成功率
    pub fn success_rate(&self) -> f64 {
        let total = self.transferred_records + self.failed_records;
        if total > 0 {
            self.transferred_records as f64 / total as f64 * 100.0
        } else {
            0.0
        }
    }

    /// 获取总记录数
    pub fn total_records(&self) -> usize {
        self.transferred_records + self.failed_records
    }

    /// 重置统计信息
    pub fn reset(&mut self) {
        self.transferred_records = 0;
        self.failed_records = 0;
        self.start_time = Some(std::time::Instant::now());
        self.end_time = None;
    }
}

impl std::fmt::Display for TransferStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "成功: {}, 失败: {}",
            self.transferred_records, self.failed_records
        )?;

        if let Some(duration) = self.duration() {
            write!(f, ", 耗时: {:.2}s", duration.as_secs_f64())?;

            if let Some(rps) = self.records_per_second() {
                write!(f, ", 速度: {:.2} 记录/秒", rps)?;
            }
        }

        write!(f, ", 成功率: {:.1}%", self.success_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_without_finish() {
        let s = format!("{}", TransferStats::new());
        // 未完成时不显示耗时，但应包含成功率
        assert!(s.contains("成功"));
        assert!(s.contains("成功率"));
    }

    #[test]
    fn test_records_per_second_zero_duration() {
        let mut stats = TransferStats::new();
        stats.transferred_records = 1;
        // 人为设置 end_time == start_time 模拟零耗时
        if let Some(start) = stats.start_time {
            stats.end_time = Some(start);
        }

        assert_eq!(stats.records_per_second().unwrap(), 0.0);
    }

    #[test]
    fn test_success_rate_and_reset() {
        let mut stats = TransferStats::default();
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.total_records(), 0);

        stats.transferred_records = 3;
        stats.failed_records = 1;
        assert!((stats.success_rate() - 75.0).abs() < 1e-6);
        assert_eq!(stats.total_records(), 4);

        stats.finish();
        assert!(stats.end_time.is_some());
        stats.reset();
        assert_eq!(stats.transferred_records, 0);
        assert_eq!(stats.failed_records, 0);
        assert!(stats.end_time.is_none());
    }

    #[test]
    fn test_duration_none_for_default() {
        let stats = TransferStats::default();
        assert!(stats.duration().is_none());
        assert!(stats.records_per_second().is_none());
    }
}
