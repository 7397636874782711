//! 记录处理上下文
//!
//! 封装"我正在处理第几行的哪条记录"这一信息

use std::fmt::Display;

/// 记录处理上下文
#[derive(Debug, Clone)]
pub struct RecordCtx {
    /// 记录标识（bucket_truck_id）
    pub record_id: String,

    /// 记录在库存表中的行号（从 0 开始）
    pub row_index: usize,

    /// 本批次内的序号（从 1 开始，仅用于日志显示）
    pub batch_position: usize,
}

impl RecordCtx {
    /// 创建新的记录上下文
    pub fn new(record_id: String, row_index: usize, batch_position: usize) -> Self {
        Self {
            record_id,
            row_index,
            batch_position,
        }
    }
}

impl Display for RecordCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[记录 {} 行#{}]", self.record_id, self.row_index)
    }
}
