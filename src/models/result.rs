use chrono::{DateTime, Local};

/// 单条提交结果（临时值，状态字符串以外不持久化）
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    /// 发布是否成功
    pub success: bool,
    /// 给人看的说明信息
    pub message: String,
    /// 写回库存表状态列的状态字符串
    pub status_update: String,
    /// 发布成功后的广告 URL
    pub ad_url: Option<String>,
    /// 记录标识（bucket_truck_id）
    pub record_id: String,
    /// 本次尝试的时间戳
    pub timestamp: DateTime<Local>,
}

impl SubmissionResult {
    /// 构造失败结果
    pub fn failure(
        record_id: impl Into<String>,
        message: impl Into<String>,
        status_update: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            status_update: status_update.into(),
            ad_url: None,
            record_id: record_id.into(),
            timestamp,
        }
    }
}

/// 一次批处理的汇总结果
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 批次是否正常完成（模式非法或被中断时为 false）
    pub success: bool,
    /// 汇总信息
    pub message: String,
    /// 本批次处理的记录总数
    pub total_records: usize,
    /// 发布成功数
    pub successful_posts: usize,
    /// 发布失败数
    pub failed_posts: usize,
    /// 跳过数（当前没有代码路径会设置它，始终为 0）
    pub skipped_records: usize,
    /// 按处理顺序排列的单条结果
    pub results: Vec<SubmissionResult>,
}

impl BatchResult {
    /// 构造一个没有处理任何记录的失败结果
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }
}

/// 批处理模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// 只处理状态为空、"pending" 或以 "Error" 开头的记录
    New,
    /// 处理所有记录
    All,
}

impl BatchMode {
    /// 从模式字符串解析，未知值返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(BatchMode::New),
            "all" => Some(BatchMode::All),
            _ => None,
        }
    }
}
