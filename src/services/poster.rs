//! 发布能力接口 - 业务能力层
//!
//! 把"发布一条广告"抽象成单方法的能力接口：
//! - 入参是一条已通过校验的记录
//! - 出参是固定形状的 `PostOutcome`
//! - 传输层故障（浏览器断开等）以 `Err` 形式抛出，由提交流程捕获降级

use crate::models::AdRecord;
use anyhow::Result;
use serde::Deserialize;
use std::future::Future;

/// 发布结果（发布器返回的结构化结果）
#[derive(Debug, Clone, Deserialize)]
pub struct PostOutcome {
    /// 发布是否成功
    pub success: bool,
    /// 发布器给出的说明信息
    #[serde(default)]
    pub message: String,
    /// 发布成功后的广告 URL
    #[serde(default)]
    pub ad_url: Option<String>,
}

/// 发布能力接口
///
/// 实现方只需要提供一个 `post_ad`：成功与否都返回 `PostOutcome`，
/// 只有传输层故障才返回 `Err`。
pub trait Poster {
    fn post_ad(&self, record: &AdRecord) -> impl Future<Output = Result<PostOutcome>>;
}
