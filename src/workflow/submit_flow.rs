//! 单条记录提交流程 - 流程层
//!
//! 核心职责：定义"一条记录"的完整提交流程
//!
//! 流程顺序：
//! 1. 校验记录 → 不合法直接返回（不调用发布器）
//! 2. 解析图片 → 找不到直接返回（不调用发布器）
//! 3. 委托发布器 → 把结构化结果翻译成状态字符串
//!
//! 每条退出路径都返回 SubmissionResult，任何故障都不会向调用方抛出。

use crate::config::Config;
use crate::models::{AdRecord, Inventory, SubmissionResult};
use crate::services::poster::Poster;
use crate::services::{validate_record, AssetResolver};
use crate::utils::logging::truncate_text;
use chrono::Local;
use tracing::{debug, error, info};

/// 状态列中发布器失败消息的最大长度
const STATUS_MESSAGE_LIMIT: usize = 100;

/// 单条记录提交流程
///
/// - 编排校验 → 图片解析 → 发布 → 结果翻译
/// - 不持有任何浏览器资源
/// - 只依赖业务能力（services）
pub struct SubmitFlow {
    asset_resolver: AssetResolver,
}

impl SubmitFlow {
    /// 创建新的提交流程
    pub fn new(config: &Config) -> Self {
        Self {
            asset_resolver: AssetResolver::new(config.images_dir.clone()),
        }
    }

    /// 使用自定义图片目录创建
    pub fn with_images_dir(images_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            asset_resolver: AssetResolver::new(images_dir.into()),
        }
    }

    /// 提交一条记录
    ///
    /// # 返回
    /// 总是返回 SubmissionResult；`status_update` 由调用方写回库存表
    pub async fn run<P: Poster>(&self, record: &AdRecord, poster: &P) -> SubmissionResult {
        let timestamp = Local::now();
        let record_id = record.display_id().to_string();

        info!("[记录 {}] 开始提交流程", record_id);

        // ========== 流程 1: 校验记录 ==========
        let (is_valid, validation_error) = validate_record(record);
        if !is_valid {
            error!("[记录 {}] 校验失败: {}", record_id, validation_error);
            return SubmissionResult::failure(
                record_id,
                format!("Validation failed: {}", validation_error),
                format!("Error: {}", validation_error),
                timestamp,
            );
        }
        debug!("[记录 {}] 校验通过", record_id);

        // ========== 流程 2: 解析图片（仅当引用了图片时） ==========
        if !record.image_filename.trim().is_empty() {
            if let Err(e) = self.asset_resolver.resolve(record) {
                error!("[记录 {}] 图片解析失败: {}", record_id, e);
                return SubmissionResult::failure(
                    record_id,
                    format!("Image validation failed: {}", e),
                    "Error: Image not found",
                    timestamp,
                );
            }
        }

        // ========== 流程 3: 委托发布器 ==========
        match poster.post_ad(record).await {
            Ok(outcome) if outcome.success => {
                let date_str = timestamp.format("%Y-%m-%d");
                let status_update = format!("Posted {}", date_str);
                let message = match &outcome.ad_url {
                    Some(url) => format!("Ad posted successfully: {}", url),
                    None => "Ad posted successfully (URL not available)".to_string(),
                };

                info!("[记录 {}] ✓ 发布成功，状态: {}", record_id, status_update);

                SubmissionResult {
                    success: true,
                    message,
                    status_update,
                    ad_url: outcome.ad_url,
                    record_id,
                    timestamp,
                }
            }
            Ok(outcome) => {
                // 状态列只保留截断后的失败原因，完整原因进 message
                let truncated = truncate_text(&outcome.message, STATUS_MESSAGE_LIMIT);
                error!("[记录 {}] 发布失败: {}", record_id, outcome.message);

                SubmissionResult::failure(
                    record_id,
                    format!("Posting failed: {}", outcome.message),
                    format!("Error: {}", truncated),
                    timestamp,
                )
            }
            Err(e) => {
                // 传输层故障：状态列降级为通用错误，细节只进 message
                error!("[记录 {}] 发布过程中发生意外错误: {}", record_id, e);

                SubmissionResult::failure(
                    record_id,
                    format!("Unexpected error: {}", e),
                    "Error: System error",
                    timestamp,
                )
            }
        }
    }

    /// 提交一条记录并把状态写回库存表
    ///
    /// 便捷封装：按行号取记录 → 提交 → 写回 `status_update`。
    /// 行号越界时返回合成的失败结果；写回失败只记录日志，不中断。
    pub async fn run_with_store<P: Poster>(
        &self,
        inventory: &mut Inventory,
        index: usize,
        poster: &P,
    ) -> SubmissionResult {
        let record = match inventory.get(index) {
            Some(record) => record.clone(),
            None => {
                error!("行号 {} 超出库存表范围 (共 {} 行)", index, inventory.len());
                return SubmissionResult::failure(
                    format!("Index-{}", index),
                    format!("Error processing record at index {}: row out of range", index),
                    "Error: System error",
                    Local::now(),
                );
            }
        };

        let result = self.run(&record, poster).await;

        if inventory.set_status(index, &result.status_update) {
            debug!("已更新行 {} 的状态: {}", index, result.status_update);
        } else {
            error!("无法更新行 {} 的状态", index);
        }

        result
    }
}
