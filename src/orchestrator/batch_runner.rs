//! 批处理运行器 - 编排层
//!
//! ## 职责
//!
//! 本模块驱动一次完整的批量发布：
//!
//! 1. **行选择**：按模式（"new" / "all"）从库存表挑出待处理行
//! 2. **顺序处理**：一行完全处理完再进入下一行，没有并发
//! 3. **进度回调**：按 1-based 百分比通知调用方，回调失败只记日志
//! 4. **周期持久化**：每处理约 10% 的行（以及最后一行）保存库存表
//! 5. **协作式取消**：在行边界检查取消标志，行内不中断
//! 6. **统计汇总**：成功/失败计数与按序的单条结果
//!
//! ## 设计特点
//!
//! - 行级错误永远不会中止批次（提交流程保证总是返回结果）
//! - 会话状态（回调、持久化路径、取消标志）由调用方持有的
//!   `BatchSession` 显式传入，不存在任何全局可变状态

use crate::models::{save_inventory, BatchMode, BatchResult, Inventory};
use crate::services::poster::Poster;
use crate::workflow::{RecordCtx, SubmitFlow};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// 进度回调：(百分比 [0,100], 说明信息)
///
/// 回调属于尽力而为的通知渠道，返回 Err 只会被记录，不会中止批次。
pub type ProgressCallback = Box<dyn Fn(f64, &str) -> Result<()> + Send + Sync>;

/// 取消标志（协作式，只在行边界生效）
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消；下一个行边界处生效
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// 批处理会话
///
/// 一次批处理的全部调用方状态：进度回调、持久化路径、取消标志。
/// 由调用方创建并持有，不跨批次共享。
#[derive(Default)]
pub struct BatchSession {
    progress_cb: Option<ProgressCallback>,
    persist_path: Option<PathBuf>,
    cancel: CancelFlag,
}

impl BatchSession {
    /// 创建新的批处理会话
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置进度回调
    pub fn with_progress(
        mut self,
        cb: impl Fn(f64, &str) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.progress_cb = Some(Box::new(cb));
        self
    }

    /// 设置周期持久化路径
    pub fn with_persist_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_path = Some(path.into());
        self
    }

    /// 获取取消标志的克隆（交给信号处理等外部触发方）
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// 尽力而为地上报进度，回调失败只记日志
    fn report_progress(&self, percentage: f64, message: &str) {
        if let Some(cb) = &self.progress_cb {
            if let Err(e) = cb(percentage, message) {
                warn!("⚠️ 进度回调失败（忽略）: {}", e);
            }
        }
    }
}

/// 运行一次批量发布
///
/// # 参数
/// - `inventory`: 库存表（状态列会被原地更新）
/// - `mode`: 模式字符串，"new" 或 "all"，其他值直接返回失败结果
/// - `poster`: 发布能力
/// - `flow`: 单条记录提交流程
/// - `session`: 调用方持有的会话状态
///
/// # 返回
/// 总是返回 BatchResult，不向调用方抛出任何错误
pub async fn run_batch<P: Poster>(
    inventory: &mut Inventory,
    mode: &str,
    poster: &P,
    flow: &SubmitFlow,
    session: &BatchSession,
) -> BatchResult {
    let Some(batch_mode) = BatchMode::parse(mode) else {
        error!("❌ 非法的批处理模式: {}", mode);
        return BatchResult::failed(format!(
            "Invalid mode: '{}' (expected \"new\" or \"all\")",
            mode
        ));
    };

    // ========== 行选择 ==========
    let selected: Vec<usize> = match batch_mode {
        BatchMode::New => inventory
            .records()
            .iter()
            .enumerate()
            .filter(|(_, record)| record.needs_posting())
            .map(|(index, _)| index)
            .collect(),
        BatchMode::All => (0..inventory.len()).collect(),
    };

    let total_selected = selected.len();
    // 大约每 10% 持久化一次
    let persist_stride = std::cmp::max(1, total_selected / 10);

    log_batch_start(mode, total_selected, inventory.len());

    let mut result = BatchResult {
        success: true,
        ..Default::default()
    };

    // ========== 顺序处理（一次一行） ==========
    for (position, &row_index) in selected.iter().enumerate() {
        // 取消信号只在行边界检查，已写入的状态保持不变
        if session.is_cancelled() {
            warn!(
                "🛑 批处理被中断: 已处理 {}/{} 条记录",
                position, total_selected
            );
            result.success = false;
            result.message = format!(
                "Batch processing interrupted after {} of {} records",
                position, total_selected
            );
            return result;
        }

        let processed = position + 1;
        let percentage = processed as f64 / total_selected as f64 * 100.0;

        let record_id = inventory
            .get(row_index)
            .map(|record| record.display_id().to_string())
            .unwrap_or_default();
        let ctx = RecordCtx::new(record_id, row_index, processed);

        info!("\n{} {}", ctx, "─".repeat(30));
        info!("{} 处理第 {}/{} 条记录", ctx, processed, total_selected);

        session.report_progress(
            percentage,
            &format!(
                "Processing record {} of {} ({})",
                processed, total_selected, ctx.record_id
            ),
        );

        // 行级错误在提交流程内部消化，这里总能拿到结果
        let submission = flow.run_with_store(inventory, row_index, poster).await;

        result.total_records += 1;
        if submission.success {
            result.successful_posts += 1;
        } else {
            result.failed_posts += 1;
        }
        result.results.push(submission);

        // ========== 周期持久化 ==========
        if let Some(path) = &session.persist_path {
            if processed % persist_stride == 0 || processed == total_selected {
                if let Err(e) = save_inventory(inventory, path) {
                    error!("⚠️ 库存持久化失败（继续处理）: {:#}", e);
                }
            }
        }
    }

    // ========== 正常完成 ==========
    session.report_progress(100.0, "Batch processing completed");

    let mut message = format!(
        "Batch processing completed: {} successful, {} failed",
        result.successful_posts, result.failed_posts
    );
    if result.skipped_records > 0 {
        message.push_str(&format!(", {} skipped", result.skipped_records));
    }
    result.message = message;

    log_batch_complete(&result);
    result
}

// ========== 日志辅助函数 ==========

fn log_batch_start(mode: &str, selected: usize, total: usize) {
    info!("{}", "=".repeat(60));
    info!("📦 开始批量发布 (模式: {})", mode);
    info!("📋 选中 {}/{} 条记录", selected, total);
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(result: &BatchResult) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 批处理完成: 成功 {}, 失败 {}, 总计 {}",
        result.successful_posts, result.failed_posts, result.total_records
    );
    info!("{}", "─".repeat(60));
}
