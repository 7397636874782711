//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和应用生命周期，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 初始化（日志、浏览器、KijijiBot）
//! - 加载库存表、搭建会话、驱动批次
//! - 收尾保存与全局统计
//!
//! ### `batch_runner` - 批处理运行器
//! - 按模式选择待处理行
//! - 顺序处理（一次一行，无并发）
//! - 进度回调、周期持久化、协作式取消
//!
//! ## 层次关系
//!
//! ```text
//! app (生命周期)
//!     ↓
//! batch_runner (处理选中的行)
//!     ↓
//! workflow::SubmitFlow (处理单条 AdRecord)
//!     ↓
//! services (能力层：validator / asset_resolver / poster)
//!     ↓
//! infrastructure (基础设施：JsExecutor)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：app 管生命周期，batch_runner 管批量
//! 2. **资源隔离**：只有编排层持有 Browser
//! 3. **显式会话**：回调/取消/持久化路径都挂在 BatchSession 上
//! 4. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod app;
pub mod batch_runner;

// 重新导出主要类型
pub use app::App;
pub use batch_runner::{run_batch, BatchSession, CancelFlag, ProgressCallback};
