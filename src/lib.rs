//! # Kijiji Ad Submit
//!
//! 一个用于批量发布二手设备广告的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单条 AdRecord
//! - `validator` - 记录字段校验能力（纯函数）
//! - `AssetResolver` - 图片文件解析能力
//! - `Poster` / `KijijiBot` - 广告发布能力（固定的结果契约）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一条记录"的完整提交流程
//! - `RecordCtx` - 上下文封装（record_id + 行号）
//! - `SubmitFlow` - 流程编排（校验 → 图片 → 发布 → 状态字符串）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_runner` - 批处理运行器，行选择 + 顺序循环
//! - `orchestrator/app` - 应用生命周期，管理浏览器资源
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::JsExecutor;
pub use models::{
    load_inventory, save_inventory, AdRecord, BatchMode, BatchResult, Inventory, SubmissionResult,
};
pub use orchestrator::{run_batch, App, BatchSession, CancelFlag};
pub use services::{validate_record, KijijiBot, PostOutcome, Poster};
pub use workflow::{RecordCtx, SubmitFlow};
