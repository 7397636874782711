//! 应用生命周期 - 编排层
//!
//! ## 职责
//!
//! 本模块是二进制入口背后的"总装车间"：
//!
//! 1. **应用初始化**：写日志文件头、连接浏览器、创建 KijijiBot
//! 2. **库存加载**：从 CSV 文件加载库存表
//! 3. **会话搭建**：进度回调打到日志、Ctrl-C 接到取消标志
//! 4. **批次驱动**：委托 batch_runner 顺序处理
//! 5. **收尾保存**：批次结束后把库存表写回原文件
//! 6. **全局统计**：输出最终统计信息
//!
//! ## 设计特点
//!
//! - **资源所有者**：唯一持有 Browser 的模块
//! - **向下委托**：不处理单条记录的细节

use crate::browser;
use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::models::{load_inventory, save_inventory, BatchResult};
use crate::orchestrator::batch_runner::{run_batch, BatchSession};
use crate::services::KijijiBot;
use crate::utils::logging::init_log_file;
use crate::workflow::SubmitFlow;
use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    bot: KijijiBot,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        // 连接浏览器（复用操作员已登录的 Kijiji 标签页）
        let (browser, page) = browser::connect_to_browser_and_page(
            config.browser_debug_port,
            Some(&config.posting_url),
            Some("Kijiji"),
        )
        .await?;

        let executor = JsExecutor::new(page);
        let bot = KijijiBot::new(executor, &config);

        Ok(Self {
            config,
            _browser: browser,
            bot,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载库存表
        let mut inventory = load_inventory(&self.config.inventory_file)?;

        if inventory.is_empty() {
            warn!("⚠️ 库存表为空，程序结束");
            return Ok(());
        }

        let flow = SubmitFlow::new(&self.config);
        let session = BatchSession::new()
            .with_persist_path(&self.config.inventory_file)
            .with_progress(|percentage, message| {
                info!("📊 {:5.1}% - {}", percentage, message);
                Ok(())
            });

        // Ctrl-C 置取消标志，在下一个行边界生效
        let cancel = session.cancel_flag();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("🛑 收到中断信号，将在当前记录处理完后停止");
                cancel.cancel();
            }
        });

        let result = run_batch(
            &mut inventory,
            &self.config.batch_mode,
            &self.bot,
            &flow,
            &session,
        )
        .await;

        // 收尾保存（批处理内部的周期持久化之外再写一次，确保落盘）
        save_inventory(&inventory, &self.config.inventory_file)?;

        print_final_stats(&result, &self.config);

        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Kijiji 批量发布模式");
    info!("📄 库存文件: {}", config.inventory_file);
    info!("🖼️ 图片目录: {}", config.images_dir);
    info!("⚙️ 批处理模式: {}", config.batch_mode);
    info!("{}", "=".repeat(60));
}

fn print_final_stats(result: &BatchResult, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", result.successful_posts, result.total_records);
    info!("❌ 失败: {}", result.failed_posts);
    info!("📝 {}", result.message);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}
