//! 浏览器连接 - 基础设施层
//!
//! 通过调试端口附着到一个已经登录 Kijiji 的浏览器实例。
//! 登录态由操作员预先准备好，本程序不做任何登录操作。

use anyhow::{Context, Result};
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

/// 连接到浏览器并获取工作页面
///
/// # 参数
/// - `port`: 浏览器调试端口
/// - `target_url`: 找不到匹配页面时新建页面并导航到的 URL
/// - `target_title`: 优先复用标题包含该子串的已打开页面
pub async fn connect_to_browser_and_page(
    port: u16,
    target_url: Option<&str>,
    target_title: Option<&str>,
) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url)
        .await
        .with_context(|| format!("无法连接到浏览器 (端口: {})", port))?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 等待浏览器状态同步
    sleep(Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    // 优先复用已打开的目标页面（通常是操作员登录后留下的标签页）
    if let Some(title) = target_title {
        for p in pages.iter() {
            if let Ok(Some(page_title)) = p.get_title().await {
                if page_title.contains(title) {
                    info!("✓ 复用已打开的页面: {}", page_title);
                    return Ok((browser, p.clone()));
                }
            }
        }
        debug!("未找到标题包含 '{}' 的页面，将创建新页面", title);
    }

    let new_page = browser
        .new_page("about:blank")
        .await
        .context("创建新页面失败")?;

    if let Some(url) = target_url {
        new_page
            .goto(url)
            .await
            .with_context(|| format!("导航到 {} 失败", url))?;
        info!("已导航到: {}", url);
    }

    Ok((browser, new_page))
}
