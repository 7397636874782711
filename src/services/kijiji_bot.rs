//! Kijiji 发布机器人 - 业务能力层
//!
//! `Poster` 的浏览器实现：通过 `JsExecutor` 在已登录的 Kijiji
//! 页面里填写发布表单、提交并检查成功标记。
//!
//! 表单交互刻意保持最简（定位、填值、点击、等待、取 URL）；
//! 页面结构变化只影响本模块，不影响提交流程和批处理。

use crate::config::Config;
use crate::infrastructure::JsExecutor;
use crate::models::AdRecord;
use crate::services::poster::{PostOutcome, Poster};
use anyhow::{Context, Result};
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

/// Kijiji 发布机器人
///
/// 职责：
/// - 持有 JsExecutor（间接持有 page）
/// - 只处理单条记录的发布
/// - 不认识 Inventory，不关心批处理顺序
pub struct KijijiBot {
    executor: JsExecutor,
    posting_url: String,
}

impl KijijiBot {
    /// 创建新的发布机器人
    pub fn new(executor: JsExecutor, config: &Config) -> Self {
        Self {
            executor,
            posting_url: config.posting_url.clone(),
        }
    }

    /// 导航到发布页面
    async fn open_posting_page(&self) -> Result<()> {
        debug!("正在打开发布页面: {}", self.posting_url);
        self.executor
            .page()
            .goto(self.posting_url.as_str())
            .await
            .with_context(|| format!("无法导航到发布页面: {}", self.posting_url))?;

        // 等待页面脚本就绪
        sleep(Duration::from_millis(800)).await;
        Ok(())
    }

    /// 构建填表并提交的 JS 代码
    ///
    /// 返回固定形状 `{ success, message, ad_url }`，由 eval_as 反序列化
    fn build_submit_script(&self, record: &AdRecord) -> Result<String> {
        let title = serde_json::to_string(&record.title)?;
        let description = serde_json::to_string(&record.description)?;
        let price = serde_json::to_string(record.price.trim())?;
        let tags = serde_json::to_string(&record.tags)?;

        Ok(format!(
            r#"
            (async () => {{
                const setValue = (selector, value) => {{
                    const el = document.querySelector(selector);
                    if (!el) return false;
                    el.value = value;
                    el.dispatchEvent(new Event('input', {{ bubbles: true }}));
                    el.dispatchEvent(new Event('change', {{ bubbles: true }}));
                    return true;
                }};

                try {{
                    if (!setValue('#postad-title', {title})) {{
                        return {{ success: false, message: 'Title field not found on posting page', ad_url: null }};
                    }}
                    setValue('#pstad-descrptn', {description});
                    setValue('#PriceAmount', {price});
                    setValue('#pstad-tagsInput', {tags});

                    const submitButton = document.querySelector('button[name="saveAndCheckout"], #SubmitButton');
                    if (!submitButton) {{
                        return {{ success: false, message: 'Submit button not found on posting page', ad_url: null }};
                    }}
                    submitButton.click();

                    // 轮询等待成功标记出现
                    for (let i = 0; i < 30; i++) {{
                        await new Promise(resolve => setTimeout(resolve, 1000));
                        const posted = document.querySelector('.message--success, #PostAdSuccess');
                        if (posted) {{
                            const link = document.querySelector('#PostedAdUrl, .posted-ad-url a');
                            return {{
                                success: true,
                                message: 'Ad posted successfully',
                                ad_url: link ? link.href : null
                            }};
                        }}
                        const failed = document.querySelector('.message--error, .field-message--error');
                        if (failed) {{
                            return {{ success: false, message: failed.textContent.trim(), ad_url: null }};
                        }}
                    }}
                    return {{ success: false, message: 'Timed out waiting for posting confirmation', ad_url: null }};
                }} catch (error) {{
                    return {{ success: false, message: 'Page script error: ' + error.message, ad_url: null }};
                }}
            }})()
            "#,
        ))
    }
}

impl Poster for KijijiBot {
    async fn post_ad(&self, record: &AdRecord) -> Result<PostOutcome> {
        info!("📤 正在发布广告: {}", record.display_id());

        self.open_posting_page().await?;

        let js_code = self.build_submit_script(record)?;
        let outcome: PostOutcome = self
            .executor
            .eval_as(js_code)
            .await
            .context("发布脚本执行失败")?;

        if outcome.success {
            info!(
                "✓ 广告发布成功: {} ({})",
                record.display_id(),
                outcome.ad_url.as_deref().unwrap_or("URL 不可用")
            );
        } else {
            info!("⚠️ 广告发布失败: {} ({})", record.display_id(), outcome.message);
        }

        Ok(outcome)
    }
}
