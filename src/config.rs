use crate::error::{AppError, AppResult};
use serde::Deserialize;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 库存表文件路径
    pub inventory_file: String,
    /// 图片目录
    pub images_dir: String,
    /// 批处理模式（"new" 或 "all"）
    pub batch_mode: String,
    /// 浏览器调试端口
    pub browser_debug_port: u16,
    /// 发布页面 URL
    pub posting_url: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inventory_file: "inventory.csv".to_string(),
            images_dir: "assets/images".to_string(),
            batch_mode: "new".to_string(),
            browser_debug_port: 9222,
            posting_url: "https://www.kijiji.ca/p-post-ad.html".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

/// TOML 配置文件中的可选覆盖项
#[derive(Debug, Default, Deserialize)]
struct ConfigOverlay {
    inventory_file: Option<String>,
    images_dir: Option<String>,
    batch_mode: Option<String>,
    browser_debug_port: Option<u16>,
    posting_url: Option<String>,
    verbose_logging: Option<bool>,
    output_log_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            inventory_file: std::env::var("INVENTORY_FILE").unwrap_or(default.inventory_file),
            images_dir: std::env::var("IMAGES_DIR").unwrap_or(default.images_dir),
            batch_mode: std::env::var("BATCH_MODE").unwrap_or(default.batch_mode),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.browser_debug_port),
            posting_url: std::env::var("POSTING_URL").unwrap_or(default.posting_url),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 从 TOML 文件加载配置（缺失项使用默认值）
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("无法读取配置文件 {}: {}", path, e)))?;
        let overlay: ConfigOverlay = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("无法解析配置文件 {}: {}", path, e)))?;

        let default = Self::default();
        Ok(Self {
            inventory_file: overlay.inventory_file.unwrap_or(default.inventory_file),
            images_dir: overlay.images_dir.unwrap_or(default.images_dir),
            batch_mode: overlay.batch_mode.unwrap_or(default.batch_mode),
            browser_debug_port: overlay.browser_debug_port.unwrap_or(default.browser_debug_port),
            posting_url: overlay.posting_url.unwrap_or(default.posting_url),
            verbose_logging: overlay.verbose_logging.unwrap_or(default.verbose_logging),
            output_log_file: overlay.output_log_file.unwrap_or(default.output_log_file),
        })
    }
}
