//! 应用程序错误类型
//!
//! ## 错误分类
//!
//! 1. **AssetNotFound / AssetMissing**：引用的图片文件不存在或文件名为空
//! 2. **Store**：库存文件读写失败
//! 3. **Config**：配置解析失败
//!
//! 校验失败和发布器的结构化失败不是错误：前者以 `(bool, String)`
//! 形式返回，后者是 `PostOutcome`，两者都在提交流程内部转成状态字符串。
//! 行级错误永远不会越过提交流程的边界；只有批次级别的致命错误
//! 才会以失败的 BatchResult 形式返回给调用方。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 图片文件不存在
    #[error("Image file not found: {path}")]
    AssetNotFound { path: String },

    /// 图片文件名为空
    #[error("image_filename is missing or empty")]
    AssetMissing,

    /// 库存文件读写失败
    #[error("Inventory file error ({path}): {source}")]
    Store {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 配置错误
    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    /// 创建库存文件错误
    pub fn store(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Store {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
