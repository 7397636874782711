//! 图片解析服务 - 业务能力层
//!
//! 只负责"把记录里的图片文件名解析成真实路径"这一能力：
//! - 不读取图片内容
//! - 不认识发布流程
//! - 文件缺失时返回 `AppError::AssetNotFound`

use crate::error::{AppError, AppResult};
use crate::models::AdRecord;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 图片解析服务
pub struct AssetResolver {
    images_dir: PathBuf,
}

impl AssetResolver {
    /// 创建新的图片解析服务
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    /// 解析记录引用的图片文件路径并确认其存在
    ///
    /// # 返回
    /// 图片的完整路径；文件名为空或文件不存在时返回错误
    pub fn resolve(&self, record: &AdRecord) -> AppResult<PathBuf> {
        let filename = record.image_filename.trim();
        if filename.is_empty() {
            return Err(AppError::AssetMissing);
        }

        let image_path = self.images_dir.join(filename);
        if !image_path.exists() || !image_path.is_file() {
            return Err(AppError::AssetNotFound {
                path: image_path.display().to_string(),
            });
        }

        debug!("图片已找到: {}", image_path.display());
        Ok(image_path)
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }
}
