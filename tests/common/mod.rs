//! 测试公用设施：Mock 发布器与样例数据
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use kijiji_ad_submit::{AdRecord, Inventory, PostOutcome, Poster};
use std::sync::atomic::{AtomicUsize, Ordering};

/// 总是成功的发布器
#[derive(Default)]
pub struct SuccessPoster {
    pub calls: AtomicUsize,
    pub ad_url: Option<String>,
}

impl SuccessPoster {
    pub fn with_url(url: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            ad_url: Some(url.to_string()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Poster for SuccessPoster {
    async fn post_ad(&self, _record: &AdRecord) -> Result<PostOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PostOutcome {
            success: true,
            message: "Ad posted successfully".to_string(),
            ad_url: self.ad_url.clone(),
        })
    }
}

/// 总是返回结构化失败的发布器
pub struct FailurePoster {
    pub message: String,
}

impl FailurePoster {
    pub fn with_message(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Poster for FailurePoster {
    async fn post_ad(&self, _record: &AdRecord) -> Result<PostOutcome> {
        Ok(PostOutcome {
            success: false,
            message: self.message.clone(),
            ad_url: None,
        })
    }
}

/// 模拟传输层故障的发布器（直接返回 Err）
pub struct BrokenPoster;

impl Poster for BrokenPoster {
    async fn post_ad(&self, _record: &AdRecord) -> Result<PostOutcome> {
        Err(anyhow!("browser connection lost"))
    }
}

/// 构造一条通过全部校验规则的样例记录
pub fn sample_record(id: &str) -> AdRecord {
    AdRecord {
        bucket_truck_id: id.to_string(),
        image_filename: "truck1.jpg".to_string(),
        title: "2018 Ford Bucket Truck".to_string(),
        description: "Excellent condition bucket truck with 45ft reach".to_string(),
        price: "45000".to_string(),
        tags: "ford,bucket,utility".to_string(),
        fuel_type: "diesel".to_string(),
        equipment_type: "bucket truck".to_string(),
        posting_status: "pending".to_string(),
        extra: Vec::new(),
    }
}

/// 构造指定状态的样例记录
pub fn record_with_status(id: &str, status: &str) -> AdRecord {
    let mut record = sample_record(id);
    record.posting_status = status.to_string();
    record
}

/// 从状态列表构造库存表
pub fn inventory_with_statuses(statuses: &[&str]) -> Inventory {
    let records = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| record_with_status(&format!("BT{:03}", i + 1), status))
        .collect();
    Inventory::from_records(records)
}

/// 创建临时图片目录并放入指定文件
pub fn images_dir_with(files: &[&str]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("创建临时目录失败");
    for file in files {
        std::fs::write(dir.path().join(file), b"fake image bytes").expect("写入测试图片失败");
    }
    dir
}
