//! 库存表加载器
//!
//! 负责库存 CSV 文件的读写：
//! - 加载时补齐缺失的必需列（状态列默认 "pending"）
//! - 保存时把列顺序规范化为"必需列在前、透传列在后"
//! - 不认识发布流程，只提供记录存储能力

use crate::error::AppError;
use crate::models::record::AdRecord;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// 库存表的必需列（持久化顺序）
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "bucket_truck_id",
    "image_filename",
    "title",
    "description",
    "price",
    "tags",
    "fuel_type",
    "equipment_type",
    "posting_status",
];

/// 库存表（记录存储）
///
/// 有序的记录集合，行顺序即持久化顺序。
/// 批处理过程中只有状态列会被原地修改。
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    records: Vec<AdRecord>,
    extra_columns: Vec<String>,
}

impl Inventory {
    /// 从记录列表构造（透传列按首次出现的顺序收集）
    pub fn from_records(records: Vec<AdRecord>) -> Self {
        let mut extra_columns: Vec<String> = Vec::new();
        for record in &records {
            for (name, _) in &record.extra {
                if !extra_columns.contains(name) {
                    extra_columns.push(name.clone());
                }
            }
        }
        Self {
            records,
            extra_columns,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AdRecord> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[AdRecord] {
        &self.records
    }

    /// 更新指定行的状态列
    ///
    /// 行号越界返回 false，由调用方决定是否记录日志。
    pub fn set_status(&mut self, index: usize, status: &str) -> bool {
        match self.records.get_mut(index) {
            Some(record) => {
                record.posting_status = status.to_string();
                true
            }
            None => false,
        }
    }

    /// 透传列名（按首次出现顺序）
    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }
}

/// 从 CSV 文件加载库存表并补齐缺失列
pub fn load_inventory(path: impl AsRef<Path>) -> Result<Inventory> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| AppError::store(path.display().to_string(), e))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("无法解析库存文件表头: {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    // 透传列 = 表头中必需列以外的列，顺序保持不变
    let extra_columns: Vec<String> = headers
        .iter()
        .filter(|h| !REQUIRED_COLUMNS.contains(&h.as_str()))
        .cloned()
        .collect();

    let column_index = |name: &str| headers.iter().position(|h| h == name);

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.with_context(|| format!("无法解析库存文件行: {}", path.display()))?;
        let field = |name: &str| {
            column_index(name)
                .and_then(|i| row.get(i))
                .unwrap_or("")
                .to_string()
        };

        let mut posting_status = field("posting_status");
        if posting_status.trim().is_empty() {
            // 缺失或空白的状态列在加载时回填为 "pending"
            posting_status = "pending".to_string();
        }

        let extra = extra_columns
            .iter()
            .map(|name| (name.clone(), field(name)))
            .collect();

        records.push(AdRecord {
            bucket_truck_id: field("bucket_truck_id"),
            image_filename: field("image_filename"),
            title: field("title"),
            description: field("description"),
            price: field("price"),
            tags: field("tags"),
            fuel_type: field("fuel_type"),
            equipment_type: field("equipment_type"),
            posting_status,
            extra,
        });
    }

    info!("✓ 已加载库存文件: {} ({} 条记录)", path.display(), records.len());

    Ok(Inventory {
        records,
        extra_columns,
    })
}

/// 把库存表保存到 CSV 文件（必需列在前，透传列在后）
pub fn save_inventory(inventory: &Inventory, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建目录: {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::store(path.display().to_string(), e))?;

    let header: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .chain(inventory.extra_columns.iter().map(|s| s.as_str()))
        .collect();
    writer
        .write_record(&header)
        .with_context(|| format!("无法写入库存文件表头: {}", path.display()))?;

    for record in &inventory.records {
        let mut row: Vec<&str> = vec![
            &record.bucket_truck_id,
            &record.image_filename,
            &record.title,
            &record.description,
            &record.price,
            &record.tags,
            &record.fuel_type,
            &record.equipment_type,
            &record.posting_status,
        ];
        for name in &inventory.extra_columns {
            let value = record
                .extra
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
                .unwrap_or("");
            row.push(value);
        }
        writer
            .write_record(&row)
            .with_context(|| format!("无法写入库存文件: {}", path.display()))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::store(path.display().to_string(), e))?;

    info!("💾 库存已保存至: {}", path.display());
    Ok(())
}

/// 生成一份示例库存文件（用于演示和本地验证）
pub fn create_sample_inventory(path: impl AsRef<Path>) -> Result<()> {
    let records = vec![
        AdRecord {
            bucket_truck_id: "BT001".to_string(),
            image_filename: "truck1.jpg".to_string(),
            title: "2018 Ford Bucket Truck".to_string(),
            description: "Excellent condition bucket truck with 45ft reach".to_string(),
            price: "45000".to_string(),
            tags: "ford,bucket,utility".to_string(),
            fuel_type: "Diesel".to_string(),
            equipment_type: "Bucket Truck".to_string(),
            posting_status: "pending".to_string(),
            extra: Vec::new(),
        },
        AdRecord {
            bucket_truck_id: "BT002".to_string(),
            image_filename: "truck2.jpg".to_string(),
            title: "2020 Chevrolet Bucket Truck".to_string(),
            description: "Low mileage bucket truck, perfect for utility work".to_string(),
            price: "52000".to_string(),
            tags: "chevrolet,bucket,utility".to_string(),
            fuel_type: "Gasoline".to_string(),
            equipment_type: "Bucket Truck".to_string(),
            posting_status: "pending".to_string(),
            extra: Vec::new(),
        },
        AdRecord {
            bucket_truck_id: "BT003".to_string(),
            image_filename: "truck3.jpg".to_string(),
            title: "2019 GMC Bucket Truck".to_string(),
            description: "Well-maintained bucket truck with recent service".to_string(),
            price: "48000".to_string(),
            tags: "gmc,bucket,utility".to_string(),
            fuel_type: "Diesel".to_string(),
            equipment_type: "Bucket Truck".to_string(),
            posting_status: "pending".to_string(),
            extra: Vec::new(),
        },
    ];

    let inventory = Inventory::from_records(records);
    save_inventory(&inventory, path)
}
