use serde::{Deserialize, Serialize};

/// 库存记录（一条待发布的广告）
///
/// 字段与库存表的列一一对应；`price` 保留原始字符串，
/// 由校验器负责解析（空串、非数字、超出上限都在那里报告）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdRecord {
    pub bucket_truck_id: String,
    pub image_filename: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub tags: String,
    pub fuel_type: String,
    pub equipment_type: String,
    pub posting_status: String,

    /// 透传列（列名, 值），保存时排在必需列之后
    #[serde(skip)]
    pub extra: Vec<(String, String)>,
}

impl Default for AdRecord {
    fn default() -> Self {
        Self {
            bucket_truck_id: String::new(),
            image_filename: String::new(),
            title: String::new(),
            description: String::new(),
            price: String::new(),
            tags: String::new(),
            fuel_type: String::new(),
            equipment_type: String::new(),
            posting_status: "pending".to_string(),
            extra: Vec::new(),
        }
    }
}

impl AdRecord {
    /// 判断该记录在 "new" 模式下是否需要处理
    ///
    /// 规则：状态为空、恰好是 "pending"、或以 "Error" 开头（区分大小写）
    pub fn needs_posting(&self) -> bool {
        let status = self.posting_status.trim();
        status.is_empty() || status == "pending" || status.starts_with("Error")
    }

    /// 用于日志显示的记录标识
    pub fn display_id(&self) -> &str {
        if self.bucket_truck_id.trim().is_empty() {
            "Unknown"
        } else {
            &self.bucket_truck_id
        }
    }
}
