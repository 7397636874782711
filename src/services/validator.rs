//! 记录校验服务 - 业务能力层
//!
//! ## 职责
//!
//! 对单条库存记录做字段校验，纯函数、无副作用：
//!
//! 1. **必填检查**：必需字段不能缺失或为空（状态列不参与校验，
//!    空状态由加载器回填、由批处理的行选择解释）
//! 2. **价格检查**：必须是数字、大于 0、不超过上限
//! 3. **格式检查**：标识符字符集、图片扩展名、标题/描述长度
//! 4. **枚举检查**：燃料类型和设备类型必须在固定枚举内（不区分大小写）
//! 5. **标签检查**：逗号分隔的每个标签 2-50 字符、受限字符集；无标签合法
//!
//! 所有违规一次性收集，用 "; " 拼成一条消息返回，不短路。

use crate::models::AdRecord;
use phf::phf_set;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// 价格上限（超出视为异常值直接拒绝）
pub const MAX_PRICE: f64 = 1_000_000.0;

/// 合法的图片扩展名
static VALID_IMAGE_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    "jpg", "jpeg", "png", "gif", "bmp", "webp",
};

/// 合法的燃料类型
static VALID_FUEL_TYPES: phf::Set<&'static str> = phf_set! {
    "diesel", "gasoline", "gas", "electric", "hybrid", "propane", "cng",
};

/// 合法的设备类型
static VALID_EQUIPMENT_TYPES: phf::Set<&'static str> = phf_set! {
    "bucket truck", "utility truck", "crane truck", "service truck", "aerial lift",
};

// 错误消息里的枚举列表需要稳定顺序，不能直接迭代 phf 集合
const FUEL_TYPES_HINT: &str = "diesel, gasoline, gas, electric, hybrid, propane, cng";
const EQUIPMENT_TYPES_HINT: &str =
    "bucket truck, utility truck, crane truck, service truck, aerial lift";
const IMAGE_EXTENSIONS_HINT: &str = "jpg, jpeg, png, gif, bmp, webp";

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("内置正则"));
static INVALID_PATH_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("内置正则"));
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9\s_-]+$").expect("内置正则"));

/// 校验一条库存记录
///
/// # 返回
/// `(true, "")` 表示合法；`(false, reason)` 时 reason 包含全部违规项
pub fn validate_record(record: &AdRecord) -> (bool, String) {
    let mut errors: Vec<String> = Vec::new();

    // ========== 必填检查 ==========
    let required = [
        ("bucket_truck_id", &record.bucket_truck_id),
        ("image_filename", &record.image_filename),
        ("title", &record.title),
        ("description", &record.description),
        ("price", &record.price),
    ];
    for (name, value) in required {
        if value.trim().is_empty() {
            errors.push(format!("Field '{}' cannot be empty", name));
        }
    }

    // ========== 价格检查 ==========
    let price_raw = record.price.trim();
    if !price_raw.is_empty() {
        match price_raw.parse::<f64>() {
            Ok(price) if !price.is_finite() => {
                errors.push("Price must be a valid number".to_string());
            }
            Ok(price) if price <= 0.0 => {
                errors.push("Price must be greater than 0".to_string());
            }
            Ok(price) if price > MAX_PRICE => {
                errors.push("Price seems unreasonably high (over $1,000,000)".to_string());
            }
            Ok(_) => {}
            Err(_) => errors.push("Price must be a valid number".to_string()),
        }
    }

    // ========== 标识符检查 ==========
    let truck_id = record.bucket_truck_id.trim();
    if !truck_id.is_empty() && !ID_PATTERN.is_match(truck_id) {
        errors.push(
            "bucket_truck_id must contain only letters, numbers, underscore, or dash".to_string(),
        );
    }

    // ========== 图片文件名检查 ==========
    let image_filename = record.image_filename.trim();
    if !image_filename.is_empty() {
        let extension = Path::new(image_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if !VALID_IMAGE_EXTENSIONS.contains(extension.as_str()) {
            errors.push(format!(
                "Invalid image file extension: .{}. Must be one of: {}",
                extension, IMAGE_EXTENSIONS_HINT
            ));
        }
        if INVALID_PATH_CHARS.is_match(image_filename) {
            errors.push("image_filename contains invalid characters".to_string());
        }
    }

    // ========== 长度检查 ==========
    let title_len = record.title.trim().chars().count();
    if title_len > 0 {
        if title_len < 5 {
            errors.push("Title must be at least 5 characters long".to_string());
        } else if title_len > 200 {
            errors.push("Title must be 200 characters or less".to_string());
        }
    }

    let description_len = record.description.trim().chars().count();
    if description_len > 0 {
        if description_len < 10 {
            errors.push("Description must be at least 10 characters long".to_string());
        } else if description_len > 5000 {
            errors.push("Description must be 5000 characters or less".to_string());
        }
    }

    // ========== 枚举检查 ==========
    let fuel_type = record.fuel_type.trim().to_lowercase();
    if fuel_type.is_empty() {
        errors.push("Field 'fuel_type' cannot be empty".to_string());
    } else if !VALID_FUEL_TYPES.contains(fuel_type.as_str()) {
        errors.push(format!(
            "Invalid fuel_type: {}. Must be one of: {}",
            fuel_type, FUEL_TYPES_HINT
        ));
    }

    let equipment_type = record.equipment_type.trim().to_lowercase();
    if equipment_type.is_empty() {
        errors.push("Field 'equipment_type' cannot be empty".to_string());
    } else if !VALID_EQUIPMENT_TYPES.contains(equipment_type.as_str()) {
        errors.push(format!(
            "Invalid equipment_type: {}. Must be one of: {}",
            equipment_type, EQUIPMENT_TYPES_HINT
        ));
    }

    // ========== 标签检查（无标签合法） ==========
    let tags = record.tags.trim();
    if !tags.is_empty() {
        for tag in tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let tag_len = tag.chars().count();
            if tag_len < 2 {
                errors.push(format!("Tag '{}' is too short (minimum 2 characters)", tag));
            } else if tag_len > 50 {
                errors.push(format!("Tag '{}' is too long (maximum 50 characters)", tag));
            } else if !TAG_PATTERN.is_match(tag) {
                errors.push(format!("Tag '{}' contains invalid characters", tag));
            }
        }
    }

    if errors.is_empty() {
        (true, String::new())
    } else {
        (false, errors.join("; "))
    }
}
