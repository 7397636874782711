mod common;

use common::{record_with_status, sample_record};
use kijiji_ad_submit::models::create_sample_inventory;
use kijiji_ad_submit::{load_inventory, save_inventory, AppError, Inventory};

#[test]
fn missing_status_column_is_backfilled_as_pending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.csv");

    // 表头没有 posting_status 列
    std::fs::write(
        &path,
        "bucket_truck_id,image_filename,title,description,price,tags,fuel_type,equipment_type\n\
         BT001,truck1.jpg,2018 Ford Bucket Truck,Excellent condition bucket truck,45000,ford,diesel,bucket truck\n",
    )
    .unwrap();

    let inventory = load_inventory(&path).unwrap();
    assert_eq!(inventory.len(), 1);
    assert_eq!(inventory.get(0).unwrap().posting_status, "pending");
}

#[test]
fn blank_status_cell_is_backfilled_as_pending() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.csv");

    std::fs::write(
        &path,
        "bucket_truck_id,image_filename,title,description,price,tags,fuel_type,equipment_type,posting_status\n\
         BT001,truck1.jpg,2018 Ford Bucket Truck,Excellent condition bucket truck,45000,ford,diesel,bucket truck,   \n\
         BT002,truck2.jpg,2020 Chevy Bucket Truck,Low mileage utility truck,52000,chevy,gasoline,bucket truck,Posted 2024-01-01\n",
    )
    .unwrap();

    let inventory = load_inventory(&path).unwrap();
    assert_eq!(inventory.get(0).unwrap().posting_status, "pending");
    // 已有状态原样保留
    assert_eq!(inventory.get(1).unwrap().posting_status, "Posted 2024-01-01");
}

#[test]
fn extra_columns_survive_a_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.csv");

    // notes 夹在必需列中间，year 在末尾
    std::fs::write(
        &path,
        "bucket_truck_id,notes,image_filename,title,description,price,tags,fuel_type,equipment_type,posting_status,year\n\
         BT001,needs wash,truck1.jpg,2018 Ford Bucket Truck,Excellent condition bucket truck,45000,ford,diesel,bucket truck,pending,2018\n",
    )
    .unwrap();

    let inventory = load_inventory(&path).unwrap();
    assert_eq!(inventory.extra_columns(), &["notes", "year"]);

    let record = inventory.get(0).unwrap();
    assert_eq!(record.extra.len(), 2);
    assert_eq!(record.extra[0], ("notes".to_string(), "needs wash".to_string()));
    assert_eq!(record.extra[1], ("year".to_string(), "2018".to_string()));

    // 保存后列顺序被规范化：必需列在前、透传列在后
    let out = dir.path().join("out.csv");
    save_inventory(&inventory, &out).unwrap();

    let saved = std::fs::read_to_string(&out).unwrap();
    let header = saved.lines().next().unwrap();
    assert_eq!(
        header,
        "bucket_truck_id,image_filename,title,description,price,tags,fuel_type,equipment_type,posting_status,notes,year"
    );

    let reloaded = load_inventory(&out).unwrap();
    let record = reloaded.get(0).unwrap();
    assert_eq!(record.bucket_truck_id, "BT001");
    assert_eq!(record.extra[0].1, "needs wash");
    assert_eq!(record.extra[1].1, "2018");
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deep").join("inventory.csv");

    let inventory = Inventory::from_records(vec![sample_record("BT001")]);
    save_inventory(&inventory, &path).unwrap();

    assert!(path.exists());
    let reloaded = load_inventory(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get(0).unwrap().bucket_truck_id, "BT001");
}

#[test]
fn set_status_respects_row_bounds() {
    let mut inventory = Inventory::from_records(vec![
        record_with_status("BT001", "pending"),
        record_with_status("BT002", "pending"),
    ]);

    assert!(inventory.set_status(1, "Posted 2024-06-01"));
    assert_eq!(inventory.get(1).unwrap().posting_status, "Posted 2024-06-01");
    assert!(!inventory.set_status(2, "Posted 2024-06-01"));
}

#[test]
fn sample_inventory_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.csv");

    create_sample_inventory(&path).unwrap();

    let inventory = load_inventory(&path).unwrap();
    assert_eq!(inventory.len(), 3);
    assert_eq!(inventory.get(0).unwrap().bucket_truck_id, "BT001");
    for record in inventory.records() {
        assert_eq!(record.posting_status, "pending");
    }
}

#[test]
fn loading_a_missing_file_is_a_store_error() {
    let err = load_inventory("/nonexistent/inventory.csv").unwrap_err();
    assert!(err.to_string().contains("inventory.csv"), "{}", err);
    assert!(matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::Store { .. })
    ));
}
