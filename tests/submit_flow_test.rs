mod common;

use common::{images_dir_with, sample_record, BrokenPoster, FailurePoster, SuccessPoster};
use kijiji_ad_submit::{Inventory, SubmitFlow};

#[tokio::test]
async fn successful_post_yields_dated_status() {
    let images = images_dir_with(&["truck1.jpg"]);
    let flow = SubmitFlow::with_images_dir(images.path());
    let poster = SuccessPoster::with_url("https://www.kijiji.ca/v-view-details.html?adId=123");

    let record = sample_record("BT001");
    let result = flow.run(&record, &poster).await;

    assert!(result.success, "{}", result.message);
    let expected = format!("Posted {}", chrono::Local::now().format("%Y-%m-%d"));
    assert_eq!(result.status_update, expected);
    assert_eq!(result.record_id, "BT001");
    // 成功消息要重复广告 URL
    assert!(result.message.contains("adId=123"), "{}", result.message);
    assert_eq!(poster.call_count(), 1);
}

#[tokio::test]
async fn successful_post_without_url_still_succeeds() {
    let images = images_dir_with(&["truck1.jpg"]);
    let flow = SubmitFlow::with_images_dir(images.path());
    let poster = SuccessPoster::default();

    let result = flow.run(&sample_record("BT001"), &poster).await;

    assert!(result.success);
    assert!(result.ad_url.is_none());
    assert!(
        result.message.contains("URL not available"),
        "{}",
        result.message
    );
}

#[tokio::test]
async fn short_failure_message_is_kept_verbatim() {
    let images = images_dir_with(&["truck1.jpg"]);
    let flow = SubmitFlow::with_images_dir(images.path());
    let poster = FailurePoster::with_message("Category selection failed");

    let result = flow.run(&sample_record("BT001"), &poster).await;

    assert!(!result.success);
    assert_eq!(result.status_update, "Error: Category selection failed");
}

#[tokio::test]
async fn long_failure_message_is_truncated_to_100_chars() {
    let images = images_dir_with(&["truck1.jpg"]);
    let flow = SubmitFlow::with_images_dir(images.path());
    let long_message = "x".repeat(150);
    let poster = FailurePoster::with_message(&long_message);

    let result = flow.run(&sample_record("BT001"), &poster).await;

    assert!(!result.success);
    let expected = format!("Error: {}...", "x".repeat(100));
    assert_eq!(result.status_update, expected);
    // 完整原因保留在 message 里
    assert!(result.message.contains(&long_message));
}

#[tokio::test]
async fn transport_failure_is_downgraded_to_system_error() {
    let images = images_dir_with(&["truck1.jpg"]);
    let flow = SubmitFlow::with_images_dir(images.path());

    let result = flow.run(&sample_record("BT001"), &BrokenPoster).await;

    assert!(!result.success);
    // 状态列只留通用错误，细节只进 message
    assert_eq!(result.status_update, "Error: System error");
    assert!(
        result.message.contains("browser connection lost"),
        "{}",
        result.message
    );
}

#[tokio::test]
async fn invalid_record_never_reaches_the_poster() {
    let images = images_dir_with(&["truck1.jpg"]);
    let flow = SubmitFlow::with_images_dir(images.path());
    let poster = SuccessPoster::default();

    let mut record = sample_record("BT001");
    record.title = "Bad".to_string();

    let result = flow.run(&record, &poster).await;

    assert!(!result.success);
    assert!(result.status_update.starts_with("Error: "));
    assert!(
        result.status_update.contains("Title must be at least 5"),
        "{}",
        result.status_update
    );
    assert_eq!(poster.call_count(), 0, "校验失败不应该调用发布器");
}

#[tokio::test]
async fn missing_image_never_reaches_the_poster() {
    // 图片目录里没有 truck1.jpg
    let images = images_dir_with(&[]);
    let flow = SubmitFlow::with_images_dir(images.path());
    let poster = SuccessPoster::default();

    let result = flow.run(&sample_record("BT001"), &poster).await;

    assert!(!result.success);
    assert_eq!(result.status_update, "Error: Image not found");
    assert_eq!(poster.call_count(), 0, "图片缺失不应该调用发布器");
}

#[tokio::test]
async fn run_with_store_writes_status_back() {
    let images = images_dir_with(&["truck1.jpg"]);
    let flow = SubmitFlow::with_images_dir(images.path());
    let poster = SuccessPoster::default();

    let mut inventory = Inventory::from_records(vec![sample_record("BT001")]);
    let result = flow.run_with_store(&mut inventory, 0, &poster).await;

    assert!(result.success);
    assert_eq!(
        inventory.get(0).unwrap().posting_status,
        result.status_update
    );
}

#[tokio::test]
async fn run_with_store_out_of_range_is_a_synthetic_failure() {
    let images = images_dir_with(&["truck1.jpg"]);
    let flow = SubmitFlow::with_images_dir(images.path());
    let poster = SuccessPoster::default();

    let mut inventory = Inventory::from_records(vec![sample_record("BT001")]);
    let result = flow.run_with_store(&mut inventory, 9, &poster).await;

    assert!(!result.success);
    assert_eq!(result.status_update, "Error: System error");
    assert_eq!(result.record_id, "Index-9");
    assert_eq!(poster.call_count(), 0);
    // 原记录不受影响
    assert_eq!(inventory.get(0).unwrap().posting_status, "pending");
}
