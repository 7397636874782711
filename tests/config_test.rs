use kijiji_ad_submit::{AppError, Config};

#[test]
fn from_file_overrides_listed_fields_and_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    std::fs::write(
        &path,
        r#"
inventory_file = "trucks.csv"
batch_mode = "all"
browser_debug_port = 9333
"#,
    )
    .unwrap();

    let config = Config::from_file(path.to_str().unwrap()).unwrap();

    assert_eq!(config.inventory_file, "trucks.csv");
    assert_eq!(config.batch_mode, "all");
    assert_eq!(config.browser_debug_port, 9333);
    // 未列出的字段保持默认值
    let default = Config::default();
    assert_eq!(config.images_dir, default.images_dir);
    assert_eq!(config.posting_url, default.posting_url);
    assert_eq!(config.output_log_file, default.output_log_file);
}

#[test]
fn from_file_reports_the_missing_path() {
    let err = Config::from_file("/nonexistent/config.toml").unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
    assert!(err.to_string().contains("/nonexistent/config.toml"), "{}", err);
}

#[test]
fn from_file_rejects_malformed_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "inventory_file = [not toml").unwrap();

    let err = Config::from_file(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
}
