//! Integration tests for configuration loading and merging.

#![allow(unsafe_code)] // For env var manipulation in tests

use pushbridge::config::NotifierConfig;
use pushbridge::error::NotifyError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_yaml_file_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("pushbridge.yaml");

    fs::write(
        &config_path,
        r#"
app_id: app-123
api_key: key-456
watched_path: /messages/{id}
"#,
    )
    .unwrap();

    let config = NotifierConfig::from_file(&config_path).unwrap();
    assert_eq!(config.app_id, "app-123");
    assert_eq!(config.api_key, "key-456");
    assert_eq!(config.watched_path, "/messages/{id}");
    assert_eq!(config.endpoint, "https://onesignal.com/api/v1/notifications");
    assert_eq!(config.title, "Database Updated");
    assert_eq!(config.body, "There's new content in your app!");
    assert_eq!(config.audience, vec!["All".to_string()]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_toml_file_with_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("pushbridge.toml");

    fs::write(
        &config_path,
        r#"
app_id = "app-123"
api_key = "key-456"
watched_path = "/rooms/{room}"
endpoint = "https://push.internal.example/api/v1/notifications"
title = "Room changed"
body = "Something happened in a room you follow"
audience = ["Subscribed Users"]
"#,
    )
    .unwrap();

    let config = NotifierConfig::from_file(&config_path).unwrap();
    assert_eq!(config.endpoint, "https://push.internal.example/api/v1/notifications");
    assert_eq!(config.title, "Room changed");
    assert_eq!(config.audience, vec!["Subscribed Users".to_string()]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_required_field_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("pushbridge.json");

    fs::write(&config_path, r#"{"app_id": "app-123"}"#).unwrap();

    let result = NotifierConfig::from_file(&config_path);
    assert!(matches!(result, Err(NotifyError::Config(_))));
}

#[test]
fn test_missing_file_is_config_error() {
    let result = NotifierConfig::from_file("/nonexistent/pushbridge.yaml");
    assert!(matches!(result, Err(NotifyError::Config(_))));
}

#[test]
fn test_bad_pattern_loads_but_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("pushbridge.yaml");

    fs::write(
        &config_path,
        r#"
app_id: app-123
api_key: key-456
watched_path: /messages/all
"#,
    )
    .unwrap();

    let config = NotifierConfig::from_file(&config_path).unwrap();
    assert!(matches!(
        config.validate(),
        Err(NotifyError::Pattern { .. })
    ));
}

#[test]
fn test_env_overrides_file_values() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("pushbridge.yaml");

    fs::write(
        &config_path,
        r#"
app_id: app-123
api_key: from-file
watched_path: /messages/{id}
"#,
    )
    .unwrap();

    // Prefix unique to this test so parallel tests cannot collide.
    unsafe {
        std::env::set_var("PBTEST_ENVMERGE_API_KEY", "from-env");
    }
    let config = NotifierConfig::load(Some(&config_path), Some("PBTEST_ENVMERGE")).unwrap();
    unsafe {
        std::env::remove_var("PBTEST_ENVMERGE_API_KEY");
    }

    assert_eq!(config.api_key, "from-env");
    assert_eq!(config.app_id, "app-123");
}

#[test]
fn test_env_only_loading() {
    unsafe {
        std::env::set_var("PBTEST_ENVONLY_APP_ID", "app-env");
        std::env::set_var("PBTEST_ENVONLY_API_KEY", "key-env");
        std::env::set_var("PBTEST_ENVONLY_WATCHED_PATH", "/messages/{id}");
    }
    let config = NotifierConfig::load(None::<&str>, Some("PBTEST_ENVONLY")).unwrap();
    unsafe {
        std::env::remove_var("PBTEST_ENVONLY_APP_ID");
        std::env::remove_var("PBTEST_ENVONLY_API_KEY");
        std::env::remove_var("PBTEST_ENVONLY_WATCHED_PATH");
    }

    assert_eq!(config.app_id, "app-env");
    assert_eq!(config.title, "Database Updated");
    assert!(config.validate().is_ok());
}
