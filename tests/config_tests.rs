//! Configuration loading tests
//!
//! Run with: cargo test --test config_tests

use schoolgate::config::loader::{default_config_content, load_config_from_path};
use schoolgate::config::{save_config, Config};
use schoolgate::error::Error;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_without_file_sections() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.backend.base_url, "http://localhost:8080");
    assert_eq!(config.cookies.access_token, "accessToken");
    assert_eq!(config.cookies.role, "userRole");
    assert_eq!(config.cookies.client_id, "schoolgateClient");
    assert_eq!(config.session.idle_minutes, 30);
    assert_eq!(config.bind_address(), "0.0.0.0:3000");
}

#[test]
fn test_load_from_path_with_env_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schoolgate.toml");
    fs::write(
        &path,
        r#"
[backend]
base_url = "${SCHOOLGATE_TEST_UNSET_URL:-http://api.school.test}"

[cookies]
role = "role"
"#,
    )
    .unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.backend.base_url, "http://api.school.test");
    assert_eq!(config.cookies.role, "role");
    assert_eq!(config.cookies.access_token, "accessToken");
}

#[test]
fn test_default_file_round_trips_through_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schoolgate.toml");
    fs::write(&path, default_config_content()).unwrap();

    let mut config = load_config_from_path(&path).unwrap();
    config.server.port = 4100;
    save_config(&config, &path).unwrap();

    let reloaded = load_config_from_path(&path).unwrap();
    assert_eq!(reloaded.server.port, 4100);
    assert_eq!(reloaded.cookies, config.cookies);
}

#[test]
fn test_missing_file_is_config_not_found() {
    let dir = TempDir::new().unwrap();
    let result = load_config_from_path(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::ConfigNotFound)));
}

#[test]
fn test_invalid_toml_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schoolgate.toml");
    fs::write(&path, "this is [ not valid toml").unwrap();

    let err = load_config_from_path(&path).unwrap_err();
    assert!(matches!(err, Error::TomlParse(_)));
    assert!(err.to_string().contains("TOML"));
}
