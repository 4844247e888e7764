//! 設定ファイルテスト

use resume_ai::config::Config;
use resume_ai_common::config::DEFAULT_DAYS_FILTER;
use tempfile::tempdir;

/// ファイルがなければ既定値
#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.days_filter, DEFAULT_DAYS_FILTER);
    assert!(config.job_description.is_none());
}

/// 保存と読み込み（親ディレクトリも作る）
#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("resume-ai").join("config.json");

    let mut config = Config::default();
    config.set_base_url("https://screening.example.com/".into()).unwrap();
    config.set_days_filter(7).unwrap();
    config.job_description = Some("Senior Rust engineer".into());
    config.save_to(&path).expect("設定保存失敗");

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.base_url, "https://screening.example.com");
    assert_eq!(loaded.days_filter, 7);
}

/// 一部のキーだけの設定ファイル
#[test]
fn test_partial_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"days_filter": 14}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.days_filter, 14);
    assert_eq!(config.base_url, Config::default().base_url);
    assert_eq!(config.timeout_seconds, Config::default().timeout_seconds);
}

/// 不正な値は設定しない
#[test]
fn test_invalid_values_rejected() {
    let mut config = Config::default();
    assert!(config.set_base_url("localhost:5000".into()).is_err());
    assert!(config.set_days_filter(0).is_err());
    assert_eq!(config, Config::default());
}

/// 画面と共通のクライアント設定へ変換
#[test]
fn test_client_config() {
    let mut config = Config::default();
    config.set_days_filter(10).unwrap();
    let client = config.client_config();
    assert_eq!(client.days_filter, 10);
    assert!(client.authenticate_url().ends_with("/authenticate"));
}
