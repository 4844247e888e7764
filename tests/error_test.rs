//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use resume_ai::client::read_resume;
use resume_ai::config::Config;
use resume_ai::error::ResumeAiError;
use std::path::Path;
use tempfile::tempdir;

/// 存在しない履歴書ファイル
#[test]
fn test_read_missing_resume() {
    let result = read_resume(Path::new("/nonexistent/path/resume.pdf"));
    assert!(matches!(result, Err(ResumeAiError::FileNotFound(_))));
}

/// ディレクトリは履歴書として読まない
#[test]
fn test_read_directory_as_resume() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = read_resume(dir.path());
    assert!(matches!(result, Err(ResumeAiError::FileNotFound(_))));
}

/// 拡張子からContent-Typeを決める
#[test]
fn test_read_resume_content_type() {
    let dir = tempdir().expect("Failed to create temp dir");
    let pdf = dir.path().join("jane.PDF");
    std::fs::write(&pdf, b"%PDF-1.4").unwrap();
    let other = dir.path().join("notes.bin");
    std::fs::write(&other, b"\x00\x01").unwrap();

    let file = read_resume(&pdf).unwrap();
    assert_eq!(file.file_name, "jane.PDF");
    assert_eq!(file.content_type, "application/pdf");
    assert_eq!(file.bytes, b"%PDF-1.4");

    // 不明な拡張子は汎用バイナリ
    let file = read_resume(&other).unwrap();
    assert_eq!(file.content_type, "application/octet-stream");
}

/// 壊れた設定ファイル
#[test]
fn test_corrupted_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ invalid").unwrap();

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ResumeAiError::JsonParse(_))));
}

/// ResumeAiErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        ResumeAiError::Config("テスト設定エラー".to_string()),
        ResumeAiError::FileNotFound("resume.pdf".to_string()),
        ResumeAiError::Input("求人票がありません".to_string()),
        ResumeAiError::ProjectNotFound("p1".to_string()),
        ResumeAiError::Rejected("Gmail is not authorized.".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// エラーのDebug実装確認
#[test]
fn test_error_debug() {
    let err = ResumeAiError::Config("テスト".to_string());
    let debug = format!("{:?}", err);

    assert!(debug.contains("Config"));
    assert!(debug.contains("テスト"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: ResumeAiError = io_err.into();

    assert!(matches!(err, ResumeAiError::Io(_)));
    let display = format!("{}", err);
    assert!(display.contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: ResumeAiError = json_err.into();

    assert!(matches!(err, ResumeAiError::JsonParse(_)));
}

/// common::Errorからの変換（サーバーのメッセージが残る）
#[test]
fn test_common_error_conversion() {
    let common_err = resume_ai_common::Error::Api {
        status: 500,
        message: "analysis failed".to_string(),
    };
    let err: ResumeAiError = common_err.into();

    assert!(matches!(err, ResumeAiError::Api(_)));
    let display = format!("{}", err);
    assert!(display.contains("analysis failed"));
    assert!(display.contains("500"));
}
