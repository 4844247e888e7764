//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 画面側ではこの分類ごとにモーダルの種類を切り替える。
#[derive(Error, Debug)]
pub enum Error {
    /// 入力不足（リクエストは送信しない）
    #[error("{0}")]
    Validation(String),

    /// サーバーが非成功ステータスを返した
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// リクエストが完了しなかった
    #[error("Network error: {0}")]
    Network(String),

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// サーバーのメッセージ、なければ代替文言
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Error::Api { message, .. } if !message.trim().is_empty() => message.clone(),
            Error::Api { .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_validation() {
        let error = Error::Validation("Please enter a job description to continue.".to_string());
        assert_eq!(format!("{}", error), "Please enter a job description to continue.");
    }

    #[test]
    fn test_error_display_api() {
        let error = Error::Api {
            status: 404,
            message: "Project not found".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("404"));
        assert!(display.contains("Project not found"));
    }

    #[test]
    fn test_error_display_network() {
        let error = Error::Network("Failed to fetch".to_string());
        assert_eq!(format!("{}", error), "Network error: Failed to fetch");
        assert!(error.is_network());
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Decode(_)));
        assert!(format!("{}", error).contains("Decode error"));
    }

    #[test]
    fn test_message_or() {
        let with_message = Error::Api {
            status: 500,
            message: "Failed to generate AI profile.".to_string(),
        };
        assert_eq!(with_message.message_or("fallback"), "Failed to generate AI profile.");

        let without_message = Error::Api {
            status: 500,
            message: "  ".to_string(),
        };
        assert_eq!(without_message.message_or("fallback"), "fallback");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Storage("quota exceeded".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Storage"));
        assert!(debug.contains("quota exceeded"));
    }
}
