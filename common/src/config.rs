//! クライアント設定

use serde::{Deserialize, Serialize};

pub const DEFAULT_DAYS_FILTER: u32 = 30;

/// APIの接続先など、画面とCLIで共通の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// 空文字なら同一オリジン
    pub base_url: String,
    /// Gmail取得で遡る日数
    pub days_filter: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            days_filter: DEFAULT_DAYS_FILTER,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Gmail再認証ページのURL
    pub fn authenticate_url(&self) -> String {
        format!("{}/authenticate", self.base_url.trim_end_matches('/'))
    }
}
