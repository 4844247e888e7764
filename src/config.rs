use crate::error::{ResumeAiError, Result};
use resume_ai_common::config::DEFAULT_DAYS_FILTER;
use resume_ai_common::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const BASE_URL_ENV: &str = "RESUME_AI_BASE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub days_filter: u32,
    pub timeout_seconds: u64,
    /// 前回使った求人票（--jd 省略時に使う）
    pub job_description: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            days_filter: DEFAULT_DAYS_FILTER,
            timeout_seconds: 300, // AI解析は時間がかかる
            job_description: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ResumeAiError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("resume-ai").join("config.json"))
    }

    /// 接続先（環境変数を優先）
    pub fn base_url(&self) -> String {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.base_url.clone(),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url(),
            days_filter: self.days_filter,
        }
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ResumeAiError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        self.base_url = url;
        Ok(())
    }

    pub fn set_days_filter(&mut self, days: u32) -> Result<()> {
        if days == 0 {
            return Err(ResumeAiError::Config("日数は1以上を指定してください".into()));
        }
        self.days_filter = days;
        Ok(())
    }
}
