use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAiError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("入力エラー: {0}")]
    Input(String),

    #[error("プロジェクトが見つかりません: {0}")]
    ProjectNotFound(String),

    #[error("サーバーが処理を拒否しました: {0}")]
    Rejected(String),

    #[error("API呼び出しエラー: {0}")]
    Api(#[from] resume_ai_common::Error),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, ResumeAiError>;
