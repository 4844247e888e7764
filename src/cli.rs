use clap::{Parser, Subcommand};
use resume_ai_common::EmailKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-ai")]
#[command(about = "AI履歴書スクリーニング・クライアント", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 確認プロンプトを省略
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,
}

/// 求人票の指定（どちらもなければ前回の値）
#[derive(clap::Args, Clone, Debug, Default)]
pub struct JobDescriptionArgs {
    /// 求人票テキスト
    #[arg(long = "jd")]
    pub text: Option<String>,

    /// 求人票ファイル
    #[arg(long = "jd-file", conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 採用プロジェクトの管理
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// 履歴書をアップロードして解析
    Upload {
        /// 履歴書ファイル（PDF）
        #[arg(required = true)]
        file: PathBuf,

        #[command(flatten)]
        job_description: JobDescriptionArgs,

        /// 保存先プロジェクトID
        #[arg(short, long)]
        project: Option<String>,

        /// 各候補者の詳細も表示
        #[arg(short, long)]
        detail: bool,
    },

    /// Gmailから履歴書を取得して解析
    Gmail {
        /// 職種
        #[arg(short, long, default_value = "")]
        role: String,

        #[command(flatten)]
        job_description: JobDescriptionArgs,

        /// 保存先プロジェクトID
        #[arg(short, long)]
        project: Option<String>,

        /// 遡る日数（省略時は設定値）
        #[arg(long)]
        days: Option<u32>,
    },

    /// 候補者に合否メールを送信
    Email {
        /// プロジェクトID
        #[arg(required = true)]
        project_id: String,

        /// 履歴書ID
        #[arg(required = true)]
        resume_id: String,

        /// メールの種類 (accept/reject)
        #[arg(short, long)]
        kind: MailKind,

        #[command(flatten)]
        job_description: JobDescriptionArgs,
    },

    /// アシスタントに質問（メッセージ省略で対話モード）
    Chat {
        message: Option<String>,
    },

    /// 設定を表示/編集
    Config {
        /// APIの接続先を設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// Gmail取得で遡る日数を設定
        #[arg(long)]
        set_days: Option<u32>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// 一覧を表示
    List,

    /// 新規作成
    Create {
        /// タイトル（省略時は "New Recruitment"）
        #[arg(default_value = "")]
        title: String,

        /// 説明（求人票）
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// 保存済みの評価を表示
    Show {
        #[arg(required = true)]
        id: String,

        /// 各候補者の詳細も表示
        #[arg(short, long)]
        detail: bool,
    },

    /// 履歴書を削除
    DeleteResume {
        #[arg(required = true)]
        project_id: String,

        #[arg(required = true)]
        resume_id: String,
    },
}

#[derive(Clone, Copy, Debug)]
pub enum MailKind {
    Accept,
    Reject,
}

impl std::str::FromStr for MailKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accept" | "a" => Ok(MailKind::Accept),
            "reject" | "r" => Ok(MailKind::Reject),
            _ => Err(format!("Unknown kind: {}. Use accept or reject", s)),
        }
    }
}

impl From<MailKind> for EmailKind {
    fn from(kind: MailKind) -> Self {
        match kind {
            MailKind::Accept => EmailKind::Accept,
            MailKind::Reject => EmailKind::Reject,
        }
    }
}
