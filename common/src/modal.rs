//! モーダル管理
//!
//! 同時に表示するモーダルは1つだけ。確認モーダルの結果はコールバックではなく
//! `ConfirmAction` として一度だけ取り出す。

use serde::{Deserialize, Serialize};

use crate::markup::format_markdown;
use crate::parser::{
    parse_interview_questions, split_strengths_weaknesses, Extraction, InterviewQuestion,
    NO_QUESTIONS,
};
use crate::ranking::{skill_tags, ScoreTier};
use crate::types::Candidate;

/// お知らせモーダルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeKind {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl NoticeKind {
    pub fn icon_class(&self) -> &'static str {
        match self {
            NoticeKind::Info => "fas fa-info-circle text-blue-500",
            NoticeKind::Success => "fas fa-check-circle text-green-500",
            NoticeKind::Error => "fas fa-exclamation-circle text-red-500",
            NoticeKind::Warning => "fas fa-exclamation-triangle text-yellow-500",
        }
    }
}

/// 詳細モーダルのタブ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Info,
    Strengths,
    Summary,
    Recommendation,
    Interview,
}

impl DetailTab {
    pub const ALL: [DetailTab; 5] = [
        DetailTab::Info,
        DetailTab::Strengths,
        DetailTab::Summary,
        DetailTab::Recommendation,
        DetailTab::Interview,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Info => "Basic Info",
            DetailTab::Strengths => "Strengths & Weaknesses",
            DetailTab::Summary => "Summary & Justification",
            DetailTab::Recommendation => "Recommendation",
            DetailTab::Interview => "Interview Questions",
        }
    }
}

/// 候補者へ送るメールの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    Accept,
    Reject,
}

impl EmailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailKind::Accept => "accept",
            EmailKind::Reject => "reject",
        }
    }
}

/// 確認後に実行する操作
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    SendEmail { candidate: Box<Candidate>, kind: EmailKind },
    DeleteResume { resume_id: String },
}

/// 詳細モーダルの状態
#[derive(Debug, Clone, PartialEq)]
pub struct DetailModal {
    pub candidate: Box<Candidate>,
    pub tab: DetailTab,
    /// 送信中のメール（ボタンを無効化する）
    pub sending: Option<EmailKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Info {
        title: String,
        message: String,
        kind: NoticeKind,
    },
    Confirm {
        title: String,
        message: String,
        action: Option<ConfirmAction>,
        /// キャンセル・確定後に戻す詳細モーダル
        restore: Option<DetailModal>,
    },
    Detail(DetailModal),
    Comparison {
        left: Box<Candidate>,
        right: Box<Candidate>,
    },
}

/// 新しいモーダルが開かれるたびに変わるキー
pub type ModalKey = u64;

#[derive(Debug, Clone, Default)]
pub struct ModalController {
    current: Option<Modal>,
    serial: ModalKey,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Modal> {
        self.current.as_ref()
    }

    pub fn key(&self) -> Option<ModalKey> {
        self.current.as_ref().map(|_| self.serial)
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    fn open(&mut self, modal: Modal) {
        self.serial += 1;
        self.current = Some(modal);
    }

    pub fn show_info(&mut self, title: impl Into<String>, message: impl Into<String>, kind: NoticeKind) {
        self.open(Modal::Info {
            title: title.into(),
            message: message.into(),
            kind,
        });
    }

    pub fn show_error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.show_info(title, message, NoticeKind::Error);
    }

    /// 確認モーダル。開いている詳細モーダルは退避して後で戻す
    pub fn show_confirm(&mut self, title: impl Into<String>, message: impl Into<String>, action: ConfirmAction) {
        let restore = match self.current.take() {
            Some(Modal::Detail(detail)) => Some(detail),
            _ => None,
        };
        self.open(Modal::Confirm {
            title: title.into(),
            message: message.into(),
            action: Some(action),
            restore,
        });
    }

    pub fn show_detail(&mut self, candidate: Candidate) {
        self.open(Modal::Detail(DetailModal {
            candidate: Box::new(candidate),
            tab: DetailTab::Info,
            sending: None,
        }));
    }

    /// 比較モーダル。どちらかが欠けていればエラーを表示してfalse
    pub fn show_comparison(&mut self, left: Option<Candidate>, right: Option<Candidate>) -> bool {
        match (left, right) {
            (Some(left), Some(right)) => {
                self.open(Modal::Comparison {
                    left: Box::new(left),
                    right: Box::new(right),
                });
                true
            }
            _ => {
                tracing::warn!("Comparison requested with a missing candidate");
                self.show_error(
                    "Comparison Error",
                    "Both candidates must be provided for comparison.",
                );
                false
            }
        }
    }

    /// 確認結果を受け取る。操作は確定時に一度だけ返る
    ///
    /// 退避していた詳細モーダルがあれば戻す。
    pub fn decide(&mut self, confirmed: bool) -> Option<ConfirmAction> {
        let Some(Modal::Confirm { action, restore, .. }) = self.current.as_mut() else {
            return None;
        };
        let action = action.take();
        let restore = restore.take();
        self.current = None;
        if let Some(detail) = restore {
            self.open(Modal::Detail(detail));
        }
        if confirmed {
            action
        } else {
            None
        }
    }

    /// 閉じる。確認モーダルならキャンセル扱い
    pub fn close(&mut self) {
        if matches!(self.current, Some(Modal::Confirm { .. })) {
            self.decide(false);
        } else {
            self.current = None;
        }
    }

    pub fn select_tab(&mut self, tab: DetailTab) {
        if let Some(Modal::Detail(detail)) = self.current.as_mut() {
            detail.tab = tab;
        }
    }

    /// 詳細モーダルの送信ボタンを送信中にする
    pub fn mark_sending(&mut self, kind: EmailKind) -> bool {
        match self.current.as_mut() {
            Some(Modal::Detail(detail)) if detail.sending.is_none() => {
                detail.sending = Some(kind);
                true
            }
            _ => false,
        }
    }

    /// 送信完了: 結果モーダルに置き換える
    pub fn finish_sending(&mut self, title: impl Into<String>, message: impl Into<String>, kind: NoticeKind) {
        if let Some(Modal::Detail(detail)) = self.current.as_mut() {
            detail.sending = None;
        }
        self.show_info(title, message, kind);
    }

    pub fn sending(&self) -> Option<EmailKind> {
        match self.current.as_ref() {
            Some(Modal::Detail(detail)) => detail.sending,
            _ => None,
        }
    }
}

/// タブの表示内容
#[derive(Debug, Clone, PartialEq)]
pub enum TabContent {
    Info {
        name: String,
        email: String,
        phone: String,
        filename: String,
        sender: Option<String>,
        subject: Option<String>,
        score_label: String,
        tier: ScoreTier,
        basic_info_html: String,
    },
    Strengths {
        strengths: Vec<String>,
        weaknesses: Vec<String>,
    },
    Html(String),
    /// HRサマリーと評価理由
    Summary {
        summary_html: String,
        justification_html: String,
    },
    Questions(Vec<InterviewQuestion>),
    /// 番号付けされていない質問テキストをそのまま表示
    RawQuestions(String),
}

const NO_SUMMARY: &str = "No summary provided.";
const NO_JUSTIFICATION: &str = "No justification provided.";
const NO_RECOMMENDATION: &str = "No recommendation provided.";

pub fn tab_content(candidate: &Candidate, tab: DetailTab) -> TabContent {
    let sections = &candidate.sections;
    match tab {
        DetailTab::Info => TabContent::Info {
            name: candidate.display_name().to_string(),
            email: candidate.email().unwrap_or("No email provided").to_string(),
            phone: candidate.phone().unwrap_or("No phone provided").to_string(),
            filename: candidate.filename.clone(),
            sender: candidate.sender.clone(),
            subject: candidate.subject.clone(),
            score_label: candidate.score_label(),
            tier: ScoreTier::from_score(candidate.score()),
            basic_info_html: format_markdown(sections.basic_info.as_deref()),
        },
        DetailTab::Strengths => {
            let split = split_strengths_weaknesses(sections.strengths_weaknesses.as_deref());
            TabContent::Strengths {
                strengths: split.strength_lines(),
                weaknesses: split.weakness_lines(),
            }
        }
        DetailTab::Summary => TabContent::Summary {
            summary_html: html_or(sections.hr_summary.as_deref(), NO_SUMMARY),
            justification_html: html_or(sections.justification.as_deref(), NO_JUSTIFICATION),
        },
        DetailTab::Recommendation => {
            TabContent::Html(html_or(sections.recommendation.as_deref(), NO_RECOMMENDATION))
        }
        DetailTab::Interview => questions_content(sections.interview_questions.as_deref()),
    }
}

fn questions_content(text: Option<&str>) -> TabContent {
    match parse_interview_questions(text) {
        Extraction::Parsed(questions) => TabContent::Questions(questions),
        Extraction::Unparsed(raw) => TabContent::RawQuestions(raw),
        Extraction::Missing => TabContent::RawQuestions(NO_QUESTIONS.to_string()),
    }
}

fn html_or(text: Option<&str>, placeholder: &str) -> String {
    let html = format_markdown(text);
    if html.trim().is_empty() {
        placeholder.to_string()
    } else {
        html
    }
}

/// 比較モーダルの片側
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonPanel {
    pub name: String,
    pub score_label: String,
    pub tier: ScoreTier,
    pub skills: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub summary_html: String,
    /// `Questions` か `RawQuestions`
    pub questions: TabContent,
}

pub fn comparison_panel(candidate: &Candidate) -> ComparisonPanel {
    let sections = &candidate.sections;
    let split = split_strengths_weaknesses(sections.strengths_weaknesses.as_deref());
    ComparisonPanel {
        name: candidate.short_name().to_string(),
        score_label: candidate.score_label(),
        tier: ScoreTier::from_score(candidate.score()),
        skills: skill_tags(sections.hr_summary.as_deref()),
        strengths: split.strength_lines(),
        weaknesses: split.weakness_lines(),
        summary_html: html_or(sections.hr_summary.as_deref(), NO_SUMMARY),
        questions: questions_content(sections.interview_questions.as_deref()),
    }
}
