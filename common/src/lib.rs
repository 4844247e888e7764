//! Resume AI Common Library
//!
//! CLIとWeb(WASM)で共有される型・画面ロジック・API定義

pub mod api;
pub mod chat;
pub mod config;
pub mod controller;
pub mod error;
pub mod markup;
pub mod modal;
pub mod parser;
pub mod ranking;
pub mod router;
pub mod session;
pub mod types;

pub use api::{ApiRequest, Body, Outcome, Part, RawResponse, ResumeFile};
pub use config::ClientConfig;
pub use controller::{Call, CompareRequest, Controller, Effect, Intent, OpenMode, Ticket};
pub use error::{Error, Result};
pub use markup::format_markdown;
pub use modal::{DetailTab, EmailKind, Modal, NoticeKind};
pub use parser::{parse_interview_questions, split_strengths_weaknesses, Extraction};
pub use ranking::{build_cards, sort_by_score, CandidateCard, ScoreTier};
pub use router::{AnimationSlot, Cancel, Page, Router, Transition};
pub use session::{MemoryStorage, Session, Storage, Theme};
pub use types::{parse_score, Candidate, Project, Sections};
