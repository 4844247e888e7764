//! Resume AI CLI
//!
//! 画面と同じAPI定義（`resume-ai-common`）を端末から使う

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod report;
