//! クライアントのセッション状態
//!
//! テーマ・求人票テキスト・開いているプロジェクト・候補者一覧を保持し、
//! 変更のたびに永続化して購読者へ通知する。保存先は `Storage` で差し替える
//! （ブラウザでは localStorage、テストではメモリ）。

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::ranking::sort_by_score;
use crate::types::{Candidate, Project};

pub const THEME_KEY: &str = "theme";
pub const JOB_DESCRIPTION_KEY: &str = "jobDescription";
pub const CURRENT_PROJECT_KEY: &str = "currentProject";
pub const CANDIDATES_KEY: &str = "candidates";

/// 永続化先
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// メモリ上のストレージ（テスト・CLI用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }

    pub fn from_css_class(value: &str) -> Option<Theme> {
        match value {
            "light-theme" => Some(Theme::Light),
            "dark-theme" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// 変更通知
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Theme,
    JobDescription,
    Project,
    Candidates,
}

pub type Listener = Box<dyn Fn(&SessionChange) + Send + Sync>;

/// 購読解除用のID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct Session<S: Storage> {
    storage: S,
    theme: Theme,
    job_description: String,
    project: Option<Project>,
    candidates: Vec<Candidate>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl<S: Storage> Session<S> {
    /// ストレージから復元する。壊れた値は警告して無視
    pub fn load(storage: S) -> Self {
        let theme = storage
            .get(THEME_KEY)
            .and_then(|v| Theme::from_css_class(&v))
            .unwrap_or_default();
        let job_description = storage.get(JOB_DESCRIPTION_KEY).unwrap_or_default();
        let project = read_json::<Project>(&storage, CURRENT_PROJECT_KEY);
        let mut candidates = read_json::<Vec<Candidate>>(&storage, CANDIDATES_KEY).unwrap_or_default();
        sort_by_score(&mut candidates);

        Self {
            storage,
            theme,
            job_description,
            project,
            candidates,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn project(&self) -> Option<&Project> {
        self.project.as_ref()
    }

    pub fn project_id(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.id.as_str()).filter(|id| !id.is_empty())
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        let result = self.storage.set(THEME_KEY, theme.css_class());
        self.persisted(THEME_KEY, result);
        self.notify(SessionChange::Theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set_theme(next);
        next
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
        let result = self.storage.set(JOB_DESCRIPTION_KEY, &self.job_description);
        self.persisted(JOB_DESCRIPTION_KEY, result);
        self.notify(SessionChange::JobDescription);
    }

    pub fn set_project(&mut self, project: Option<Project>) {
        let result = match &project {
            Some(p) => write_json(&mut self.storage, CURRENT_PROJECT_KEY, p),
            None => self.storage.remove(CURRENT_PROJECT_KEY),
        };
        self.project = project;
        self.persisted(CURRENT_PROJECT_KEY, result);
        self.notify(SessionChange::Project);
    }

    /// 候補者一覧を差し替える（スコア降順に並べ替えて保存）
    pub fn set_candidates(&mut self, mut candidates: Vec<Candidate>) {
        sort_by_score(&mut candidates);
        let result = write_json(&mut self.storage, CANDIDATES_KEY, &candidates);
        self.candidates = candidates;
        self.persisted(CANDIDATES_KEY, result);
        self.notify(SessionChange::Candidates);
    }

    /// プロジェクトを開き、その候補者を表示対象にする
    pub fn open_project(&mut self, project: Project) {
        let candidates = project.active_candidates();
        self.set_project(Some(project));
        self.set_candidates(candidates);
    }

    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn notify(&self, change: SessionChange) {
        for (_, listener) in &self.listeners {
            listener(&change);
        }
    }

    fn persisted(&self, key: &str, result: Result<()>) {
        if let Err(e) = result {
            tracing::warn!("Failed to persist '{}': {}", key, e);
        }
    }
}

impl<S: Storage + std::fmt::Debug> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("storage", &self.storage)
            .field("theme", &self.theme)
            .field("job_description", &self.job_description)
            .field("project", &self.project.as_ref().map(|p| &p.id))
            .field("candidates", &self.candidates.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn read_json<T: DeserializeOwned>(storage: &impl Storage, key: &str) -> Option<T> {
    let raw = storage.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring invalid stored '{}': {}", key, e);
            None
        }
    }
}

fn write_json<T: Serialize>(storage: &mut impl Storage, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::sync::{Arc, Mutex};

    fn scored(id: &str, score: &str) -> Candidate {
        let mut c = Candidate {
            id: id.into(),
            ..Default::default()
        };
        c.sections.ats_score = Some(score.into());
        c
    }

    #[test]
    fn test_load_defaults() {
        let session = Session::load(MemoryStorage::new());
        assert_eq!(session.theme(), Theme::Light);
        assert_eq!(session.job_description(), "");
        assert!(session.project().is_none());
        assert!(session.candidates().is_empty());
    }

    #[test]
    fn test_load_restores_stored_values() {
        let storage = MemoryStorage::with(&[
            (THEME_KEY, "dark-theme"),
            (JOB_DESCRIPTION_KEY, "Rust engineer"),
            (CURRENT_PROJECT_KEY, r#"{"id": "p1", "title": "Backend"}"#),
            (CANDIDATES_KEY, r#"[{"id": "a", "sections": {"ats_score": 40}}, {"id": "b", "sections": {"ats_score": 90}}]"#),
        ]);
        let session = Session::load(storage);
        assert_eq!(session.theme(), Theme::Dark);
        assert_eq!(session.job_description(), "Rust engineer");
        assert_eq!(session.project_id(), Some("p1"));
        assert_eq!(session.candidates()[0].id, "b");
    }

    #[test]
    fn test_load_ignores_corrupt_json() {
        let storage = MemoryStorage::with(&[(CANDIDATES_KEY, "{not json"), (THEME_KEY, "purple")]);
        let session = Session::load(storage);
        assert!(session.candidates().is_empty());
        assert_eq!(session.theme(), Theme::Light);
    }

    #[test]
    fn test_mutations_persist() {
        let mut session = Session::load(MemoryStorage::new());
        session.toggle_theme();
        session.set_job_description("Data engineer");
        session.set_candidates(vec![scored("a", "10"), scored("b", "70")]);

        let storage = session.storage();
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("dark-theme"));
        assert_eq!(storage.get(JOB_DESCRIPTION_KEY).as_deref(), Some("Data engineer"));
        assert!(storage.get(CANDIDATES_KEY).unwrap().contains("\"b\""));
        assert_eq!(session.candidates()[0].id, "b");
    }

    #[test]
    fn test_clear_project_removes_key() {
        let mut session = Session::load(MemoryStorage::new());
        session.set_project(Some(Project {
            id: "p1".into(),
            ..Default::default()
        }));
        assert!(session.storage().get(CURRENT_PROJECT_KEY).is_some());
        session.set_project(None);
        assert!(session.storage().get(CURRENT_PROJECT_KEY).is_none());
    }

    #[test]
    fn test_open_project_uses_active_candidates() {
        let mut session = Session::load(MemoryStorage::new());
        session.open_project(Project {
            id: "p1".into(),
            top_resumes: vec![scored("t", "55")],
            ..Default::default()
        });
        assert_eq!(session.project_id(), Some("p1"));
        assert_eq!(session.candidates().len(), 1);
        assert_eq!(session.candidates()[0].id, "t");
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut session = Session::load(MemoryStorage::new());
        let sink = seen.clone();
        let id = session.subscribe(Box::new(move |change| sink.lock().unwrap().push(*change)));

        session.set_job_description("x");
        session.toggle_theme();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![SessionChange::JobDescription, SessionChange::Theme]
        );

        assert!(session.unsubscribe(id));
        session.toggle_theme();
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    struct FullStorage;

    impl Storage for FullStorage {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::Storage("quota exceeded".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_persist_failure_keeps_state() {
        let mut session = Session::load(FullStorage);
        session.set_job_description("kept in memory");
        assert_eq!(session.job_description(), "kept in memory");
    }
}
