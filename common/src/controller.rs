//! 画面コントローラー
//!
//! 画面からの操作（`Intent`）を受け取り、状態を更新して副作用（`Effect`）を返す。
//! 通信は行わず、`Effect::Call` を受け取った側が送信して
//! 結果を `complete` に戻す。ブラウザでもテストでも同じ流れで動く。

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::api::{
    decode, decode_lenient, ApiRequest, CandidatesReply, ChatReply, DeleteReply, EmailReply,
    EmailRequest, FetchResumes, Outcome, ProjectList, ProjectReply, ProjectUploadReply, ResumeFile,
};
use crate::chat::ChatLog;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::modal::{ConfirmAction, DetailTab, EmailKind, Modal, ModalController, NoticeKind};
use crate::ranking::{build_cards, selector_label, CandidateCard};
use crate::router::{Page, Router, Transition};
use crate::session::{Session, Storage};
use crate::types::{Candidate, Project};

pub const DEFAULT_PROJECT_TITLE: &str = "New Recruitment";

/// 送信中リクエストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub ticket: Ticket,
    pub request: ApiRequest,
}

/// ホスト側が実行する副作用
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// ページを描画し直し、フラグメントとタイマーを更新する
    Render(Transition),
    /// APIを呼び出し、結果を `Controller::complete` に渡す
    Call(Call),
    /// 新しいタブで開く
    OpenExternal(String),
}

/// プロジェクトを開く目的
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// 以後のアップロード先にする
    Activate,
    /// 保存済みの評価を見る
    View,
}

/// 解析の入口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    Upload,
    Gmail,
}

impl AnalysisSource {
    /// エラー時・結果なし時に戻るページ
    pub fn page(&self) -> Page {
        match self {
            AnalysisSource::Upload => Page::Upload,
            AnalysisSource::Gmail => Page::Gmail,
        }
    }

    /// ローディング画面のステップアイコン
    pub fn step_icons(&self) -> [&'static str; 4] {
        match self {
            AnalysisSource::Upload => ["fa-file-alt", "fa-database", "fa-robot", "fa-check-circle"],
            AnalysisSource::Gmail => ["fa-envelope", "fa-file-alt", "fa-robot", "fa-check-circle"],
        }
    }

    fn empty_notice(&self) -> (&'static str, &'static str) {
        match self {
            AnalysisSource::Upload => ("No Candidates Found", "The uploaded resume could not be analyzed."),
            AnalysisSource::Gmail => ("No Resumes Found", "No suitable resumes were found in your Gmail account."),
        }
    }

    fn server_fallback(&self, scoped: bool) -> &'static str {
        match (self, scoped) {
            (AnalysisSource::Upload, false) => "A server error occurred while analyzing the resume.",
            (AnalysisSource::Upload, true) => "A server error occurred while uploading the resume to project.",
            (AnalysisSource::Gmail, _) => "A server error occurred while fetching resumes.",
        }
    }

    fn network_prefix(&self) -> &'static str {
        match self {
            AnalysisSource::Upload => "Error uploading resume: ",
            AnalysisSource::Gmail => "Error fetching resumes: ",
        }
    }
}

/// 比較の指定方法
#[derive(Debug, Clone, PartialEq)]
pub enum CompareRequest {
    /// 異なる2件をランダムに選ぶ
    Random { seed: u64 },
    /// スコア上位2件
    Top,
    /// 候補者一覧の位置で指定（同じ位置なら何もしない）
    Pair(usize, usize),
    /// 新しくアップロードした履歴書と比べる
    Uploaded { file: ResumeFile, base: Option<usize> },
}

/// 画面からの操作
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Start { fragment: String },
    Navigate(String),
    HashChanged(String),
    TimelineTick(u64),
    ToggleTheme,
    RefreshProjectOptions,
    CreateProject { title: String, description: String },
    OpenProject { id: String, mode: OpenMode },
    SubmitUpload {
        job_description: String,
        file: Option<ResumeFile>,
        project_id: Option<String>,
    },
    SubmitGmailFetch {
        job_role: String,
        job_description: String,
        project_id: Option<String>,
    },
    OpenCandidate(usize),
    SelectTab(DetailTab),
    RequestEmail(EmailKind),
    Confirm(bool),
    CloseModal,
    RequestDelete { resume_id: String },
    Compare(CompareRequest),
    /// 選択したファイルを読み込めなかった
    FileUnreadable { file_name: String, reason: String },
    ToggleChat,
    SendChat(String),
    Reauthenticate,
}

/// プロジェクト一覧の読み込み状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// 応答待ちリクエストの用途
#[derive(Debug, Clone)]
enum Pending {
    ProjectOptions,
    ProjectList,
    CreateProject,
    OpenProject(OpenMode),
    Analysis { source: AnalysisSource, scoped: bool },
    SendEmail,
    DeleteResume { project_id: String, return_to: Page },
    RefreshProject { return_to: Page },
    CompareUpload { base: Option<Candidate> },
    Chat,
}

const MISSING_JD: &str = "Please enter a job description to continue.";

/// 空白のみの入力は `Error::Validation`
fn required<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    match value.trim() {
        "" => Err(Error::Validation(message.to_string())),
        trimmed => Ok(trimmed),
    }
}

/// アップロード解析の入力確認（JDが先）
pub fn validate_upload(job_description: &str, file: Option<ResumeFile>) -> Result<(&str, ResumeFile)> {
    let job_description = required(job_description, MISSING_JD)?;
    let file = file.ok_or_else(|| Error::Validation("Please select a resume file to continue.".to_string()))?;
    Ok((job_description, file))
}

pub struct Controller<S: Storage> {
    config: ClientConfig,
    router: Router,
    modals: ModalController,
    session: Session<S>,
    chat: ChatLog,
    projects: Vec<Project>,
    project_list: ListState,
    pending: HashMap<Ticket, Pending>,
    next_ticket: u64,
    creating_project: bool,
    analysis: Option<AnalysisSource>,
}

impl<S: Storage> Controller<S> {
    pub fn new(config: ClientConfig, storage: S) -> Self {
        Self {
            config,
            router: Router::new(),
            modals: ModalController::new(),
            session: Session::load(storage),
            chat: ChatLog::default(),
            projects: Vec::new(),
            project_list: ListState::Idle,
            pending: HashMap::new(),
            next_ticket: 0,
            creating_project: false,
            analysis: None,
        }
    }

    // ---- 読み取り ----

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn page(&self) -> Page {
        self.router.current()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn modals(&self) -> &ModalController {
        &self.modals
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<S> {
        &mut self.session
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project_list(&self) -> ListState {
        self.project_list
    }

    /// プロジェクト選択欄の初期値（開いているプロジェクトが一覧にあれば）
    pub fn preselected_project_id(&self) -> Option<&str> {
        let id = self.session.project_id()?;
        self.projects.iter().any(|p| p.id == id).then_some(id)
    }

    pub fn is_creating_project(&self) -> bool {
        self.creating_project
    }

    pub fn is_analyzing(&self) -> bool {
        self.analysis.is_some()
    }

    /// ローディング画面で表示する解析の種類
    pub fn analysis_source(&self) -> AnalysisSource {
        self.analysis.unwrap_or(AnalysisSource::Upload)
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn cards(&self) -> Vec<CandidateCard> {
        build_cards(self.session.candidates(), self.session.project_id().is_some())
    }

    /// 比較セレクタの選択肢（候補者一覧の位置とラベル）
    pub fn compare_options(&self) -> Vec<(usize, String)> {
        self.session
            .candidates()
            .iter()
            .enumerate()
            .map(|(i, c)| (i, selector_label(c)))
            .collect()
    }

    // ---- 操作 ----

    pub fn handle(&mut self, intent: Intent) -> Vec<Effect> {
        match intent {
            Intent::Start { fragment } => {
                let transition = self.router.start(&fragment);
                self.enter(transition)
            }
            Intent::Navigate(id) => {
                let transition = self.router.navigate(&id);
                self.enter(transition)
            }
            Intent::HashChanged(fragment) => match self.router.sync_fragment(&fragment) {
                Some(transition) => self.enter(transition),
                None => Vec::new(),
            },
            Intent::TimelineTick(generation) => {
                self.router.tick(generation);
                Vec::new()
            }
            Intent::ToggleTheme => {
                let theme = self.session.toggle_theme();
                tracing::debug!("Theme switched to {}", theme.css_class());
                Vec::new()
            }
            Intent::RefreshProjectOptions => vec![self.call(Pending::ProjectOptions, ApiRequest::ListProjects)],
            Intent::CreateProject { title, description } => self.create_project(&title, &description),
            Intent::OpenProject { id, mode } => {
                vec![self.call(Pending::OpenProject(mode), ApiRequest::GetProject { id })]
            }
            Intent::SubmitUpload {
                job_description,
                file,
                project_id,
            } => self.submit_upload(&job_description, file, project_id),
            Intent::SubmitGmailFetch {
                job_role,
                job_description,
                project_id,
            } => self.submit_gmail(&job_role, &job_description, project_id),
            Intent::OpenCandidate(index) => {
                match self.session.candidates().get(index).cloned() {
                    Some(candidate) => self.modals.show_detail(candidate),
                    None => tracing::warn!("No candidate at index {}", index),
                }
                Vec::new()
            }
            Intent::SelectTab(tab) => {
                self.modals.select_tab(tab);
                Vec::new()
            }
            Intent::RequestEmail(kind) => {
                self.request_email(kind);
                Vec::new()
            }
            Intent::Confirm(confirmed) => self.confirm(confirmed),
            Intent::CloseModal => {
                self.modals.close();
                Vec::new()
            }
            Intent::RequestDelete { resume_id } => {
                self.modals.show_confirm(
                    "Delete Resume",
                    "Delete this resume from the project? This action cannot be undone.",
                    ConfirmAction::DeleteResume { resume_id },
                );
                Vec::new()
            }
            Intent::Compare(request) => self.compare(request),
            Intent::FileUnreadable { file_name, reason } => {
                self.modals.show_error(
                    "File Error",
                    format!("Could not read \"{}\": {}. Please choose the file again.", file_name, reason),
                );
                Vec::new()
            }
            Intent::ToggleChat => {
                self.chat.toggle();
                Vec::new()
            }
            Intent::SendChat(text) => match self.chat.push_user(&text) {
                Some(message) => vec![self.call(Pending::Chat, ApiRequest::Chat { message })],
                None => Vec::new(),
            },
            Intent::Reauthenticate => vec![Effect::OpenExternal(self.config.authenticate_url())],
        }
    }

    /// APIの結果を受け取る
    pub fn complete(&mut self, ticket: Ticket, outcome: Outcome) -> Vec<Effect> {
        let Some(pending) = self.pending.remove(&ticket) else {
            tracing::warn!("Response for unknown ticket {:?}", ticket);
            return Vec::new();
        };

        match pending {
            Pending::ProjectOptions => {
                match decode::<ProjectList>(&outcome) {
                    Ok(list) => self.projects = list.projects,
                    Err(e) => tracing::warn!("Could not load projects: {}", e),
                }
                Vec::new()
            }
            Pending::ProjectList => {
                match decode::<ProjectList>(&outcome) {
                    Ok(list) => {
                        self.projects = list.projects;
                        self.project_list = ListState::Loaded;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load projects: {}", e);
                        self.project_list = ListState::Failed;
                    }
                }
                Vec::new()
            }
            Pending::CreateProject => self.project_created(&outcome),
            Pending::OpenProject(mode) => self.project_opened(&outcome, mode),
            Pending::Analysis { source, scoped } => self.analysis_finished(&outcome, source, scoped),
            Pending::SendEmail => {
                self.email_sent(&outcome);
                Vec::new()
            }
            Pending::DeleteResume { project_id, return_to } => self.resume_deleted(&outcome, project_id, return_to),
            Pending::RefreshProject { return_to } => self.project_refreshed(&outcome, return_to),
            Pending::CompareUpload { base } => {
                self.compare_uploaded(&outcome, base);
                Vec::new()
            }
            Pending::Chat => {
                match decode::<ChatReply>(&outcome) {
                    Ok(reply) => self.chat.push_reply(reply.response),
                    Err(e) => {
                        tracing::warn!("Chat request failed: {}", e);
                        self.chat.push_reply(None);
                    }
                }
                Vec::new()
            }
        }
    }

    // ---- 内部処理 ----

    fn call(&mut self, pending: Pending, request: ApiRequest) -> Effect {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        tracing::debug!("Call {:?}: {} {}", ticket, request.method().as_str(), request.path());
        self.pending.insert(ticket, pending);
        Effect::Call(Call { ticket, request })
    }

    /// ページに入る。入ったページに応じて一覧の読み込みを始める
    fn enter(&mut self, transition: Transition) -> Vec<Effect> {
        let page = transition.to;
        if page == Page::Loading && self.analysis.is_none() {
            // 解析中でなければローディング画面には留まらない
            tracing::warn!("Nothing is being analyzed, leaving the loading page");
            let mut redirect = self.router.navigate_to(Page::Landing);
            redirect.from = transition.from;
            redirect.redirected_from = Some(page.id().to_string());
            // ローディングのタイマーは始まっていないので、止めるのは遷移前のもの
            redirect.cancel_timeline = transition.cancel_timeline;
            return vec![Effect::Render(redirect)];
        }
        let mut effects = vec![Effect::Render(transition)];
        match page {
            Page::Upload | Page::Gmail => {
                effects.push(self.call(Pending::ProjectOptions, ApiRequest::ListProjects));
            }
            Page::OpenProject => {
                self.project_list = ListState::Loading;
                effects.push(self.call(Pending::ProjectList, ApiRequest::ListProjects));
            }
            _ => {}
        }
        effects
    }

    fn go(&mut self, page: Page) -> Vec<Effect> {
        let transition = self.router.navigate_to(page);
        self.enter(transition)
    }

    /// エラーをモーダルで表示（通信エラーは理由付きで別タイトル）
    fn report(&mut self, error: &Error, title: &str, fallback: &str, network_prefix: &str) {
        match error {
            Error::Network(reason) => self
                .modals
                .show_error("Network Error", format!("{}{}", network_prefix, reason)),
            other => self.modals.show_error(title, other.message_or(fallback)),
        }
    }

    fn create_project(&mut self, title: &str, description: &str) -> Vec<Effect> {
        if self.creating_project {
            tracing::debug!("Project creation already in flight");
            return Vec::new();
        }
        let title = match title.trim() {
            "" => DEFAULT_PROJECT_TITLE,
            t => t,
        };
        self.creating_project = true;
        vec![self.call(
            Pending::CreateProject,
            ApiRequest::CreateProject {
                title: title.to_string(),
                description: description.trim().to_string(),
            },
        )]
    }

    fn project_created(&mut self, outcome: &Outcome) -> Vec<Effect> {
        self.creating_project = false;
        match decode::<ProjectReply>(outcome) {
            Ok(reply) => {
                let title = reply.project.map(|p| p.title).unwrap_or_default();
                self.modals.show_info(
                    "Project Created",
                    format!("Project \"{}\" created.", title),
                    NoticeKind::Success,
                );
                self.go(Page::OpenProject)
            }
            Err(e) => {
                self.report(&e, "Error", "Could not create project", "Failed to create project: ");
                Vec::new()
            }
        }
    }

    fn project_opened(&mut self, outcome: &Outcome, mode: OpenMode) -> Vec<Effect> {
        let project = match decode::<ProjectReply>(outcome) {
            Ok(ProjectReply { project: Some(project) }) => project,
            Ok(_) => {
                self.modals.show_error("Error", "Could not open project");
                return Vec::new();
            }
            Err(e) => {
                self.report(&e, "Error", "Could not open project", "Failed to open project: ");
                return Vec::new();
            }
        };

        let title = project.title.clone();
        self.session.open_project(project);
        match mode {
            OpenMode::Activate => {
                self.modals.show_info(
                    "Project Opened",
                    format!("Project \"{}\" is now active.", title),
                    NoticeKind::Success,
                );
                self.go(Page::Upload)
            }
            OpenMode::View => self.go(Page::ProjectView),
        }
    }

    fn submit_upload(
        &mut self,
        job_description: &str,
        file: Option<ResumeFile>,
        project_id: Option<String>,
    ) -> Vec<Effect> {
        if self.analysis.is_some() {
            tracing::debug!("Analysis already in flight");
            return Vec::new();
        }
        let (job_description, file) = match validate_upload(job_description, file) {
            Ok(checked) => checked,
            Err(e) => {
                self.report(&e, "Validation Error", "", "");
                return Vec::new();
            }
        };

        self.session.set_job_description(job_description);
        let project_id = project_id.filter(|id| !id.trim().is_empty());
        let scoped = project_id.is_some();
        self.analysis = Some(AnalysisSource::Upload);

        let mut effects = self.go(Page::Loading);
        effects.push(self.call(
            Pending::Analysis {
                source: AnalysisSource::Upload,
                scoped,
            },
            ApiRequest::UploadResume {
                project_id,
                job_description: job_description.to_string(),
                file,
            },
        ));
        effects
    }

    fn submit_gmail(&mut self, job_role: &str, job_description: &str, project_id: Option<String>) -> Vec<Effect> {
        if self.analysis.is_some() {
            tracing::debug!("Analysis already in flight");
            return Vec::new();
        }
        let checked = required(job_role, "Please enter a Job Role to continue.")
            .and_then(|role| required(job_description, MISSING_JD).map(|jd| (role, jd)));
        let (job_role, job_description) = match checked {
            Ok(checked) => checked,
            Err(e) => {
                self.report(&e, "Validation Error", "", "");
                return Vec::new();
            }
        };

        self.session.set_job_description(job_description);
        self.analysis = Some(AnalysisSource::Gmail);

        let mut effects = self.go(Page::Loading);
        effects.push(self.call(
            Pending::Analysis {
                source: AnalysisSource::Gmail,
                scoped: false,
            },
            ApiRequest::FetchResumes(FetchResumes {
                job_description: job_description.to_string(),
                job_role: job_role.to_string(),
                days_filter: self.config.days_filter,
                project_id: project_id.filter(|id| !id.trim().is_empty()),
            }),
        ));
        effects
    }

    fn analysis_finished(&mut self, outcome: &Outcome, source: AnalysisSource, scoped: bool) -> Vec<Effect> {
        self.analysis = None;
        if self.router.current() != Page::Loading {
            tracing::info!("Ignoring analysis response after leaving the loading page");
            return Vec::new();
        }

        let decoded = if scoped {
            decode::<ProjectUploadReply>(outcome).map(|reply| CandidatesReply {
                candidates: reply.candidate.into_iter().collect(),
                message: None,
                project: reply.project,
            })
        } else {
            decode::<CandidatesReply>(outcome)
        };

        match decoded {
            Ok(reply) => {
                if let Some(project) = reply.project {
                    self.session.set_project(Some(project));
                }
                if reply.candidates.is_empty() {
                    let (title, message) = source.empty_notice();
                    let message = reply.message.unwrap_or_else(|| message.to_string());
                    self.modals.show_info(title, message, NoticeKind::Info);
                    return self.go(source.page());
                }
                tracing::info!("Analysis returned {} candidate(s)", reply.candidates.len());
                self.session.set_candidates(reply.candidates);
                self.go(Page::Results)
            }
            Err(e) => {
                tracing::warn!("Analysis failed: {}", e);
                self.report(&e, "API Error", source.server_fallback(scoped), source.network_prefix());
                self.go(source.page())
            }
        }
    }

    fn request_email(&mut self, kind: EmailKind) {
        let candidate = match self.modals.current() {
            Some(Modal::Detail(detail)) if detail.sending.is_none() => detail.candidate.clone(),
            Some(Modal::Detail(_)) => {
                tracing::debug!("Email already being sent");
                return;
            }
            _ => return,
        };

        let name = candidate.name.as_deref().map(str::trim).unwrap_or_default().to_string();
        if self.session.job_description().trim().is_empty() || candidate.email().is_none() || name.is_empty() {
            self.modals.show_error("Error", "Missing required data for sending email.");
            return;
        }

        self.modals.show_confirm(
            "Confirm Action",
            format!("Are you sure you want to send a {} email to {}?", kind.as_str(), name),
            ConfirmAction::SendEmail { candidate, kind },
        );
    }

    fn confirm(&mut self, confirmed: bool) -> Vec<Effect> {
        match self.modals.decide(confirmed) {
            Some(ConfirmAction::SendEmail { candidate, kind }) => {
                self.modals.mark_sending(kind);
                let request = EmailRequest {
                    email: candidate.email().unwrap_or_default().to_string(),
                    name: candidate.name.clone().unwrap_or_default(),
                    job_description: self.session.job_description().to_string(),
                    kind,
                };
                vec![self.call(Pending::SendEmail, ApiRequest::SendEmail(request))]
            }
            Some(ConfirmAction::DeleteResume { resume_id }) => {
                let Some(project_id) = self.session.project_id().map(str::to_string) else {
                    self.modals.show_error("Error", "No active project selected.");
                    return Vec::new();
                };
                let return_to = self.router.current();
                vec![self.call(
                    Pending::DeleteResume {
                        project_id: project_id.clone(),
                        return_to,
                    },
                    ApiRequest::DeleteResume { project_id, resume_id },
                )]
            }
            None => Vec::new(),
        }
    }

    fn email_sent(&mut self, outcome: &Outcome) {
        match decode_lenient::<EmailReply>(outcome) {
            Ok(reply) if reply.success => self.modals.finish_sending(
                "Success",
                reply.message.unwrap_or_else(|| "Email sent successfully.".to_string()),
                NoticeKind::Success,
            ),
            Ok(reply) => self.modals.finish_sending(
                "Failed",
                reply.message.unwrap_or_else(|| "Failed to send email.".to_string()),
                NoticeKind::Error,
            ),
            Err(Error::Network(reason)) => {
                tracing::warn!("Email request failed: {}", reason);
                self.modals.finish_sending(
                    "Error",
                    "Failed to send email. Please check your network connection and try again.",
                    NoticeKind::Error,
                );
            }
            Err(e) => self
                .modals
                .finish_sending("Failed", e.message_or("Failed to send email."), NoticeKind::Error),
        }
    }

    fn resume_deleted(&mut self, outcome: &Outcome, project_id: String, return_to: Page) -> Vec<Effect> {
        match decode::<DeleteReply>(outcome) {
            Ok(reply) if reply.success => {
                vec![self.call(Pending::RefreshProject { return_to }, ApiRequest::GetProject { id: project_id })]
            }
            Ok(reply) => {
                let message = reply.error.unwrap_or_else(|| "Could not delete resume".to_string());
                self.modals.show_error("Delete Failed", message);
                Vec::new()
            }
            Err(e) => {
                self.report(&e, "Delete Failed", "Could not delete resume", "Delete request failed: ");
                Vec::new()
            }
        }
    }

    fn project_refreshed(&mut self, outcome: &Outcome, return_to: Page) -> Vec<Effect> {
        match decode::<ProjectReply>(outcome) {
            Ok(ProjectReply { project: Some(project) }) => {
                self.session.open_project(project);
                if self.router.current() == return_to {
                    self.go(return_to)
                } else {
                    Vec::new()
                }
            }
            Ok(_) => {
                self.modals.show_error("Error", "Failed to refresh project");
                Vec::new()
            }
            Err(e) => {
                self.report(&e, "Error", "Failed to refresh project", "Failed to refresh project: ");
                Vec::new()
            }
        }
    }

    fn compare(&mut self, request: CompareRequest) -> Vec<Effect> {
        let candidates = self.session.candidates();
        let count = candidates.len();

        if let CompareRequest::Uploaded { file, base } = request {
            let job_description = match self.session.job_description().trim() {
                "" => self
                    .session
                    .project()
                    .and_then(Project::description)
                    .unwrap_or_default()
                    .to_string(),
                jd => jd.to_string(),
            };
            if job_description.is_empty() {
                self.modals.show_error(
                    "Missing JD",
                    "Please provide a job description in the Upload or Gmail page before comparing with an uploaded resume.",
                );
                return Vec::new();
            }
            let base = base
                .and_then(|i| candidates.get(i))
                .or_else(|| candidates.first())
                .cloned();
            return vec![self.call(
                Pending::CompareUpload { base },
                ApiRequest::UploadResume {
                    project_id: None,
                    job_description,
                    file,
                },
            )];
        }

        if count < 2 {
            self.modals
                .show_info("Not enough resumes", "Need at least 2 resumes to compare.", NoticeKind::Info);
            return Vec::new();
        }

        let (left, right) = match request {
            CompareRequest::Random { seed } => {
                let mut rng = SmallRng::seed_from_u64(seed);
                let a = rng.gen_range(0..count);
                let mut b = rng.gen_range(0..count - 1);
                if b >= a {
                    b += 1;
                }
                (a, b)
            }
            CompareRequest::Top => (0, 1),
            CompareRequest::Pair(a, b) if a == b => return Vec::new(),
            CompareRequest::Pair(a, b) => (a, b),
            CompareRequest::Uploaded { .. } => return Vec::new(),
        };

        let left = candidates.get(left).cloned();
        let right = candidates.get(right).cloned();
        self.modals.show_comparison(left, right);
        Vec::new()
    }

    fn compare_uploaded(&mut self, outcome: &Outcome, base: Option<Candidate>) {
        match decode::<CandidatesReply>(outcome) {
            Ok(reply) => match reply.candidates.into_iter().next() {
                Some(uploaded) => {
                    self.modals.show_comparison(base, Some(uploaded));
                }
                None => self
                    .modals
                    .show_error("Analysis failed", "Could not analyze uploaded file."),
            },
            Err(e) => self.report(&e, "Analysis failed", "Could not analyze uploaded file.", "Failed to upload file: "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawResponse;
    use crate::session::MemoryStorage;

    fn controller() -> Controller<MemoryStorage> {
        Controller::new(ClientConfig::default(), MemoryStorage::new())
    }

    fn calls(effects: &[Effect]) -> Vec<&Call> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Call(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    fn ok(body: &str) -> Outcome {
        Ok(RawResponse::new(200, body))
    }

    fn scored(id: &str, score: u32) -> Candidate {
        let mut c = Candidate {
            id: id.into(),
            name: Some(format!("Candidate {}", id)),
            ..Default::default()
        };
        c.sections.ats_score = Some(score.to_string());
        c
    }

    fn info_title(controller: &Controller<MemoryStorage>) -> Option<String> {
        match controller.modals().current() {
            Some(Modal::Info { title, .. }) => Some(title.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_start_renders_initial_page() {
        let mut c = controller();
        let effects = c.handle(Intent::Start {
            fragment: "#results".into(),
        });
        assert!(matches!(&effects[0], Effect::Render(t) if t.to == Page::Results));
        assert_eq!(c.page(), Page::Results);
    }

    #[test]
    fn test_entering_upload_loads_project_options() {
        let mut c = controller();
        let effects = c.handle(Intent::Navigate("upload".into()));
        let calls = calls(&effects);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].request, ApiRequest::ListProjects);

        c.complete(calls[0].ticket, ok(r#"{"projects": [{"id": "p1", "title": "Backend"}]}"#));
        assert_eq!(c.projects().len(), 1);
        assert_eq!(c.in_flight(), 0);
    }

    #[test]
    fn test_project_options_failure_is_silent() {
        let mut c = controller();
        let effects = c.handle(Intent::Navigate("gmail".into()));
        let ticket = calls(&effects)[0].ticket;
        c.complete(ticket, Err("offline".into()));
        assert!(!c.modals().is_open());
    }

    #[test]
    fn test_open_project_list_states() {
        let mut c = controller();
        let effects = c.handle(Intent::Navigate("open_project".into()));
        assert_eq!(c.project_list(), ListState::Loading);
        c.complete(calls(&effects)[0].ticket, Ok(RawResponse::new(500, "")));
        assert_eq!(c.project_list(), ListState::Failed);
    }

    #[test]
    fn test_create_project_default_title_and_guard() {
        let mut c = controller();
        let effects = c.handle(Intent::CreateProject {
            title: "  ".into(),
            description: "JD".into(),
        });
        let call = calls(&effects)[0].clone();
        assert_eq!(
            call.request,
            ApiRequest::CreateProject {
                title: DEFAULT_PROJECT_TITLE.into(),
                description: "JD".into()
            }
        );
        assert!(c.is_creating_project());
        assert!(c
            .handle(Intent::CreateProject {
                title: "again".into(),
                description: String::new()
            })
            .is_empty());

        let effects = c.complete(call.ticket, ok(r#"{"project": {"id": "p1", "title": "New Recruitment"}}"#));
        assert!(!c.is_creating_project());
        assert_eq!(info_title(&c).as_deref(), Some("Project Created"));
        assert_eq!(c.page(), Page::OpenProject);
        assert_eq!(calls(&effects).len(), 1);
    }

    #[test]
    fn test_open_project_activate() {
        let mut c = controller();
        let effects = c.handle(Intent::OpenProject {
            id: "p1".into(),
            mode: OpenMode::Activate,
        });
        let ticket = calls(&effects)[0].ticket;
        c.complete(
            ticket,
            ok(r#"{"project": {"id": "p1", "title": "Data", "resumes": [{"id": "r1"}]}}"#),
        );
        assert_eq!(c.page(), Page::Upload);
        assert_eq!(c.session().project_id(), Some("p1"));
        assert_eq!(c.session().candidates().len(), 1);
        match c.modals().current() {
            Some(Modal::Info { message, .. }) => assert_eq!(message, "Project \"Data\" is now active."),
            other => panic!("unexpected modal: {:?}", other),
        }
    }

    #[test]
    fn test_upload_validation() {
        let mut c = controller();
        let effects = c.handle(Intent::SubmitUpload {
            job_description: " ".into(),
            file: Some(ResumeFile::new("cv.pdf", "application/pdf", vec![1])),
            project_id: None,
        });
        assert!(effects.is_empty());
        assert_eq!(info_title(&c).as_deref(), Some("Validation Error"));

        let effects = c.handle(Intent::SubmitUpload {
            job_description: "JD".into(),
            file: None,
            project_id: None,
        });
        assert!(effects.is_empty());
        assert!(!c.is_analyzing());
    }

    #[test]
    fn test_validate_upload_checks_description_first() {
        let file = ResumeFile::new("cv.pdf", "application/pdf", vec![1]);
        match validate_upload("  ", None) {
            Err(Error::Validation(message)) => assert_eq!(message, MISSING_JD),
            other => panic!("unexpected result: {:?}", other),
        }
        match validate_upload("JD", None) {
            Err(Error::Validation(message)) => assert_eq!(message, "Please select a resume file to continue."),
            other => panic!("unexpected result: {:?}", other),
        }
        let (jd, checked) = validate_upload("  Rust engineer ", Some(file.clone())).unwrap();
        assert_eq!(jd, "Rust engineer");
        assert_eq!(checked, file);
    }

    #[test]
    fn test_unreadable_file_shows_error() {
        let mut c = controller();
        c.handle(Intent::Navigate("upload".into()));
        let effects = c.handle(Intent::FileUnreadable {
            file_name: "cv.pdf".into(),
            reason: "NotReadableError".into(),
        });
        assert!(effects.is_empty());
        assert_eq!(c.page(), Page::Upload);
        match c.modals().current() {
            Some(Modal::Info { title, message, kind }) => {
                assert_eq!(title, "File Error");
                assert!(message.contains("cv.pdf"));
                assert_eq!(*kind, NoticeKind::Error);
            }
            other => panic!("unexpected modal: {:?}", other),
        }
    }

    #[test]
    fn test_gmail_requires_role() {
        let mut c = controller();
        c.handle(Intent::SubmitGmailFetch {
            job_role: "".into(),
            job_description: "JD".into(),
            project_id: None,
        });
        match c.modals().current() {
            Some(Modal::Info { message, .. }) => assert_eq!(message, "Please enter a Job Role to continue."),
            other => panic!("unexpected modal: {:?}", other),
        }
    }

    #[test]
    fn test_gmail_fetch_uses_days_filter() {
        let mut c = controller();
        let effects = c.handle(Intent::SubmitGmailFetch {
            job_role: "Backend".into(),
            job_description: "Rust".into(),
            project_id: Some(String::new()),
        });
        assert_eq!(c.page(), Page::Loading);
        let call = calls(&effects)
            .into_iter()
            .find(|call| matches!(call.request, ApiRequest::FetchResumes(_)))
            .unwrap();
        match &call.request {
            ApiRequest::FetchResumes(req) => {
                assert_eq!(req.days_filter, 30);
                assert_eq!(req.project_id, None);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_compare_not_enough() {
        let mut c = controller();
        c.session_mut().set_candidates(vec![scored("a", 10)]);
        c.handle(Intent::Compare(CompareRequest::Top));
        assert_eq!(info_title(&c).as_deref(), Some("Not enough resumes"));
    }

    #[test]
    fn test_compare_random_picks_distinct() {
        let mut c = controller();
        c.session_mut().set_candidates(vec![scored("a", 10), scored("b", 20), scored("c", 30)]);
        for seed in 0..20 {
            c.handle(Intent::Compare(CompareRequest::Random { seed }));
            match c.modals().current() {
                Some(Modal::Comparison { left, right }) => assert_ne!(left.id, right.id),
                other => panic!("unexpected modal: {:?}", other),
            }
        }
    }

    #[test]
    fn test_compare_top_and_same_pair() {
        let mut c = controller();
        c.session_mut().set_candidates(vec![scored("a", 10), scored("b", 90), scored("c", 50)]);
        c.handle(Intent::Compare(CompareRequest::Top));
        match c.modals().current() {
            Some(Modal::Comparison { left, right }) => {
                assert_eq!(left.id, "b");
                assert_eq!(right.id, "c");
            }
            other => panic!("unexpected modal: {:?}", other),
        }

        c.handle(Intent::CloseModal);
        c.handle(Intent::Compare(CompareRequest::Pair(1, 1)));
        assert!(!c.modals().is_open());
    }

    #[test]
    fn test_compare_upload_requires_jd() {
        let mut c = controller();
        let effects = c.handle(Intent::Compare(CompareRequest::Uploaded {
            file: ResumeFile::new("x.pdf", "application/pdf", vec![]),
            base: None,
        }));
        assert!(effects.is_empty());
        assert_eq!(info_title(&c).as_deref(), Some("Missing JD"));
    }

    #[test]
    fn test_chat_apology_on_network_error() {
        let mut c = controller();
        let effects = c.handle(Intent::SendChat("hello".into()));
        let ticket = calls(&effects)[0].ticket;
        c.complete(ticket, Err("offline".into()));
        assert_eq!(c.chat().messages().len(), 2);
        assert_eq!(c.chat().messages()[1].text, crate::chat::CHAT_APOLOGY);
    }

    #[test]
    fn test_reauthenticate_opens_external() {
        let mut c = Controller::new(ClientConfig::with_base_url("http://api.local"), MemoryStorage::new());
        assert_eq!(
            c.handle(Intent::Reauthenticate),
            vec![Effect::OpenExternal("http://api.local/authenticate".into())]
        );
    }

    #[test]
    fn test_unknown_ticket_ignored() {
        let mut c = controller();
        assert!(c.complete(Ticket(99), ok("{}")).is_empty());
    }
}
