//! ハッシュルーター
//!
//! URLフラグメント（`#upload` など）とページの対応、画面遷移、
//! 装飾アニメーション（タイムライン）の世代管理を行う。
//! 描画は行わず、遷移内容を `Transition` として返すだけ。

use std::fmt;

/// ページ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Landing,
    Upload,
    Gmail,
    Loading,
    NewProject,
    OpenProject,
    ProjectView,
    Results,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Landing,
        Page::Upload,
        Page::Gmail,
        Page::Loading,
        Page::NewProject,
        Page::OpenProject,
        Page::ProjectView,
        Page::Results,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::Upload => "upload",
            Page::Gmail => "gmail",
            Page::Loading => "loading",
            Page::NewProject => "new_project",
            Page::OpenProject => "open_project",
            Page::ProjectView => "project_view",
            Page::Results => "results",
        }
    }

    pub fn from_id(id: &str) -> Option<Page> {
        Page::ALL.iter().copied().find(|p| p.id() == id)
    }

    pub fn fragment(&self) -> String {
        format!("#{}", self.id())
    }

    /// 装飾タイムラインを持つページ
    pub fn has_timeline(&self) -> bool {
        matches!(self, Page::Upload | Page::Loading)
    }

    /// チャットウィジェットはトップのみ
    pub fn shows_chat(&self) -> bool {
        matches!(self, Page::Landing)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

pub const UPLOAD_SCENES: usize = 5;
pub const UPLOAD_SCENE_INTERVAL_MS: u32 = 2600;
pub const LOADING_STEPS: usize = 4;
pub const LOADING_STEP_INTERVAL_MS: u32 = 3000;

/// 画面遷移1回分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: Page,
    pub to: Page,
    /// 書き込むURLフラグメント
    pub fragment: String,
    /// 未知のページIDから `landing` に振り替えた場合の元ID
    pub redirected_from: Option<String>,
    /// 停止するタイムラインの世代
    pub cancel_timeline: Option<u64>,
    /// 開始するタイムラインの世代
    pub start_timeline: Option<u64>,
}

impl Transition {
    /// タイムラインのtick間隔
    pub fn timeline_interval_ms(&self) -> Option<u32> {
        self.start_timeline?;
        match self.to {
            Page::Upload => Some(UPLOAD_SCENE_INTERVAL_MS),
            Page::Loading => Some(LOADING_STEP_INTERVAL_MS),
            _ => None,
        }
    }
}

/// ルーター本体
#[derive(Debug, Clone)]
pub struct Router {
    current: Page,
    generation: u64,
    timeline_live: bool,
    frame: usize,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Page::Landing,
            generation: 0,
            timeline_live: false,
            frame: 0,
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 現在のシーン番号（upload）またはステップ番号（loading）
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// 起動時: フラグメントから初期ページへ
    pub fn start(&mut self, fragment: &str) -> Transition {
        self.navigate(strip_hash(fragment))
    }

    /// ページIDへ遷移（同じページでも再描画する）
    pub fn navigate(&mut self, id: &str) -> Transition {
        let (to, redirected_from) = match Page::from_id(id) {
            Some(page) => (page, None),
            None => {
                tracing::warn!("Unknown page '{}', redirecting to landing", id);
                (Page::Landing, Some(id.to_string()))
            }
        };
        self.go(to, redirected_from)
    }

    pub fn navigate_to(&mut self, page: Page) -> Transition {
        self.go(page, None)
    }

    /// hashchange 由来の遷移。現在ページと同じなら何もしない
    pub fn sync_fragment(&mut self, fragment: &str) -> Option<Transition> {
        let id = strip_hash(fragment);
        if Page::from_id(id) == Some(self.current) {
            return None;
        }
        Some(self.navigate(id))
    }

    /// タイムラインを1コマ進める。世代が古いtickは無視してfalse
    pub fn tick(&mut self, generation: u64) -> bool {
        if !self.timeline_live || generation != self.generation {
            tracing::debug!("Stale timeline tick {} (current {})", generation, self.generation);
            return false;
        }
        match self.current {
            Page::Upload => {
                self.frame = (self.frame + 1) % UPLOAD_SCENES;
                true
            }
            Page::Loading => {
                if self.frame + 1 < LOADING_STEPS {
                    self.frame += 1;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn go(&mut self, to: Page, redirected_from: Option<String>) -> Transition {
        let from = self.current;
        let cancel_timeline = self.timeline_live.then_some(self.generation);

        self.generation += 1;
        self.current = to;
        self.frame = 0;
        self.timeline_live = to.has_timeline();
        let start_timeline = self.timeline_live.then_some(self.generation);

        tracing::debug!("Route {} -> {}", from, to);
        Transition {
            from,
            to,
            fragment: to.fragment(),
            redirected_from,
            cancel_timeline,
            start_timeline,
        }
    }
}

fn strip_hash(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

/// タイマーなどの停止可能なハンドル
pub trait Cancel {
    fn cancel(self);
}

/// 生きているタイマーを高々1つ保持する
#[derive(Debug)]
pub struct AnimationSlot<H: Cancel> {
    live: Option<(u64, H)>,
}

impl<H: Cancel> Default for AnimationSlot<H> {
    fn default() -> Self {
        Self { live: None }
    }
}

impl<H: Cancel> AnimationSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直前のハンドルを同期的に停止してから差し替える
    pub fn replace(&mut self, generation: u64, handle: H) {
        self.cancel();
        self.live = Some((generation, handle));
    }

    pub fn cancel(&mut self) {
        if let Some((_, handle)) = self.live.take() {
            handle.cancel();
        }
    }

    /// 指定世代のハンドルだけを停止
    pub fn cancel_generation(&mut self, generation: u64) {
        if matches!(self.live, Some((g, _)) if g == generation) {
            self.cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.live.is_some()
    }

    pub fn generation(&self) -> Option<u64> {
        self.live.as_ref().map(|(g, _)| *g)
    }
}
