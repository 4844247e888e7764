//! 画面操作の受け口
//!
//! コンポーネントは `Dispatcher::send` に `Intent` を渡すだけ。
//! コントローラーが返した副作用（描画・API呼び出し・外部リンク）はここで実行する。

use gloo::timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use resume_ai_common::api::Outcome;
use resume_ai_common::router::{AnimationSlot, Cancel, Transition};
use resume_ai_common::{ClientConfig, Controller, Effect, Intent, Ticket};

use crate::api::gateway;
use crate::storage::BrowserStorage;

pub type Model = Controller<BrowserStorage>;

/// ページの装飾アニメーション用タイマー
pub struct Ticker(Interval);

impl Cancel for Ticker {
    fn cancel(self) {
        self.0.cancel();
    }
}

#[derive(Clone, Copy)]
pub struct Dispatcher {
    model: RwSignal<Model>,
    timers: StoredValue<AnimationSlot<Ticker>, LocalStorage>,
}

impl Dispatcher {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            model: RwSignal::new(Controller::new(config, BrowserStorage)),
            timers: StoredValue::new_local(AnimationSlot::new()),
        }
    }

    pub fn model(&self) -> RwSignal<Model> {
        self.model
    }

    pub fn send(&self, intent: Intent) {
        if !matches!(intent, Intent::TimelineTick(_)) {
            tracing::debug!("Intent: {}", intent_name(&intent));
        }
        let effects = self
            .model
            .try_update(|model| model.handle(intent))
            .unwrap_or_default();
        self.run(effects);
    }

    /// ナビゲーションの短縮形
    pub fn navigate(&self, page_id: &str) {
        self.send(Intent::Navigate(page_id.to_string()));
    }

    fn complete(&self, ticket: Ticket, outcome: Outcome) {
        let effects = self
            .model
            .try_update(|model| model.complete(ticket, outcome))
            .unwrap_or_default();
        self.run(effects);
    }

    fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Render(transition) => self.render(transition),
                Effect::Call(call) => {
                    let this = *self;
                    let base_url = self.model.with_untracked(|m| m.config().base_url.clone());
                    spawn_local(async move {
                        let outcome = gateway::execute(&base_url, &call.request).await;
                        this.complete(call.ticket, outcome);
                    });
                }
                Effect::OpenExternal(url) => {
                    let opened = web_sys::window()
                        .map(|w| w.open_with_url_and_target(&url, "_blank"));
                    if !matches!(opened, Some(Ok(_))) {
                        tracing::warn!("Could not open {}", url);
                    }
                }
            }
        }
    }

    /// フラグメント更新とタイマーの付け替え
    fn render(&self, transition: Transition) {
        if let Some(generation) = transition.cancel_timeline {
            self.timers
                .update_value(|slot| slot.cancel_generation(generation));
        }

        if let Some(window) = web_sys::window() {
            let location = window.location();
            if location.hash().ok().as_deref() != Some(transition.fragment.as_str()) {
                if let Err(e) = location.set_hash(&transition.fragment) {
                    tracing::warn!("Failed to update fragment: {:?}", e);
                }
            }
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }

        if let (Some(generation), Some(interval_ms)) =
            (transition.start_timeline, transition.timeline_interval_ms())
        {
            let this = *self;
            let interval = Interval::new(interval_ms, move || {
                this.send(Intent::TimelineTick(generation));
            });
            self.timers
                .update_value(|slot| slot.replace(generation, Ticker(interval)));
        }
    }
}

/// ログ用（ファイル本体などを出さない）
fn intent_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::Start { .. } => "Start",
        Intent::Navigate(_) => "Navigate",
        Intent::HashChanged(_) => "HashChanged",
        Intent::TimelineTick(_) => "TimelineTick",
        Intent::ToggleTheme => "ToggleTheme",
        Intent::RefreshProjectOptions => "RefreshProjectOptions",
        Intent::CreateProject { .. } => "CreateProject",
        Intent::OpenProject { .. } => "OpenProject",
        Intent::SubmitUpload { .. } => "SubmitUpload",
        Intent::SubmitGmailFetch { .. } => "SubmitGmailFetch",
        Intent::OpenCandidate(_) => "OpenCandidate",
        Intent::SelectTab(_) => "SelectTab",
        Intent::RequestEmail(_) => "RequestEmail",
        Intent::Confirm(_) => "Confirm",
        Intent::CloseModal => "CloseModal",
        Intent::RequestDelete { .. } => "RequestDelete",
        Intent::Compare(_) => "Compare",
        Intent::FileUnreadable { .. } => "FileUnreadable",
        Intent::ToggleChat => "ToggleChat",
        Intent::SendChat(_) => "SendChat",
        Intent::Reauthenticate => "Reauthenticate",
    }
}
