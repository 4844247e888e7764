//! メインアプリケーションコンポーネント

use gloo::events::EventListener;
use leptos::prelude::*;
use resume_ai_common::router::Page;
use resume_ai_common::{ClientConfig, Intent};

use crate::components::{
    chat::ChatWidget,
    gmail::GmailPage,
    landing::LandingPage,
    loading::LoadingPage,
    modal::ModalHost,
    project_view::ProjectViewPage,
    projects::{NewProjectPage, OpenProjectPage},
    results::ResultsPage,
    upload::UploadPage,
};
use crate::dispatch::Dispatcher;

/// ビルド時に `RESUME_AI_API_BASE` で接続先を指定（未指定なら同一オリジン）
fn client_config() -> ClientConfig {
    ClientConfig::with_base_url(option_env!("RESUME_AI_API_BASE").unwrap_or_default())
}

fn current_fragment() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

#[component]
pub fn App() -> impl IntoView {
    let dispatcher = Dispatcher::new(client_config());
    provide_context(dispatcher);
    let model = dispatcher.model();

    let page = Memo::new(move |_| model.with(|m| m.page()));
    // 同じページへの再遷移でも作り直す
    let generation = Memo::new(move |_| model.with(|m| m.router().generation()));
    let theme = Memo::new(move |_| model.with(|m| m.session().theme()));

    Effect::new(move |_| {
        let theme = theme.get();
        if let Some(body) = gloo::utils::document().body() {
            let classes = body.class_list();
            if let Err(e) = classes.remove_2("light-theme", "dark-theme") {
                tracing::warn!("Failed to clear theme class: {:?}", e);
            }
            if let Err(e) = classes.add_1(theme.css_class()) {
                tracing::warn!("Failed to apply theme class: {:?}", e);
            }
        }
    });

    // 戻る・進む、手入力のフラグメント変更
    EventListener::new(&gloo::utils::window(), "hashchange", move |_| {
        dispatcher.send(Intent::HashChanged(current_fragment()));
    })
    .forget();

    dispatcher.send(Intent::Start {
        fragment: current_fragment(),
    });

    view! {
        <div id="app">
            {move || {
                generation.track();
                match page.get() {
                    Page::Landing => view! { <LandingPage /> }.into_any(),
                    Page::Upload => view! { <UploadPage /> }.into_any(),
                    Page::Gmail => view! { <GmailPage /> }.into_any(),
                    Page::Loading => view! { <LoadingPage /> }.into_any(),
                    Page::NewProject => view! { <NewProjectPage /> }.into_any(),
                    Page::OpenProject => view! { <OpenProjectPage /> }.into_any(),
                    Page::ProjectView => view! { <ProjectViewPage /> }.into_any(),
                    Page::Results => view! { <ResultsPage /> }.into_any(),
                }
            }}
            <ModalHost />
            <Show when=move || page.get().shows_chat()>
                <ChatWidget />
            </Show>
        </div>
    }
}
