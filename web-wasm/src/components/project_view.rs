//! 保存済みプロジェクトの閲覧ページ

use leptos::prelude::*;
use resume_ai_common::api::ResumeFile;
use resume_ai_common::controller::CompareRequest;
use resume_ai_common::Intent;
use web_sys::HtmlInputElement;

use crate::components::{
    candidate_grid::CandidateGrid, footer::Footer, header::Header, upload::load_file,
};
use crate::dispatch::Dispatcher;

/// ランダム比較用のシード
fn random_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    now ^ (noise << 16)
}

fn parse_index(value: &str) -> Option<usize> {
    value.parse().ok()
}

#[component]
pub fn ProjectViewPage() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let project = Memo::new(move |_| {
        model.with(|m| {
            m.session()
                .project()
                .map(|p| (p.title.clone(), p.resumes.len(), p.top_resumes.len()))
        })
    });
    let options = Memo::new(move |_| model.with(|m| m.compare_options()));

    let first = RwSignal::new(String::new());
    let second = RwSignal::new(String::new());
    let upload = RwSignal::new(None::<ResumeFile>);
    let reading = RwSignal::new(false);
    let file_input = NodeRef::<leptos::html::Input>::new();

    // 2件そろったら比較する
    let compare_pair = move || {
        if let (Some(a), Some(b)) = (
            parse_index(&first.get_untracked()),
            parse_index(&second.get_untracked()),
        ) {
            dispatcher.send(Intent::Compare(CompareRequest::Pair(a, b)));
        }
    };

    // 読み込みが終わったら、選択中の1件目（なければ先頭）と比べる
    Effect::new(move |_| {
        if let Some(file) = upload.get() {
            upload.set(None);
            let base = parse_index(&first.get_untracked());
            dispatcher.send(Intent::Compare(CompareRequest::Uploaded { file, base }));
        }
    });

    let on_file = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(f) = input.files().and_then(|list| list.get(0)) {
            load_file(dispatcher, f, upload, reading);
        }
        input.set_value("");
    };

    let selector = move |selected: RwSignal<String>| {
        view! {
            <select
                class="input-field p-2 rounded"
                prop:value=move || selected.get()
                on:change=move |ev| {
                    selected.set(event_target_value(&ev));
                    compare_pair();
                }
            >
                <option value="">"(Select)"</option>
                <For
                    each=move || options.get()
                    key=|(i, label)| format!("{}:{}", i, label)
                    children=move |(i, label)| view! { <option value=i.to_string()>{label}</option> }
                />
            </select>
        }
    };

    view! {
        <div class="container mx-auto fade-in-up">
            <Header show_back=true />
            <main class="py-8">
                <div class="mb-6">
                    <h2 class="text-2xl font-bold text-heading">
                        {move || match project.get() {
                            Some((title, _, _)) => format!("Project: {}", title),
                            None => "Project".to_string(),
                        }}
                    </h2>
                    <p class="text-muted text-sm mt-1">
                        {move || {
                            project
                                .get()
                                .map(|(_, all, top)| format!("Resumes: {} | Top kept: {}", all, top))
                                .unwrap_or_default()
                        }}
                    </p>
                    <p class="text-muted mt-2">
                        "You are viewing stored evaluations for this project. Use Open Recruitment to add more resumes."
                    </p>
                </div>

                <div class="compare-controls bg-card p-4 rounded-xl shadow mb-6 space-y-4">
                    <div class="flex flex-wrap gap-2">
                        <button
                            class="btn-secondary"
                            on:click=move |_| dispatcher.send(Intent::Compare(CompareRequest::Random {
                                seed: random_seed(),
                            }))
                        >
                            <i class="fas fa-random mr-2"></i>
                            "Random Comparison"
                        </button>
                        <button
                            class="btn-secondary"
                            on:click=move |_| dispatcher.send(Intent::Compare(CompareRequest::Top))
                        >
                            <i class="fas fa-trophy mr-2"></i>
                            "Top Comparison"
                        </button>
                        <button
                            class="btn-secondary"
                            disabled=move || reading.get()
                            on:click=move |_| {
                                if let Some(input) = file_input.get() {
                                    input.click();
                                }
                            }
                        >
                            <i class="fas fa-file-upload mr-2"></i>
                            {move || if reading.get() { "Reading..." } else { "Upload & Compare" }}
                        </button>
                        <input
                            type="file"
                            accept=".pdf"
                            class="hidden"
                            node_ref=file_input
                            on:change=on_file
                        />
                    </div>
                    <div class="flex flex-wrap items-center gap-2">
                        <span class="text-sm text-muted">"Select resumes to compare:"</span>
                        {selector(first)}
                        <span class="text-muted">"vs"</span>
                        {selector(second)}
                    </div>
                </div>

                <CandidateGrid empty_text="No stored evaluations for this project." />
            </main>
            <Footer />
        </div>
    }
}
