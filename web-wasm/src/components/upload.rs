//! 履歴書アップロードページ

use leptos::prelude::*;
use leptos::task::spawn_local;
use resume_ai_common::api::ResumeFile;
use resume_ai_common::router::UPLOAD_SCENES;
use resume_ai_common::Intent;
use web_sys::{DragEvent, HtmlInputElement};

use crate::components::{footer::Footer, header::Header, project_select::ProjectSelect};
use crate::dispatch::Dispatcher;

const SCENES: [(&str, &str); UPLOAD_SCENES] = [
    ("fa-cloud-upload-alt", "Upload a resume"),
    ("fa-database", "Stored securely"),
    ("fa-robot", "AI reviews skills and experience"),
    ("fa-chart-bar", "Get a match score"),
    ("fa-brain", "ResumeAI"),
];

/// 選択されたファイルを読み込んでシグナルに入れる。読めなければエラーモーダル
pub fn load_file(
    dispatcher: Dispatcher,
    file: web_sys::File,
    target: RwSignal<Option<ResumeFile>>,
    reading: RwSignal<bool>,
) {
    let name = file.name();
    let content_type = file.type_();
    let file = gloo::file::File::from(file);
    reading.set(true);
    spawn_local(async move {
        match gloo::file::futures::read_as_bytes(&file).await {
            Ok(bytes) => {
                tracing::debug!("Read {} ({} bytes)", name, bytes.len());
                target.set(Some(ResumeFile::new(name, content_type, bytes)));
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", name, e);
                target.set(None);
                dispatcher.send(Intent::FileUnreadable {
                    file_name: name,
                    reason: e.to_string(),
                });
            }
        }
        reading.set(false);
    });
}

#[component]
pub fn UploadPage() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let job_description =
        RwSignal::new(model.with_untracked(|m| m.session().job_description().to_string()));
    let file = RwSignal::new(None::<ResumeFile>);
    let reading = RwSignal::new(false);
    let project_id = RwSignal::new(String::new());
    let is_dragover = RwSignal::new(false);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let scene = Memo::new(move |_| model.with(|m| m.router().frame()));
    let analyzing = Memo::new(move |_| model.with(|m| m.is_analyzing()));

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        is_dragover.set(false);
        if let Some(f) = ev.data_transfer().and_then(|dt| dt.files()).and_then(|list| list.get(0)) {
            load_file(dispatcher, f, file, reading);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        is_dragover.set(true);
    };

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(f) = input.files().and_then(|list| list.get(0)) {
            load_file(dispatcher, f, file, reading);
        }
    };

    let on_analyze = move |_| {
        let project_id = project_id.get_untracked();
        dispatcher.send(Intent::SubmitUpload {
            job_description: job_description.get_untracked(),
            file: file.get_untracked(),
            project_id: (!project_id.is_empty()).then_some(project_id),
        });
    };

    view! {
        <div class="container mx-auto fade-in-up">
            <Header show_back=true />
            <main class="py-8 grid grid-cols-1 lg:grid-cols-2 gap-12 items-start">
                <div class="upload-animation">
                    {SCENES
                        .iter()
                        .enumerate()
                        .map(|(i, (icon, text))| {
                            view! {
                                <div class="scene" class:active=move || scene.get() == i>
                                    <i class=format!("fas {} text-5xl text-primary-orange", icon)></i>
                                    <p class="scene-text">{*text}</p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>

                <div class="bg-card p-8 rounded-xl shadow-lg">
                    <h2 class="text-2xl font-bold text-heading mb-6">"Upload Resume for Analysis"</h2>
                    <label class="block text-sm font-medium text-muted mb-2">"Job Description"</label>
                    <textarea
                        class="input-field w-full p-3 rounded mb-6"
                        rows="6"
                        placeholder="Paste the job description here..."
                        prop:value=move || job_description.get()
                        on:input=move |ev| job_description.set(event_target_value(&ev))
                    ></textarea>

                    <div
                        class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                        on:drop=on_drop
                        on:dragover=on_dragover
                        on:dragleave=move |_| is_dragover.set(false)
                        on:click=move |_| {
                            if let Some(input) = file_input.get() {
                                input.click();
                            }
                        }
                    >
                        <i class="fas fa-file-pdf text-4xl text-primary-orange mb-4"></i>
                        <p>"Drag & drop a resume here, or click to browse"</p>
                        <p class="text-sm text-muted">"PDF files"</p>
                        <input
                            type="file"
                            accept=".pdf"
                            class="hidden"
                            node_ref=file_input
                            on:change=on_change
                        />
                    </div>

                    <p class="upload-status mt-4 text-sm">
                        {move || {
                            if reading.get() {
                                "Reading file...".to_string()
                            } else {
                                file.with(|f| f.as_ref().map(|f| format!("File selected: {}", f.file_name)))
                                    .unwrap_or_default()
                            }
                        }}
                    </p>

                    <ProjectSelect
                        selected=project_id
                        none_label="(None) - upload without project"
                        preselect=true
                    />

                    <button
                        class="btn-primary w-full mt-6"
                        disabled=move || analyzing.get() || reading.get()
                        on:click=on_analyze
                    >
                        <i class="fas fa-magic mr-2"></i>
                        "Analyze Resume"
                    </button>
                </div>
            </main>
            <Footer />
        </div>
    }
}
