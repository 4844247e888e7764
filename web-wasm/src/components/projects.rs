//! プロジェクト作成・一覧ページ

use leptos::prelude::*;
use resume_ai_common::controller::{ListState, OpenMode};
use resume_ai_common::Intent;

use crate::components::{footer::Footer, header::Header};
use crate::dispatch::Dispatcher;

#[component]
pub fn NewProjectPage() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let creating = Memo::new(move |_| model.with(|m| m.is_creating_project()));

    let on_create = move |_| {
        dispatcher.send(Intent::CreateProject {
            title: title.get_untracked(),
            description: description.get_untracked(),
        });
    };

    view! {
        <div class="container mx-auto fade-in-up">
            <Header show_back=true />
            <main class="py-8 max-w-2xl mx-auto">
                <div class="bg-card p-8 rounded-xl shadow-lg">
                    <h2 class="text-2xl font-bold text-heading mb-6">"Create New Recruitment"</h2>

                    <label class="block text-sm font-medium text-muted mb-2">"Title"</label>
                    <input
                        type="text"
                        class="input-field w-full p-3 rounded mb-6"
                        placeholder="e.g. Senior Frontend Engineer 2026"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />

                    <label class="block text-sm font-medium text-muted mb-2">"Description"</label>
                    <textarea
                        class="input-field w-full p-3 rounded"
                        rows="5"
                        placeholder="Job description for this recruitment"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>

                    <div class="flex justify-end space-x-4 mt-6">
                        <button class="btn-secondary" on:click=move |_| dispatcher.navigate("landing")>
                            "Cancel"
                        </button>
                        <button
                            class="btn-primary"
                            disabled=move || creating.get()
                            on:click=on_create
                        >
                            {move || if creating.get() { "Creating..." } else { "Create" }}
                        </button>
                    </div>
                </div>
            </main>
            <Footer />
        </div>
    }
}

#[component]
pub fn OpenProjectPage() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let state = Memo::new(move |_| model.with(|m| m.project_list()));
    let projects = Memo::new(move |_| model.with(|m| m.projects().to_vec()));

    let list = move || match state.get() {
        ListState::Idle | ListState::Loading => view! {
            <p class="text-muted text-center">"Loading projects..."</p>
        }
        .into_any(),
        ListState::Failed => view! {
            <p class="text-red-500 text-center">"Failed to load projects."</p>
        }
        .into_any(),
        ListState::Loaded if projects.with(|p| p.is_empty()) => view! {
            <p class="text-muted text-center">"No projects found. Create one from the landing page."</p>
        }
        .into_any(),
        ListState::Loaded => view! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <For
                    each=move || projects.get()
                    key=|p| p.id.clone()
                    children=move |project| {
                        let open_id = project.id.clone();
                        let view_id = project.id.clone();
                        let description = project
                            .description()
                            .unwrap_or("No description")
                            .to_string();
                        view! {
                            <div class="project-card bg-card p-6 rounded-xl shadow">
                                <h3 class="text-xl font-bold text-heading">{project.title.clone()}</h3>
                                <p class="text-muted text-sm mt-2">{description}</p>
                                <p class="text-sm mt-2">
                                    {format!("{} resumes", project.resumes.len())}
                                </p>
                                <div class="flex space-x-2 mt-4">
                                    <button
                                        class="btn-primary"
                                        on:click=move |_| dispatcher.send(Intent::OpenProject {
                                            id: open_id.clone(),
                                            mode: OpenMode::Activate,
                                        })
                                    >
                                        "Open"
                                    </button>
                                    <button
                                        class="btn-secondary"
                                        on:click=move |_| dispatcher.send(Intent::OpenProject {
                                            id: view_id.clone(),
                                            mode: OpenMode::View,
                                        })
                                    >
                                        "View"
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        }
        .into_any(),
    };

    view! {
        <div class="container mx-auto fade-in-up">
            <Header show_back=true />
            <main class="py-8">
                <h2 class="text-2xl font-bold text-heading mb-6">"Open Existing Recruitment"</h2>
                {list}
            </main>
            <Footer />
        </div>
    }
}
