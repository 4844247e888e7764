//! Gmail取り込みページ

use leptos::prelude::*;
use resume_ai_common::Intent;

use crate::components::{footer::Footer, header::Header, project_select::ProjectSelect};
use crate::dispatch::Dispatcher;

#[component]
pub fn GmailPage() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let job_role = RwSignal::new(String::new());
    let job_description =
        RwSignal::new(model.with_untracked(|m| m.session().job_description().to_string()));
    let project_id = RwSignal::new(String::new());
    let analyzing = Memo::new(move |_| model.with(|m| m.is_analyzing()));
    let days = model.with_untracked(|m| m.config().days_filter);

    let on_fetch = move |_| {
        let project_id = project_id.get_untracked();
        dispatcher.send(Intent::SubmitGmailFetch {
            job_role: job_role.get_untracked(),
            job_description: job_description.get_untracked(),
            project_id: (!project_id.is_empty()).then_some(project_id),
        });
    };

    view! {
        <div class="container mx-auto fade-in-up">
            <Header show_back=true />
            <main class="py-8 max-w-2xl mx-auto">
                <div class="bg-card p-8 rounded-xl shadow-lg">
                    <h2 class="text-2xl font-bold text-heading mb-2">"Fetch Resumes from Gmail"</h2>
                    <p class="text-muted mb-6">
                        {format!("Resumes received in the last {} days will be analyzed.", days)}
                    </p>

                    <label class="block text-sm font-medium text-muted mb-2">"Job Role"</label>
                    <input
                        type="text"
                        class="input-field w-full p-3 rounded mb-6"
                        placeholder="e.g. Backend Engineer"
                        prop:value=move || job_role.get()
                        on:input=move |ev| job_role.set(event_target_value(&ev))
                    />

                    <label class="block text-sm font-medium text-muted mb-2">"Job Description"</label>
                    <textarea
                        class="input-field w-full p-3 rounded"
                        rows="6"
                        placeholder="Paste the job description here..."
                        prop:value=move || job_description.get()
                        on:input=move |ev| job_description.set(event_target_value(&ev))
                    ></textarea>

                    <ProjectSelect
                        selected=project_id
                        none_label="(None) - do not save to project"
                        preselect=true
                    />

                    <div class="flex space-x-4 mt-6">
                        <button
                            class="btn-primary flex-1"
                            disabled=move || analyzing.get()
                            on:click=on_fetch
                        >
                            <i class="fas fa-envelope-open-text mr-2"></i>
                            "Fetch & Analyze"
                        </button>
                        <button
                            class="btn-secondary"
                            on:click=move |_| dispatcher.send(Intent::Reauthenticate)
                        >
                            <i class="fab fa-google mr-2"></i>
                            "Re-authenticate"
                        </button>
                    </div>
                </div>
            </main>
            <Footer />
        </div>
    }
}
