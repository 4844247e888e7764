//! 解析中ページ

use leptos::prelude::*;
use resume_ai_common::controller::AnalysisSource;

use crate::components::{footer::Footer, header::Header};
use crate::dispatch::Dispatcher;

fn step_labels(source: AnalysisSource) -> [&'static str; 4] {
    match source {
        AnalysisSource::Upload => ["Reading resume", "Storing file", "AI analysis", "Preparing results"],
        AnalysisSource::Gmail => ["Scanning Gmail", "Extracting resumes", "AI analysis", "Preparing results"],
    }
}

#[component]
pub fn LoadingPage() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let source = model.with_untracked(|m| m.analysis_source());
    let step = Memo::new(move |_| model.with(|m| m.router().frame()));

    let steps = source
        .step_icons()
        .into_iter()
        .zip(step_labels(source))
        .enumerate()
        .map(|(i, (icon, label))| {
            view! {
                <div
                    class="loading-step"
                    class:active={move || step.get() >= i}
                    class:current=move || step.get() == i
                >
                    <i class=format!("fas {}", icon)></i>
                    <span>{label}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="container mx-auto fade-in-up">
            <Header />
            <main class="py-16 text-center">
                <div class="loading-spinner mx-auto mb-8"></div>
                <h2 class="text-2xl font-bold text-heading mb-2">"Analyzing Resumes..."</h2>
                <p class="text-muted mb-8">"This may take a moment. Please do not close this page."</p>
                <div class="loading-steps flex justify-center space-x-8">{steps}</div>
            </main>
            <Footer />
        </div>
    }
}
