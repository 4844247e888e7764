//! 解析結果ページ

use leptos::prelude::*;

use crate::components::{candidate_grid::CandidateGrid, footer::Footer, header::Header};
use crate::dispatch::Dispatcher;

#[component]
pub fn ResultsPage() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let summary = Memo::new(move |_| {
        model.with(|m| {
            let count = m.session().candidates().len();
            match m.session().project() {
                Some(p) => format!("Project: {} | Resumes: {}", p.title, count),
                None => format!("Resumes: {}", count),
            }
        })
    });

    view! {
        <div class="container mx-auto fade-in-up">
            <Header show_back=true />
            <main class="py-8">
                <div class="flex justify-between items-center mb-6">
                    <h2 class="text-2xl font-bold text-heading">"Candidate Evaluations"</h2>
                    <span class="text-muted">{move || summary.get()}</span>
                </div>
                <CandidateGrid empty_text="No candidates to display." />
            </main>
            <Footer />
        </div>
    }
}
