use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="py-8 border-t border-gray-200 dark:border-gray-700 mt-16">
            <div class="container mx-auto px-4 text-center md:text-left">
                <p class="text-lg font-bold text-heading">"ResumeAI"</p>
                <p class="text-sm text-muted">"AI-powered resume analysis for smarter hiring."</p>
            </div>
        </footer>
    }
}
