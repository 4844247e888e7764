//! トップページ

use leptos::prelude::*;

use crate::components::{footer::Footer, header::Header};
use crate::dispatch::Dispatcher;

#[component]
pub fn LandingPage() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();

    view! {
        <div class="container mx-auto fade-in-up">
            <Header />
            <main class="text-center py-16">
                <div class="hero-section">
                    <div class="hero-content">
                        <h1 class="hero-title">
                            "AI-Powered Resume Evaluation for "
                            <span class="text-primary-orange">"Smarter Hiring"</span>
                        </h1>
                        <p class="hero-subtitle">
                            "Upload a resume or connect your Gmail to get an instant AI-powered analysis of qualifications, skills, and job fit."
                        </p>
                        <div class="hero-buttons">
                            <button class="btn-primary" on:click=move |_| dispatcher.navigate("upload")>
                                <i class="fas fa-cloud-upload-alt mr-2"></i>
                                "Upload Resume"
                            </button>
                            <button class="btn-secondary" on:click=move |_| dispatcher.navigate("gmail")>
                                <i class="fas fa-envelope-open-text mr-2"></i>
                                "Fetch from Gmail"
                            </button>
                        </div>
                        <div class="mt-6 flex justify-center space-x-4">
                            <button class="btn-primary" on:click=move |_| dispatcher.navigate("new_project")>
                                <i class="fas fa-plus mr-2"></i>
                                "New Recruitment"
                            </button>
                            <button class="btn-secondary" on:click=move |_| dispatcher.navigate("open_project")>
                                <i class="fas fa-folder-open mr-2"></i>
                                "Open Recruitment"
                            </button>
                        </div>
                    </div>
                </div>
            </main>
            <Footer />
        </div>
    }
}
