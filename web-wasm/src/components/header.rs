//! ヘッダーコンポーネント

use leptos::prelude::*;
use resume_ai_common::session::Theme;
use resume_ai_common::Intent;

use crate::dispatch::Dispatcher;

#[component]
pub fn Header(#[prop(optional)] show_back: bool) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();
    let dark = Memo::new(move |_| model.with(|m| m.session().theme() == Theme::Dark));

    view! {
        <header class="flex justify-between items-center py-4 md:py-8 px-4">
            <a
                href="#landing"
                class="flex items-center space-x-2 text-xl font-bold text-white bg-black p-3 rounded-lg hover:opacity-90 transition"
                on:click=move |ev| {
                    ev.prevent_default();
                    dispatcher.navigate("landing");
                }
            >
                <i class="fas fa-brain"></i>
                <span>"ResumeAI"</span>
            </a>

            <div class="flex items-center space-x-4">
                <Show when=move || show_back>
                    <button
                        class="text-muted hover:text-primary-orange transition-colors"
                        on:click=move |_| dispatcher.navigate("landing")
                    >
                        <i class="fas fa-arrow-left mr-2"></i>
                        "Back"
                    </button>
                </Show>
                <label class="theme-toggle relative inline-flex items-center cursor-pointer">
                    <input
                        type="checkbox"
                        class="sr-only peer"
                        prop:checked=move || dark.get()
                        on:change=move |_| dispatcher.send(Intent::ToggleTheme)
                    />
                    <div class="toggle-track"></div>
                    <span class="ml-3 text-sm font-medium">
                        <i class=move || if dark.get() { "fas fa-sun" } else { "fas fa-moon" }></i>
                    </span>
                </label>
            </div>
        </header>
    }
}
