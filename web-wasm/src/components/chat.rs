//! アシスタントチャット

use leptos::prelude::*;
use resume_ai_common::Intent;

use crate::dispatch::Dispatcher;

#[component]
pub fn ChatWidget() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let open = Memo::new(move |_| model.with(|m| m.chat().is_open()));
    let waiting = Memo::new(move |_| model.with(|m| m.chat().is_waiting()));
    let messages = Memo::new(move |_| model.with(|m| m.chat().messages().to_vec()));
    let draft = RwSignal::new(String::new());

    let send = move || {
        let text = draft.get_untracked();
        if !text.trim().is_empty() {
            draft.set(String::new());
            dispatcher.send(Intent::SendChat(text));
        }
    };

    view! {
        <div class="chat-widget fixed bottom-6 right-6 z-40">
            <Show when=move || open.get()>
                <div class="chat-popup bg-card rounded-xl shadow-xl mb-4 w-80 flex flex-col">
                    <div class="chat-header p-3 font-bold text-heading">"ResumeAI Assistant"</div>
                    <div class="chat-messages p-3 space-y-2 overflow-y-auto h-72">
                        {move || {
                            messages
                                .get()
                                .into_iter()
                                .map(|m| {
                                    view! { <div class=m.role.css_class() inner_html=m.html()></div> }
                                })
                                .collect_view()
                        }}
                        <Show when=move || waiting.get()>
                            <div class="message assistant-message typing">
                                <i class="fas fa-circle-notch fa-spin"></i>
                            </div>
                        </Show>
                    </div>
                    <div class="chat-input flex p-2 space-x-2">
                        <input
                            type="text"
                            class="input-field flex-1 p-2 rounded"
                            placeholder="Ask about your candidates..."
                            prop:value=move || draft.get()
                            on:input=move |ev| draft.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    ev.prevent_default();
                                    send();
                                }
                            }
                        />
                        <button class="btn-primary" on:click=move |_| send()>
                            <i class="fas fa-paper-plane"></i>
                        </button>
                    </div>
                </div>
            </Show>
            <button
                class="chat-toggle btn-primary rounded-full w-14 h-14 shadow-lg"
                title="Assistant"
                on:click=move |_| dispatcher.send(Intent::ToggleChat)
            >
                <i class=move || if open.get() { "fas fa-times" } else { "fas fa-comments" }></i>
            </button>
        </div>
    }
}
