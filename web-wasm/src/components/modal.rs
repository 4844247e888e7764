//! モーダル表示
//!
//! 表示内容は `ModalController` が持つ。ここではキーが変わるたびに描き直すだけ。

use leptos::prelude::*;
use resume_ai_common::modal::{
    comparison_panel, tab_content, ComparisonPanel, DetailTab, EmailKind, Modal, NoticeKind,
    TabContent,
};
use resume_ai_common::types::Candidate;
use resume_ai_common::Intent;

use crate::dispatch::Dispatcher;

#[component]
pub fn ModalHost() -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();
    let key = Memo::new(move |_| model.with(|m| m.modals().key()));

    move || {
        key.track();
        let modal = model.with_untracked(|m| m.modals().current().cloned());
        let Some(modal) = modal else {
            return ().into_any();
        };
        let body = match modal {
            Modal::Info { title, message, kind } => {
                view! { <InfoModal title=title message=message kind=kind /> }.into_any()
            }
            Modal::Confirm { title, message, .. } => {
                view! { <ConfirmModal title=title message=message /> }.into_any()
            }
            Modal::Detail(detail) => view! { <DetailView candidate=*detail.candidate /> }.into_any(),
            Modal::Comparison { left, right } => view! {
                <ComparisonView left=comparison_panel(&left) right=comparison_panel(&right) />
            }
            .into_any(),
        };
        view! {
            <div
                class="modal-backdrop fixed inset-0 flex items-center justify-center z-50"
                on:click=move |_| dispatcher.send(Intent::CloseModal)
            >
                <div class="modal-content bg-card rounded-xl shadow-xl" on:click=|ev| ev.stop_propagation()>
                    {body}
                </div>
            </div>
        }
        .into_any()
    }
}

#[component]
fn InfoModal(title: String, message: String, kind: NoticeKind) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    view! {
        <div class="p-6 max-w-md text-center">
            <i class=format!("{} text-4xl mb-4", kind.icon_class())></i>
            <h3 class="text-xl font-bold text-heading mb-2">{title}</h3>
            <p class="text-muted mb-6">{message}</p>
            <button class="btn-primary" on:click=move |_| dispatcher.send(Intent::CloseModal)>
                "OK"
            </button>
        </div>
    }
}

#[component]
fn ConfirmModal(title: String, message: String) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    view! {
        <div class="p-6 max-w-md text-center">
            <i class="fas fa-question-circle text-4xl text-primary-orange mb-4"></i>
            <h3 class="text-xl font-bold text-heading mb-2">{title}</h3>
            <p class="text-muted mb-6">{message}</p>
            <div class="flex justify-center space-x-4">
                <button class="btn-secondary" on:click=move |_| dispatcher.send(Intent::Confirm(false))>
                    "Cancel"
                </button>
                <button class="btn-primary" on:click=move |_| dispatcher.send(Intent::Confirm(true))>
                    "Confirm"
                </button>
            </div>
        </div>
    }
}

#[component]
fn DetailView(candidate: Candidate) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let tab = Memo::new(move |_| {
        model.with(|m| match m.modals().current() {
            Some(Modal::Detail(detail)) => detail.tab,
            _ => DetailTab::Info,
        })
    });
    let sending = Memo::new(move |_| model.with(|m| m.modals().sending()));
    let name = candidate.display_name().to_string();

    let tabs = DetailTab::ALL
        .into_iter()
        .map(|t| {
            view! {
                <button
                    class="tab-btn"
                    class:active=move || tab.get() == t
                    on:click=move |_| dispatcher.send(Intent::SelectTab(t))
                >
                    {t.label()}
                </button>
            }
        })
        .collect_view();

    let email_button = move |kind: EmailKind, label: &'static str, class: &'static str| {
        view! {
            <button
                class=class
                disabled=move || sending.get().is_some()
                on:click=move |_| dispatcher.send(Intent::RequestEmail(kind))
            >
                {move || if sending.get() == Some(kind) { "Sending..." } else { label }}
            </button>
        }
    };

    view! {
        <div class="detail-modal p-6 w-full max-w-3xl">
            <div class="flex justify-between items-center mb-4">
                <h3 class="text-2xl font-bold text-heading">{name}</h3>
                <button class="close-btn" on:click=move |_| dispatcher.send(Intent::CloseModal)>
                    <i class="fas fa-times"></i>
                </button>
            </div>
            <div class="tabs flex flex-wrap gap-2 mb-4">{tabs}</div>
            <div class="tab-content max-h-96 overflow-y-auto">
                {move || render_tab(tab_content(&candidate, tab.get()))}
            </div>
            <div class="flex justify-end space-x-4 mt-6">
                {email_button(EmailKind::Reject, "Send Rejection", "btn-secondary")}
                {email_button(EmailKind::Accept, "Send Acceptance", "btn-primary")}
            </div>
        </div>
    }
}

fn render_tab(content: TabContent) -> AnyView {
    match content {
        TabContent::Info {
            name,
            email,
            phone,
            filename,
            sender,
            subject,
            score_label,
            tier,
            basic_info_html,
        } => view! {
            <div class="space-y-2">
                <div class=format!("match-score {}", tier.css_class())>
                    <span class="score-value">{score_label}</span>
                    <span class="score-label">{tier.label()}</span>
                </div>
                <p><strong>"Name: "</strong>{name}</p>
                <p><strong>"Email: "</strong>{email}</p>
                <p><strong>"Phone: "</strong>{phone}</p>
                <p><strong>"File: "</strong>{filename}</p>
                {sender.map(|s| view! { <p><strong>"From: "</strong>{s}</p> })}
                {subject.map(|s| view! { <p><strong>"Subject: "</strong>{s}</p> })}
                <div class="markdown mt-4" inner_html=basic_info_html></div>
            </div>
        }
        .into_any(),
        TabContent::Strengths { strengths, weaknesses } => view! {
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                <div>
                    <h4 class="font-bold text-green-600 mb-2">"Strengths"</h4>
                    {bullet_list(strengths)}
                </div>
                <div>
                    <h4 class="font-bold text-red-600 mb-2">"Weaknesses"</h4>
                    {bullet_list(weaknesses)}
                </div>
            </div>
        }
        .into_any(),
        TabContent::Html(html) => view! { <div class="markdown" inner_html=html></div> }.into_any(),
        TabContent::Summary {
            summary_html,
            justification_html,
        } => view! {
            <div class="markdown">
                <h4 class="text-heading">"HR Summary"</h4>
                <div inner_html=summary_html></div>
                <h4 class="text-heading mt-6">"Justification"</h4>
                <div inner_html=justification_html></div>
            </div>
        }
        .into_any(),
        TabContent::Questions(questions) => view! {
            <ol class="space-y-4">
                {questions
                    .into_iter()
                    .map(|q| {
                        view! {
                            <li class="interview-question">
                                <p class="font-medium">{format!("{}. {}", q.number, q.question)}</p>
                                {q.match_level.map(|level| view! {
                                    <span class=format!("match-badge text-white text-xs px-2 py-1 rounded {}", level.css_class())>
                                        {level.label().to_string()}
                                    </span>
                                })}
                                {q.explanation.map(|e| view! { <p class="text-sm text-muted mt-1">{e}</p> })}
                            </li>
                        }
                    })
                    .collect_view()}
            </ol>
        }
        .into_any(),
        TabContent::RawQuestions(raw) => view! { <p class="whitespace-pre-line">{raw}</p> }.into_any(),
    }
}

fn bullet_list(items: Vec<String>) -> impl IntoView {
    view! {
        <ul class="list-disc pl-5 space-y-1">
            {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
        </ul>
    }
}

#[component]
fn ComparisonView(left: ComparisonPanel, right: ComparisonPanel) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    view! {
        <div class="comparison-modal p-6 w-full max-w-5xl">
            <div class="flex justify-between items-center mb-4">
                <h3 class="text-2xl font-bold text-heading">"Candidate Comparison"</h3>
                <button class="close-btn" on:click=move |_| dispatcher.send(Intent::CloseModal)>
                    <i class="fas fa-times"></i>
                </button>
            </div>
            <div class="grid grid-cols-1 md:grid-cols-2 gap-6 max-h-[70vh] overflow-y-auto">
                {panel_view(left)}
                {panel_view(right)}
            </div>
        </div>
    }
}

fn panel_view(panel: ComparisonPanel) -> impl IntoView {
    view! {
        <div class="comparison-panel space-y-4">
            <div class="flex justify-between items-center">
                <h4 class="text-xl font-bold text-heading">{panel.name}</h4>
                <div class=format!("match-score {}", panel.tier.css_class())>
                    <span class="score-value">{panel.score_label}</span>
                </div>
            </div>
            <div class="skill-tags flex flex-wrap gap-2">
                {panel
                    .skills
                    .into_iter()
                    .map(|skill| view! { <span class="skill-tag">{skill}</span> })
                    .collect_view()}
            </div>
            <div>
                <h5 class="font-bold text-green-600 mb-1">"Strengths"</h5>
                {bullet_list(panel.strengths)}
            </div>
            <div>
                <h5 class="font-bold text-red-600 mb-1">"Weaknesses"</h5>
                {bullet_list(panel.weaknesses)}
            </div>
            <div>
                <h5 class="font-bold mb-1">"HR Summary"</h5>
                <div class="markdown text-sm" inner_html=panel.summary_html></div>
            </div>
            <div class="text-sm">
                <h5 class="font-bold mb-1">"Interview Questions"</h5>
                {render_tab(panel.questions)}
            </div>
        </div>
    }
}
