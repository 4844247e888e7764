//! 候補者カードの一覧

use leptos::prelude::*;
use resume_ai_common::ranking::CandidateCard;
use resume_ai_common::Intent;

use crate::dispatch::Dispatcher;

#[component]
pub fn CandidateGrid(empty_text: &'static str) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();
    let cards = Memo::new(move |_| model.with(|m| m.cards()));

    view! {
        <Show
            when=move || cards.with(|c| !c.is_empty())
            fallback=move || view! { <p class="text-muted text-center py-8">{empty_text}</p> }
        >
            <div class="candidate-grid grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                <For
                    each=move || cards.get()
                    // 削除後に位置がずれたカードも描き直す
                    key=|card| format!("{}@{}", card.key, card.index)
                    children=move |card| view! { <CandidateCardView card=card /> }
                />
            </div>
        </Show>
    }
}

#[component]
fn CandidateCardView(card: CandidateCard) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let index = card.index;
    let resume_id = card.id.clone();

    let delete_button = card.deletable.then(|| {
        view! {
            <button
                class="delete-btn"
                title="Delete resume"
                on:click=move |ev| {
                    ev.stop_propagation();
                    dispatcher.send(Intent::RequestDelete {
                        resume_id: resume_id.clone(),
                    });
                }
            >
                <i class="fas fa-trash"></i>
            </button>
        }
    });

    view! {
        <div
            class="candidate-card bg-card p-6 rounded-xl shadow cursor-pointer"
            on:click=move |_| dispatcher.send(Intent::OpenCandidate(index))
        >
            <div class="flex justify-between items-start">
                <div class="candidate-photo">
                    <i class="fas fa-user"></i>
                </div>
                <div class="flex-1 mx-4">
                    <h3 class="text-lg font-bold text-heading">{card.name.clone()}</h3>
                    <p class="text-sm text-muted">{card.filename.clone()}</p>
                </div>
                <div class=format!("match-score {}", card.tier.css_class())>
                    <span class="score-value">{card.score_label.clone()}</span>
                    <span class="score-label">{card.tier.label()}</span>
                </div>
                {delete_button}
            </div>
            <div class="text-sm mt-4 space-y-1">
                <p><i class="fas fa-envelope mr-2"></i>{card.email.clone()}</p>
                <p><i class="fas fa-phone mr-2"></i>{card.phone.clone()}</p>
            </div>
            <div class="skill-tags flex flex-wrap gap-2 mt-4">
                {card
                    .skills
                    .iter()
                    .map(|skill| view! { <span class="skill-tag">{skill.clone()}</span> })
                    .collect_view()}
            </div>
        </div>
    }
}
