//! プロジェクト選択欄

use leptos::prelude::*;
use resume_ai_common::Intent;

use crate::dispatch::Dispatcher;

/// 保存先プロジェクトのセレクト。空文字は「プロジェクトなし」
#[component]
pub fn ProjectSelect(
    selected: RwSignal<String>,
    none_label: &'static str,
    /// 開いているプロジェクトを初期選択にする
    #[prop(optional)]
    preselect: bool,
) -> impl IntoView {
    let dispatcher = expect_context::<Dispatcher>();
    let model = dispatcher.model();

    let options = Memo::new(move |_| {
        model.with(|m| {
            m.projects()
                .iter()
                .map(|p| (p.id.clone(), p.option_label()))
                .collect::<Vec<_>>()
        })
    });
    let preselected = Memo::new(move |_| {
        model.with(|m| m.preselected_project_id().map(str::to_string))
    });

    Effect::new(move |_| {
        if let Some(id) = preselected.get() {
            if preselect {
                selected.set(id);
            }
        }
    });

    view! {
        <div class="w-full mt-6">
            <label class="block text-sm font-medium text-muted mb-2">"Project"</label>
            <div class="flex space-x-2">
                <select
                    class="input-field flex-1 p-2 rounded"
                    prop:value=move || selected.get()
                    on:change=move |ev| selected.set(event_target_value(&ev))
                >
                    <option value="">{none_label}</option>
                    <For
                        each=move || options.get()
                        key=|(id, _)| id.clone()
                        children=move |(id, label)| {
                            let value = id.clone();
                            view! {
                                <option value=value selected=move || selected.get() == id>
                                    {label}
                                </option>
                            }
                        }
                    />
                </select>
                <button
                    class="btn-secondary"
                    title="Refresh projects"
                    on:click=move |_| dispatcher.send(Intent::RefreshProjectOptions)
                >
                    <i class="fas fa-sync-alt"></i>
                </button>
            </div>
        </div>
    }
}
