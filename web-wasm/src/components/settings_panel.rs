//! 設定パネルコンポーネント（解析モード・応答言語）

use leptos::prelude::*;
use plant_ai_common::{tr, AnalysisMode, Key, Language};

#[component]
pub fn SettingsPanel<FM, FL>(
    mode: Signal<AnalysisMode>,
    language: Signal<Language>,
    is_loading: Signal<bool>,
    on_mode: FM,
    on_language: FL,
) -> impl IntoView
where
    FM: Fn(AnalysisMode) + Send + Sync + Clone + 'static,
    FL: Fn(Language) + Send + Sync + Clone + 'static,
{
    let mode_button = move |target: AnalysisMode, key: Key| {
        let on_mode = on_mode.clone();
        view! {
            <button
                class=move || if mode.get() == target { "btn btn-primary" } else { "btn btn-secondary" }
                disabled=move || is_loading.get()
                on:click=move |_| on_mode(target)
            >
                {move || tr(language.get(), key)}
            </button>
        }
    };

    view! {
        <div class="settings-panel">
            <div class="mode-toggle">
                {mode_button(AnalysisMode::Diagnosis, Key::ModeDiagnosis)}
                {mode_button(AnalysisMode::Recognition, Key::ModeRecognition)}
            </div>

            <div class="form-group">
                <label for="language">{move || tr(language.get(), Key::Language)}</label>
                <select
                    id="language"
                    on:change=move |ev| {
                        if let Some(l) = Language::from_code(&event_target_value(&ev)) {
                            on_language(l);
                        }
                    }
                >
                    {Language::ALL
                        .into_iter()
                        .map(|l| {
                            view! {
                                <option value=l.code() selected=move || language.get() == l>
                                    {l.native_name()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}
