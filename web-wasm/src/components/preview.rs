//! 選択画像のプレビュー（病変部位のオーバーレイ付き）

use leptos::html;
use leptos::prelude::*;
use plant_ai_common::{tr, DisplayRegion, Key, Language};

#[component]
pub fn Preview<FL, FP, FC>(
    display_url: Signal<Option<String>>,
    overlay: Signal<Option<DisplayRegion>>,
    can_predict: Signal<bool>,
    is_loading: Signal<bool>,
    language: Signal<Language>,
    image_ref: NodeRef<html::Img>,
    on_load: FL,
    on_predict: FP,
    on_clear: FC,
) -> impl IntoView
where
    FL: Fn() + Send + Sync + Clone + 'static,
    FP: Fn() + Send + Sync + Clone + 'static,
    FC: Fn() + Send + Sync + Clone + 'static,
{
    view! {
        <div class="preview">
            <div class="preview-frame">
                <img
                    node_ref=image_ref
                    src=move || display_url.get().unwrap_or_default()
                    alt=""
                    on:load=move |_| on_load()
                />
                {move || {
                    overlay
                        .get()
                        .map(|region| view! { <div class="overlay" style=region.to_css()></div> })
                }}
            </div>

            <div class="preview-actions">
                <button
                    class="btn btn-primary"
                    disabled=move || !can_predict.get()
                    on:click=move |_| on_predict()
                >
                    {move || {
                        let key = if is_loading.get() { Key::Predicting } else { Key::Predict };
                        tr(language.get(), key)
                    }}
                </button>
                <button class="btn btn-tertiary" on:click=move |_| on_clear()>
                    {move || tr(language.get(), Key::Clear)}
                </button>
            </div>
        </div>
    }
}
