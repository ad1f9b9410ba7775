//! ヘッダーコンポーネント

use leptos::prelude::*;
use plant_ai_common::{tr, Key, Language};

#[component]
pub fn Header(language: Signal<Language>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>{move || format!("🌿 {}", tr(language.get(), Key::AppTitle))}</h1>
        </header>
    }
}
