//! メインアプリケーションコンポーネント
//!
//! 状態はすべて `ViewController` が持ち、画面は遷移ごとに取り直した
//! `ViewSnapshot` だけを描画する

use leptos::html;
use leptos::prelude::*;
use plant_ai_common::{
    tr, AnalysisMode, DisplayGeometry, Error, ImageBlob, Key, Language, RequestState,
    SelectionSource, Transport, ViewController, ViewSnapshot,
};
use wasm_bindgen_futures::spawn_local;

use crate::api::FetchTransport;
use crate::blob_url::BlobUrlAllocator;
use crate::components::{
    header::Header, preview::Preview, result_card::ResultCard, settings_panel::SettingsPanel,
    upload_area::UploadArea,
};

type Controller = ViewController<BlobUrlAllocator>;

/// 描画中の `<img>` から寸法を取る
fn measure(img: &web_sys::HtmlImageElement) -> DisplayGeometry {
    DisplayGeometry::new(
        img.offset_width() as f64,
        img.offset_height() as f64,
        img.natural_width() as f64,
        img.natural_height() as f64,
    )
}

#[component]
pub fn App() -> impl IntoView {
    let controller = StoredValue::new(Controller::new(
        BlobUrlAllocator,
        AnalysisMode::default(),
        Language::default(),
    ));
    let (snapshot, set_snapshot) = signal(controller.with_value(Controller::snapshot));
    // 操作拒否など、状態遷移を伴わない通知
    let (notice, set_notice) = signal(None::<String>);

    let refresh = move || set_snapshot.set(controller.with_value(Controller::snapshot));

    let mode = Signal::derive(move || snapshot.with(|s| s.mode));
    let language = Signal::derive(move || snapshot.with(|s| s.language));
    let display_url = Signal::derive(move || snapshot.with(|s| s.display_url.clone()));
    let overlay = Signal::derive(move || snapshot.with(|s| s.overlay));
    let can_predict = Signal::derive(move || snapshot.with(|s| s.can_predict));
    let is_loading = Signal::derive(move || snapshot.with(|s| s.request_state.is_loading()));

    let on_select = move |image: ImageBlob, source: SelectionSource| {
        let result = controller
            .try_update_value(|c| c.select(image, source))
            .unwrap_or(Ok(()));
        match result {
            Ok(()) => set_notice.set(None),
            Err(Error::InvalidInput(_)) => {
                set_notice.set(Some(tr(language.get_untracked(), Key::InvalidFileType).to_string()))
            }
            Err(e) => set_notice.set(Some(e.to_string())),
        }
        refresh();
    };

    let on_mode = move |m: AnalysisMode| {
        controller.update_value(|c| c.set_mode(m));
        refresh();
    };

    let on_language = move |l: Language| {
        controller.update_value(|c| c.set_language(l));
        refresh();
    };

    let image_ref: NodeRef<html::Img> = NodeRef::new();
    let capture = move || {
        if let Some(img) = image_ref.get_untracked() {
            let geometry = measure(&img);
            controller.update_value(|c| c.capture_geometry(geometry));
            refresh();
        }
    };

    let resize = window_event_listener(leptos::ev::resize, move |_| capture());
    on_cleanup(move || resize.remove());

    let on_predict = move || {
        set_notice.set(None);
        let pending = controller.try_update_value(|c| c.begin_predict()).flatten();
        refresh();

        if let Some(pending) = pending {
            spawn_local(async move {
                let reply = FetchTransport::default().send(&pending.request).await;
                let applied = controller
                    .try_update_value(|c| c.finish_predict(pending.ticket, reply))
                    .unwrap_or(false);
                if applied {
                    refresh();
                }
            });
        }
    };

    let on_clear = move || {
        set_notice.set(None);
        controller.update_value(|c| c.clear());
        refresh();
    };

    view! {
        <div class="container">
            <Header language=language />

            <SettingsPanel
                mode=mode
                language=language
                is_loading=is_loading
                on_mode=on_mode
                on_language=on_language
            />

            <UploadArea language=language on_select=on_select />

            {move || notice.get().map(|n| view! { <p class="notice">{n}</p> })}

            <Show
                when=move || display_url.with(Option::is_some)
                fallback=move || view! { <p class="text-muted">{move || tr(language.get(), Key::SelectImage)}</p> }
            >
                <Preview
                    display_url=display_url
                    overlay=overlay
                    can_predict=can_predict
                    is_loading=is_loading
                    language=language
                    image_ref=image_ref
                    on_load=capture
                    on_predict=on_predict
                    on_clear=on_clear
                />
            </Show>

            {move || render_state(&snapshot.get())}
        </div>
    }
}

fn render_state(snapshot: &ViewSnapshot) -> AnyView {
    match &snapshot.request_state {
        RequestState::Idle => ().into_any(),
        RequestState::Loading => view! {
            <div class="progress-container">
                <div class="spinner"></div>
                <p class="progress-text">{tr(snapshot.language, Key::Predicting)}</p>
            </div>
        }
        .into_any(),
        RequestState::Success(result) => {
            view! { <ResultCard result=result.clone() language=snapshot.language /> }.into_any()
        }
        RequestState::Failed(message) => {
            view! { <div class="error-message">{message.clone()}</div> }.into_any()
        }
    }
}
