//! アップロードエリアコンポーネント
//!
//! クリックでファイル選択（accept="image/*"）、またはドラッグ&ドロップで1枚受け取る

use leptos::html;
use leptos::prelude::*;
use plant_ai_common::{tr, ImageBlob, Key, Language, SelectionSource};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{DragEvent, File};

#[component]
pub fn UploadArea<F>(language: Signal<Language>, on_select: F) -> impl IntoView
where
    F: Fn(ImageBlob, SelectionSource) + Send + Sync + Clone + 'static,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref: NodeRef<html::Input> = NodeRef::new();
    let reads = ReadSequence::default();

    let on_drop = {
        let on_select = on_select.clone();
        let reads = reads.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                read_file(file, SelectionSource::Drop, reads.clone(), on_select.clone());
            }
        }
    };

    let on_change = {
        let on_select = on_select.clone();
        let reads = reads.clone();
        move |_| {
            let Some(input) = input_ref.get_untracked() else {
                return;
            };
            if let Some(file) = input.files().and_then(|files| files.get(0)) {
                read_file(file, SelectionSource::Picker, reads.clone(), on_select.clone());
            }
            // 同じファイルを選び直してもchangeが発火するように
            input.set_value("");
        }
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get_untracked() {
            input.click();
        }
    };

    view! {
        <div
            class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
            on:drop=on_drop
            on:dragover=move |ev: DragEvent| {
                ev.prevent_default();
                set_is_dragover.set(true);
            }
            on:dragleave=move |_: DragEvent| set_is_dragover.set(false)
            on:click=on_click
        >
            <input
                type="file"
                accept="image/*"
                class="hidden"
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
            <div class="upload-icon">"📷"</div>
            <p>{move || tr(language.get(), Key::DropHint)}</p>
            <p class="text-muted">"JPEG, PNG, WebP"</p>
        </div>
    }
}

/// ファイル読み込みの順序管理
///
/// 読み込みは非同期に完了するため、最後に選ばれたもの以外の完了は捨てる
#[derive(Debug, Clone, Default)]
pub struct ReadSequence {
    latest: Arc<AtomicU64>,
}

impl ReadSequence {
    /// 新しい読み込みの番号を発行する
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }
}

fn read_file<F>(file: File, source: SelectionSource, reads: ReadSequence, on_select: F)
where
    F: Fn(ImageBlob, SelectionSource) + 'static,
{
    let seq = reads.begin();
    spawn_local(async move {
        let file_name = file.name();
        match JsFuture::from(file.array_buffer()).await {
            Ok(buffer) => {
                if !reads.is_latest(seq) {
                    log::debug!("後続の選択があるため読み込み結果を破棄: {}", file_name);
                    return;
                }
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                on_select(ImageBlob::new(file_name, file.type_(), bytes), source);
            }
            Err(e) => log::error!("ファイル読み込み失敗: {} {:?}", file_name, e),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_sequence_keeps_only_latest() {
        let reads = ReadSequence::default();
        let large = reads.begin();
        let small = reads.begin();

        // 後から選んだ小さい画像が先に読み終わっても、先の画像は採用しない
        assert!(reads.is_latest(small));
        assert!(!reads.is_latest(large));
    }

    #[test]
    fn test_read_sequence_clones_share_counter() {
        let reads = ReadSequence::default();
        let other = reads.clone();
        let first = reads.begin();
        assert!(other.is_latest(first));

        let second = other.begin();
        assert!(!reads.is_latest(first));
        assert!(reads.is_latest(second));
    }
}
