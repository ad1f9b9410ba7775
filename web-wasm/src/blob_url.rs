//! 選択画像のObject URL管理

use js_sys::{Array, Uint8Array};
use plant_ai_common::{ImageBlob, UrlAllocator};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

/// バイト列からブラウザのBlobを作る
pub fn to_js_blob(image: &ImageBlob) -> Result<Blob, JsValue> {
    let bytes = Uint8Array::from(image.bytes.as_slice());
    let parts = Array::of1(&bytes);

    let options = BlobPropertyBag::new();
    options.set_type(&image.media_type);

    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

/// `URL.createObjectURL` / `URL.revokeObjectURL` による確保・解放
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobUrlAllocator;

impl UrlAllocator for BlobUrlAllocator {
    fn allocate(&self, image: &ImageBlob) -> String {
        match to_js_blob(image).and_then(|blob| Url::create_object_url_with_blob(&blob)) {
            Ok(url) => url,
            Err(e) => {
                log::error!("Object URLの作成に失敗: {} {:?}", image.file_name, e);
                String::new()
            }
        }
    }

    fn revoke(&self, url: &str) {
        if url.is_empty() {
            return;
        }
        if let Err(e) = Url::revoke_object_url(url) {
            log::warn!("Object URLの解放に失敗: {} {:?}", url, e);
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_allocate_and_revoke_object_url() {
        let image = ImageBlob::new("leaf.png", "image/png", vec![0x89, b'P', b'N', b'G']);
        let url = BlobUrlAllocator.allocate(&image);
        assert!(url.starts_with("blob:"));
        BlobUrlAllocator.revoke(&url);
    }

    #[wasm_bindgen_test]
    fn wasm_blob_keeps_media_type() {
        let image = ImageBlob::new("leaf.jpg", "image/jpeg", vec![1, 2, 3]);
        let blob = to_js_blob(&image).expect("Blob作成失敗");
        assert_eq!(blob.type_(), "image/jpeg");
        assert_eq!(blob.size(), 3.0);
    }
}
