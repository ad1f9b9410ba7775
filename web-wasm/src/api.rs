//! 推論サーバーへのfetch送信

use gloo::net::http::Request;
use plant_ai_common::{predict_url, Error, HttpReply, PredictRequest, Result, Transport, FIELD_IMAGE};
use wasm_bindgen::JsValue;
use web_sys::FormData;

use crate::blob_url::to_js_blob;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// APIのベースURL（ビルド時の `PLANT_AI_API_URL`）
pub fn api_base() -> &'static str {
    resolve_base(option_env!("PLANT_AI_API_URL"))
}

fn resolve_base(configured: Option<&'static str>) -> &'static str {
    configured
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_URL)
}

pub struct FetchTransport {
    base_url: &'static str,
}

impl FetchTransport {
    pub fn new(base_url: &'static str) -> Self {
        Self { base_url }
    }
}

impl Default for FetchTransport {
    fn default() -> Self {
        Self::new(api_base())
    }
}

fn js_error(context: &str, e: JsValue) -> Error {
    Error::Transport(format!("{}: {:?}", context, e))
}

fn build_form(request: &PredictRequest) -> Result<FormData> {
    let form = FormData::new().map_err(|e| js_error("FormData", e))?;

    let blob = to_js_blob(&request.image).map_err(|e| js_error("Blob", e))?;
    form.append_with_blob_and_filename(FIELD_IMAGE, &blob, &request.image.file_name)
        .map_err(|e| js_error(FIELD_IMAGE, e))?;

    for (name, value) in request.text_fields() {
        form.append_with_str(name, value).map_err(|e| js_error(name, e))?;
    }
    Ok(form)
}

impl Transport for FetchTransport {
    async fn send(&self, request: &PredictRequest) -> Result<HttpReply> {
        let form = build_form(request)?;

        let response = Request::post(&predict_url(self.base_url))
            .body(form)
            .map_err(|e| Error::Transport(e.to_string()))?
            .send()
            .await
            .map_err(|e| Error::Transport(format!("Network error: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        log::info!("predict: {} ({} bytes)", status, body.len());
        Ok(HttpReply { status, body })
    }
}
