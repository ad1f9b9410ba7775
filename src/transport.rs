//! reqwestによる推論サーバーとの通信

use crate::error::{PlantAiError, Result};
use plant_ai_common::{
    health_url, predict_url, HttpReply, PredictRequest, Transport, FIELD_IMAGE,
};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// `GET /health` の応答
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("plant-ai/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PlantAiError::HttpClient(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// サーバーの稼働確認
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = health_url(&self.base_url);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| PlantAiError::Health(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlantAiError::Health(e.to_string()))?;

        if !status.is_success() {
            return Err(PlantAiError::Health(format!("{}: {}", status.as_u16(), body)));
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn build_form(request: &PredictRequest) -> plant_ai_common::Result<Form> {
        let image = Part::bytes(request.image.bytes.clone())
            .file_name(request.image.file_name.clone())
            .mime_str(&request.image.media_type)
            .map_err(|e| plant_ai_common::Error::Transport(format!("不正なメディアタイプ: {}", e)))?;

        let form = request
            .text_fields()
            .into_iter()
            .fold(Form::new().part(FIELD_IMAGE, image), |form, (name, value)| {
                form.text(name, value)
            });
        Ok(form)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &PredictRequest) -> plant_ai_common::Result<HttpReply> {
        let url = predict_url(&self.base_url);
        log::debug!("POST {} ({})", url, request.image.file_name);

        let form = Self::build_form(request)?;
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| plant_ai_common::Error::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| plant_ai_common::Error::Transport(e.to_string()))?;

        log::debug!("応答: {} ({} bytes)", status, body.len());
        Ok(HttpReply { status, body })
    }
}
