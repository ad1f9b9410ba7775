//! 解析リクエストの組み立てと結果の状態遷移（Request Orchestrator）
//!
//! ネットワーク呼び出し自体は `Transport` 実装（CLIはreqwest、Webはfetch）に任せ、
//! ここでは前提条件の検証・multipartフィールドの決定・応答の状態への変換だけを行う

use crate::error::{Error, Result};
use crate::i18n::{tr, Key, Language};
use crate::parser::parse_response;
use crate::selection::{ImageBlob, Selection};
use crate::types::{AnalysisMode, AnalysisResult};

/// multipartフィールド名
pub const FIELD_IMAGE: &str = "image";
pub const FIELD_MODE: &str = "mode";
pub const FIELD_LANGUAGE: &str = "language";

pub const PREDICT_PATH: &str = "/predict";
pub const HEALTH_PATH: &str = "/health";

/// 解析リクエストの状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(AnalysisResult),
    /// 表示用のローカライズ済みメッセージ
    Failed(String),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            RequestState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// `POST /predict` 1回分の内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictRequest {
    pub image: ImageBlob,
    pub mode: AnalysisMode,
    pub language: Language,
}

impl PredictRequest {
    /// 画像以外のテキストフィールド
    pub fn text_fields(&self) -> [(&'static str, &'static str); 2] {
        [
            (FIELD_MODE, self.mode.as_str()),
            (FIELD_LANGUAGE, self.language.code()),
        ]
    }
}

/// エンドポイントのベースURLから解析URLを作る
pub fn predict_url(base: &str) -> String {
    join_url(base, PREDICT_PATH)
}

pub fn health_url(base: &str) -> String {
    join_url(base, HEALTH_PATH)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}

/// HTTP応答（ステータスと本文のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 解析リクエストの送信手段
///
/// タイムアウト・リトライは行わず、1回だけ送る。
/// 応答が得られなかった場合のみ `Err`（`Error::Transport`）を返す。
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &PredictRequest) -> Result<HttpReply>;
}

/// 送信前の検証とリクエスト組み立て
pub fn prepare(
    selection: Option<&Selection>,
    mode: AnalysisMode,
    language: Language,
) -> Result<PredictRequest> {
    let selection = selection.ok_or(Error::NoImageSelected)?;
    Ok(PredictRequest {
        image: selection.image.clone(),
        mode,
        language,
    })
}

/// 応答を解析結果に変換（2xx以外は `Error::Http`）
pub fn interpret_reply(mode: AnalysisMode, reply: &HttpReply) -> Result<AnalysisResult> {
    if !reply.is_success() {
        return Err(Error::Http {
            status: reply.status,
            body: reply.body.clone(),
        });
    }
    parse_response(mode, &reply.body)
}

/// 送信結果を最終状態（Success / Failed）に変換
pub fn settle(mode: AnalysisMode, language: Language, reply: Result<HttpReply>) -> RequestState {
    match reply.and_then(|reply| interpret_reply(mode, &reply)) {
        Ok(result) => RequestState::Success(result),
        Err(e) => {
            if e.is_transport() {
                log::warn!("通信失敗 ({}): {}", mode, e);
            } else {
                log::error!("応答の解釈に失敗 ({}): {}", mode, e);
            }
            RequestState::Failed(failure_message(&e, language))
        }
    }
}

/// エラーを利用者向けメッセージに変換
///
/// HTTPエラーだけはステータスと本文をそのまま含める
pub fn failure_message(error: &Error, language: Language) -> String {
    match error {
        Error::Http { status, body } => {
            format!("{} {}: {}", tr(language, Key::ServerError), status, body)
        }
        Error::NoImageSelected => tr(language, Key::SelectImageFirst).to_string(),
        Error::InvalidInput(_) => tr(language, Key::InvalidFileType).to_string(),
        Error::Transport(_) | Error::Interpretation(_) | Error::Json(_) => {
            tr(language, Key::PredictionFailed).to_string()
        }
    }
}

/// 選択・送信・解釈を1回で行う
///
/// 未選択なら送信せずに `Failed` を返す
pub async fn predict<T: Transport>(
    transport: &T,
    selection: Option<&Selection>,
    mode: AnalysisMode,
    language: Language,
) -> RequestState {
    let request = match prepare(selection, mode, language) {
        Ok(request) => request,
        Err(e) => return RequestState::Failed(failure_message(&e, language)),
    };

    log::info!(
        "解析リクエスト: {} ({} bytes, mode={}, language={})",
        request.image.file_name,
        request.image.bytes.len(),
        mode,
        language
    );

    settle(mode, language, transport.send(&request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;

    const POTHOS: &str = r#"{
        "plant_name": "Pothos",
        "scientific_name": "Epipremnum aureum",
        "inference_ms": 812.4
    }"#;

    fn selection() -> Selection {
        Selection {
            id: 1,
            image: ImageBlob::new("leaf.jpg", "image/jpeg", vec![0xFF, 0xD8]),
            display_url: "mem://1".to_string(),
        }
    }

    #[test]
    fn test_prepare_requires_selection() {
        let result = prepare(None, AnalysisMode::Diagnosis, Language::En);
        assert!(matches!(result, Err(Error::NoImageSelected)));
    }

    #[test]
    fn test_prepare_fields() {
        let selection = selection();
        let request = prepare(Some(&selection), AnalysisMode::Recognition, Language::Ta).expect("組み立て失敗");
        assert_eq!(request.image.file_name, "leaf.jpg");
        assert_eq!(request.text_fields(), [("mode", "recognition"), ("language", "ta")]);
    }

    #[test]
    fn test_predict_url() {
        assert_eq!(predict_url("http://localhost:8000"), "http://localhost:8000/predict");
        assert_eq!(predict_url("https://api.example.com/"), "https://api.example.com/predict");
        assert_eq!(health_url("http://localhost:8000/"), "http://localhost:8000/health");
    }

    #[test]
    fn test_http_reply_is_success() {
        assert!(HttpReply { status: 200, body: String::new() }.is_success());
        assert!(HttpReply { status: 204, body: String::new() }.is_success());
        assert!(!HttpReply { status: 302, body: String::new() }.is_success());
        assert!(!HttpReply { status: 500, body: String::new() }.is_success());
    }

    #[test]
    fn test_settle_success() {
        let reply = Ok(HttpReply { status: 200, body: POTHOS.to_string() });
        let state = settle(AnalysisMode::Recognition, Language::En, reply);

        let result = state.result().and_then(|r| r.as_recognition()).expect("同定結果がない");
        assert_eq!(result.plant_name, "Pothos");
        assert_eq!(result.inference_ms, 812);
    }

    #[test]
    fn test_settle_server_error_embeds_status_and_body() {
        let reply = Ok(HttpReply { status: 500, body: "model overloaded".to_string() });
        let state = settle(AnalysisMode::Diagnosis, Language::En, reply);

        let message = state.failure().expect("失敗になっていない");
        assert!(message.contains("500"));
        assert!(message.contains("model overloaded"));
    }

    #[test]
    fn test_settle_transport_failure_is_generic() {
        let state = settle(
            AnalysisMode::Diagnosis,
            Language::Ru,
            Err(Error::Transport("connection refused".to_string())),
        );
        assert_eq!(state, RequestState::Failed(tr(Language::Ru, Key::PredictionFailed).to_string()));
    }

    #[test]
    fn test_settle_malformed_json_is_generic() {
        let reply = Ok(HttpReply { status: 200, body: "<html>".to_string() });
        let state = settle(AnalysisMode::Diagnosis, Language::En, reply);
        assert_eq!(state.failure(), Some(tr(Language::En, Key::PredictionFailed)));
    }

    #[test]
    fn test_settle_interpretation_failure_is_generic() {
        // 同定結果を診断として解釈しようとする
        let reply = Ok(HttpReply { status: 200, body: POTHOS.to_string() });
        let state = settle(AnalysisMode::Diagnosis, Language::Hi, reply);
        assert_eq!(state.failure(), Some(tr(Language::Hi, Key::PredictionFailed)));
    }

    #[test]
    fn test_failure_message_localized() {
        assert_eq!(
            failure_message(&Error::NoImageSelected, Language::Ml),
            tr(Language::Ml, Key::SelectImageFirst)
        );
        let http = Error::Http { status: 503, body: "busy".to_string() };
        assert_eq!(failure_message(&http, Language::Ru), "Ошибка сервера 503: busy");
    }

    #[tokio::test]
    async fn test_predict_without_selection_does_not_send() {
        let transport = ScriptedTransport::default().reply(200, POTHOS);
        let state = predict(&transport, None, AnalysisMode::Recognition, Language::En).await;

        assert_eq!(state.failure(), Some("Please select an image first"));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_predict_sends_once() {
        let transport = ScriptedTransport::default().reply(200, POTHOS);
        let selection = selection();
        let state = predict(
            &transport,
            Some(&selection),
            AnalysisMode::Recognition,
            Language::En,
        )
        .await;

        assert!(state.result().is_some());
        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].mode, AnalysisMode::Recognition);
        assert_eq!(sent[0].image.bytes, vec![0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_predict_transport_error() {
        let transport = ScriptedTransport::default().fail("dns");
        let selection = selection();
        let state = predict(&transport, Some(&selection), AnalysisMode::Diagnosis, Language::En).await;
        assert_eq!(state.failure(), Some("Prediction failed. Please try again"));
    }
}
