//! PlantAI Common Library
//!
//! CLIとWeb(WASM)で共有される、植物写真の解析クライアントの中核部分。
//! I/Oを持たず、ネットワークとURL確保は呼び出し側のトレイト実装に任せる。

pub mod types;
pub mod error;
pub mod parser;
pub mod geometry;
pub mod selection;
pub mod orchestrator;
pub mod controller;
pub mod i18n;

#[cfg(test)]
pub(crate) mod testing;

pub use types::{
    AnalysisMode, AnalysisResult, CareAttribute, CareGuide, DiagnosisResult, PestsAndDiseases,
    RecognitionResult, Region, Severity, Soil,
};
pub use error::{Error, Result};
pub use parser::{interpret, parse_response};
pub use geometry::{derive_overlay, map_to_display, DisplayGeometry, DisplayRegion};
pub use selection::{ImageBlob, Selection, SelectionId, SelectionManager, SelectionSource, UrlAllocator};
pub use orchestrator::{
    failure_message, health_url, predict_url, HttpReply, PredictRequest, RequestState, Transport,
    FIELD_IMAGE, FIELD_LANGUAGE, FIELD_MODE,
};
pub use controller::{PendingPredict, PredictTicket, ViewController, ViewSnapshot};
pub use i18n::{tr, Key, Language};
