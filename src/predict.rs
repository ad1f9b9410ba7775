//! `predict` コマンド本体
//!
//! 画像の読み込みから結果の確定までをView Controllerで回す

use crate::cli::DisplaySize;
use crate::error::{PlantAiError, Result};
use crate::loader::LoadedImage;
use indicatif::{ProgressBar, ProgressStyle};
use plant_ai_common::{
    tr, AnalysisMode, AnalysisResult, DisplayGeometry, DisplayRegion, ImageBlob, Key, Language,
    RequestState, SelectionSource, Transport, UrlAllocator, ViewController,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// 端末表示用のプレビューハンドル（`preview://N/ファイル名`）を払い出す
#[derive(Debug, Default)]
pub struct PreviewAllocator {
    next: AtomicU64,
    live: AtomicU64,
}

impl PreviewAllocator {
    /// 未解放のハンドル数
    pub fn live(&self) -> u64 {
        self.live.load(Ordering::Relaxed)
    }
}

impl UrlAllocator for PreviewAllocator {
    fn allocate(&self, image: &ImageBlob) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        self.live.fetch_add(1, Ordering::Relaxed);
        format!("preview://{}/{}", id, image.file_name)
    }

    fn revoke(&self, url: &str) {
        self.live.fetch_sub(1, Ordering::Relaxed);
        log::debug!("プレビュー解放: {}", url);
    }
}

#[derive(Debug, Clone)]
pub struct PredictOptions {
    pub mode: AnalysisMode,
    pub language: Language,
    /// 表示サイズ。省略時は元画像サイズで表示したものとみなす
    pub display: Option<DisplaySize>,
    pub show_progress: bool,
}

#[derive(Debug, Clone)]
pub struct PredictOutcome {
    pub result: AnalysisResult,
    pub overlay: Option<DisplayRegion>,
}

/// 画像表示のジオメトリを決める
pub fn display_geometry(image: &LoadedImage, display: Option<DisplaySize>) -> DisplayGeometry {
    let natural_width = image.natural_width as f64;
    let natural_height = image.natural_height as f64;
    let (offset_width, offset_height) = display
        .map(|d| (d.width, d.height))
        .unwrap_or((natural_width, natural_height));

    DisplayGeometry::new(offset_width, offset_height, natural_width, natural_height)
}

/// 1枚の画像を解析する
pub async fn run<T: Transport>(
    transport: &T,
    image: LoadedImage,
    options: &PredictOptions,
) -> Result<PredictOutcome> {
    let geometry = display_geometry(&image, options.display);

    let mut controller = ViewController::new(PreviewAllocator::default(), options.mode, options.language);
    controller.select(image.blob, SelectionSource::Picker)?;
    controller.capture_geometry(geometry);

    let spinner = options.show_progress.then(|| spinner(options.language));
    let state = controller.predict(transport).await.clone();
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match state {
        RequestState::Success(result) => Ok(PredictOutcome {
            result,
            overlay: controller.overlay(),
        }),
        RequestState::Failed(message) => Err(PlantAiError::Prediction(message)),
        RequestState::Idle | RequestState::Loading => Err(PlantAiError::Prediction(
            tr(options.language, Key::PredictionFailed).to_string(),
        )),
    }
}

fn spinner(language: Language) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(tr(language, Key::Predicting));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
