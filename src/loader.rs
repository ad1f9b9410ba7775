//! 画像ファイルの読み込み

use crate::error::{PlantAiError, Result};
use plant_ai_common::ImageBlob;
use std::path::Path;

/// 拡張子とメディアタイプの対応
const MEDIA_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

/// 読み込んだ画像と元画像サイズ
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub blob: ImageBlob,
    pub natural_width: u32,
    pub natural_height: u32,
}

/// 拡張子からメディアタイプを決める（不明なら application/octet-stream）
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    MEDIA_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, media_type)| *media_type)
        .unwrap_or("application/octet-stream")
}

pub fn load_image(path: &Path) -> Result<LoadedImage> {
    if !path.is_file() {
        return Err(PlantAiError::FileNotFound(path.display().to_string()));
    }

    let (natural_width, natural_height) = image::image_dimensions(path)
        .map_err(|e| PlantAiError::ImageLoad(format!("{}: {}", path.display(), e)))?;

    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    log::info!(
        "画像読み込み: {} ({}x{}, {} bytes)",
        file_name,
        natural_width,
        natural_height,
        bytes.len()
    );

    Ok(LoadedImage {
        blob: ImageBlob::new(file_name, media_type_for(path), bytes),
        natural_width,
        natural_height,
    })
}
