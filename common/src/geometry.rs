//! 座標変換（Coordinate Mapper）
//!
//! 元画像のピクセル座標で与えられた病変部位を、
//! 縮小表示された画像要素上の矩形に変換する

use crate::orchestrator::RequestState;
use crate::types::{AnalysisMode, AnalysisResult, Region};
use serde::{Deserialize, Serialize};

/// 表示中の画像の寸法（描画サイズと元画像サイズ）
///
/// 画像の読み込み完了時に取得し、選択画像が変わると破棄される
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayGeometry {
    pub offset_width: f64,
    pub offset_height: f64,
    pub natural_width: f64,
    pub natural_height: f64,
}

impl DisplayGeometry {
    pub fn new(offset_width: f64, offset_height: f64, natural_width: f64, natural_height: f64) -> Self {
        Self {
            offset_width,
            offset_height,
            natural_width,
            natural_height,
        }
    }

    /// 元画像の寸法が取れていて、変換可能か
    pub fn is_measurable(&self) -> bool {
        self.natural_width > 0.0 && self.natural_height > 0.0
    }

    pub fn scale_x(&self) -> f64 {
        self.offset_width / self.natural_width
    }

    pub fn scale_y(&self) -> f64 {
        self.offset_height / self.natural_height
    }
}

/// 表示座標系の矩形（px）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayRegion {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl DisplayRegion {
    /// オーバーレイ要素用のインラインCSS
    pub fn to_css(&self) -> String {
        format!(
            "left: {:.2}px; top: {:.2}px; width: {:.2}px; height: {:.2}px;",
            self.left, self.top, self.width, self.height
        )
    }
}

/// 元画像座標の矩形を表示座標に変換
///
/// 呼び出し側は `geometry.is_measurable()` を確認してから呼ぶこと。
/// 画像外にはみ出す矩形もそのまま変換する（クランプしない）。
///
/// # Examples
/// ```
/// use plant_ai_common::{map_to_display, DisplayGeometry, Region};
///
/// let region = Region { x: 100.0, y: 50.0, width: 40.0, height: 20.0 };
/// let geometry = DisplayGeometry::new(300.0, 150.0, 600.0, 300.0);
/// let shown = map_to_display(&region, &geometry);
/// assert_eq!((shown.left, shown.top, shown.width, shown.height), (50.0, 25.0, 20.0, 10.0));
/// ```
pub fn map_to_display(region: &Region, geometry: &DisplayGeometry) -> DisplayRegion {
    debug_assert!(geometry.is_measurable(), "natural size must be positive");

    let scale_x = geometry.scale_x();
    let scale_y = geometry.scale_y();

    DisplayRegion {
        left: region.x * scale_x,
        top: region.y * scale_y,
        width: region.width * scale_x,
        height: region.height * scale_y,
    }
}

/// 現在の状態からオーバーレイ矩形を導出
///
/// 表示するのは、診断モードかつ診断結果に病変部位があり、
/// 画像寸法が取得済みの場合のみ
pub fn derive_overlay(
    mode: AnalysisMode,
    state: &RequestState,
    geometry: Option<&DisplayGeometry>,
) -> Option<DisplayRegion> {
    if mode != AnalysisMode::Diagnosis {
        return None;
    }

    let region = match state {
        RequestState::Success(AnalysisResult::Diagnosis(result)) => result.disease_location?,
        _ => return None,
    };

    let geometry = geometry.filter(|g| g.is_measurable())?;
    Some(map_to_display(&region, geometry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiagnosisResult, RecognitionResult};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn diagnosis_with_location(location: Option<Region>) -> RequestState {
        RequestState::Success(AnalysisResult::Diagnosis(DiagnosisResult {
            disease: "Leaf Spot".to_string(),
            disease_location: location,
            ..Default::default()
        }))
    }

    const SAMPLE_REGION: Region = Region { x: 100.0, y: 50.0, width: 40.0, height: 20.0 };

    // =============================================
    // map_to_display テスト
    // =============================================

    #[test]
    fn test_map_to_display_half_scale() {
        let geometry = DisplayGeometry::new(300.0, 150.0, 600.0, 300.0);
        let shown = map_to_display(&SAMPLE_REGION, &geometry);
        assert_eq!(
            shown,
            DisplayRegion { left: 50.0, top: 25.0, width: 20.0, height: 10.0 }
        );
    }

    #[test]
    fn test_map_to_display_identity() {
        let geometry = DisplayGeometry::new(640.0, 480.0, 640.0, 480.0);
        let shown = map_to_display(&SAMPLE_REGION, &geometry);
        assert_eq!(
            shown,
            DisplayRegion { left: 100.0, top: 50.0, width: 40.0, height: 20.0 }
        );
    }

    #[test]
    fn test_map_to_display_axes_are_independent() {
        // 横だけ縮小、縦は拡大（アスペクト比を保たない表示）
        let geometry = DisplayGeometry::new(200.0, 600.0, 800.0, 300.0);
        let shown = map_to_display(&SAMPLE_REGION, &geometry);
        assert!(approx(shown.left, 25.0));
        assert!(approx(shown.width, 10.0));
        assert!(approx(shown.top, 100.0));
        assert!(approx(shown.height, 40.0));
    }

    #[test]
    fn test_map_to_display_scale_invariance() {
        let geometries = [
            DisplayGeometry::new(300.0, 150.0, 600.0, 300.0),
            DisplayGeometry::new(1024.0, 768.0, 4032.0, 3024.0),
            DisplayGeometry::new(37.0, 91.0, 13.0, 7.0),
        ];
        let regions = [
            SAMPLE_REGION,
            Region { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
            Region { x: 3999.5, y: 12.25, width: 8.0, height: 2900.0 },
        ];

        for g in &geometries {
            for r in &regions {
                let shown = map_to_display(r, g);
                assert!(approx(shown.left / g.offset_width, r.x / g.natural_width));
                assert!(approx(shown.top / g.offset_height, r.y / g.natural_height));
                assert!(approx(shown.width / g.offset_width, r.width / g.natural_width));
                assert!(approx(shown.height / g.offset_height, r.height / g.natural_height));
            }
        }
    }

    #[test]
    fn test_map_to_display_is_linear() {
        let g = DisplayGeometry::new(300.0, 150.0, 600.0, 300.0);
        let a = Region { x: 10.0, y: 20.0, width: 30.0, height: 40.0 };
        let b = Region { x: 5.0, y: 7.0, width: 11.0, height: 13.0 };
        let sum = Region {
            x: a.x + b.x,
            y: a.y + b.y,
            width: a.width + b.width,
            height: a.height + b.height,
        };

        let (ma, mb, ms) = (map_to_display(&a, &g), map_to_display(&b, &g), map_to_display(&sum, &g));
        assert!(approx(ms.left, ma.left + mb.left));
        assert!(approx(ms.top, ma.top + mb.top));
        assert!(approx(ms.width, ma.width + mb.width));
        assert!(approx(ms.height, ma.height + mb.height));
    }

    #[test]
    fn test_map_to_display_does_not_clamp() {
        let geometry = DisplayGeometry::new(300.0, 150.0, 600.0, 300.0);
        let outside = Region { x: 700.0, y: -40.0, width: 200.0, height: 100.0 };
        let shown = map_to_display(&outside, &geometry);
        assert_eq!(
            shown,
            DisplayRegion { left: 350.0, top: -20.0, width: 100.0, height: 50.0 }
        );
    }

    #[test]
    fn test_map_to_display_deterministic() {
        let geometry = DisplayGeometry::new(333.0, 222.0, 1000.0, 700.0);
        assert_eq!(
            map_to_display(&SAMPLE_REGION, &geometry),
            map_to_display(&SAMPLE_REGION, &geometry)
        );
    }

    #[test]
    fn test_is_measurable() {
        assert!(DisplayGeometry::new(300.0, 150.0, 600.0, 300.0).is_measurable());
        assert!(!DisplayGeometry::new(300.0, 150.0, 0.0, 300.0).is_measurable());
        assert!(!DisplayGeometry::new(300.0, 150.0, 600.0, 0.0).is_measurable());
        assert!(!DisplayGeometry::default().is_measurable());
    }

    #[test]
    fn test_to_css() {
        let region = DisplayRegion { left: 50.0, top: 25.0, width: 20.5, height: 10.0 };
        assert_eq!(
            region.to_css(),
            "left: 50.00px; top: 25.00px; width: 20.50px; height: 10.00px;"
        );
    }

    // =============================================
    // derive_overlay テスト
    // =============================================

    #[test]
    fn test_derive_overlay_shown() {
        let geometry = DisplayGeometry::new(300.0, 150.0, 600.0, 300.0);
        let state = diagnosis_with_location(Some(SAMPLE_REGION));

        let overlay = derive_overlay(AnalysisMode::Diagnosis, &state, Some(&geometry));
        assert_eq!(
            overlay,
            Some(DisplayRegion { left: 50.0, top: 25.0, width: 20.0, height: 10.0 })
        );
    }

    #[test]
    fn test_derive_overlay_requires_geometry() {
        let state = diagnosis_with_location(Some(SAMPLE_REGION));
        assert_eq!(derive_overlay(AnalysisMode::Diagnosis, &state, None), None);

        let unloaded = DisplayGeometry::new(300.0, 150.0, 0.0, 0.0);
        assert_eq!(derive_overlay(AnalysisMode::Diagnosis, &state, Some(&unloaded)), None);
    }

    #[test]
    fn test_derive_overlay_requires_location() {
        let geometry = DisplayGeometry::new(300.0, 150.0, 600.0, 300.0);
        let state = diagnosis_with_location(None);
        assert_eq!(derive_overlay(AnalysisMode::Diagnosis, &state, Some(&geometry)), None);
    }

    #[test]
    fn test_derive_overlay_requires_diagnosis_mode() {
        let geometry = DisplayGeometry::new(300.0, 150.0, 600.0, 300.0);
        let state = diagnosis_with_location(Some(SAMPLE_REGION));
        assert_eq!(derive_overlay(AnalysisMode::Recognition, &state, Some(&geometry)), None);
    }

    #[test]
    fn test_derive_overlay_other_states() {
        let geometry = DisplayGeometry::new(300.0, 150.0, 600.0, 300.0);
        let recognition = RequestState::Success(AnalysisResult::Recognition(RecognitionResult {
            plant_name: "Pothos".to_string(),
            ..Default::default()
        }));

        for state in [
            RequestState::Idle,
            RequestState::Loading,
            RequestState::Failed("boom".to_string()),
            recognition,
        ] {
            assert_eq!(derive_overlay(AnalysisMode::Diagnosis, &state, Some(&geometry)), None);
        }
    }
}
