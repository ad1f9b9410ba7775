//! 解析結果の型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - AnalysisMode: 解析モード（病害診断 / 植物同定）
//! - DiagnosisResult: 病害診断の結果
//! - RecognitionResult: 植物同定の結果
//! - AnalysisResult: 上記2種類のタグ付きユニオン

use serde::{Deserialize, Serialize};
use std::fmt;

/// 解析モード
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    #[default]
    Diagnosis,
    Recognition,
}

impl AnalysisMode {
    /// multipartの`mode`フィールドに載せる値
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Diagnosis => "diagnosis",
            AnalysisMode::Recognition => "recognition",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AnalysisMode::Diagnosis => AnalysisMode::Recognition,
            AnalysisMode::Recognition => AnalysisMode::Diagnosis,
        }
    }
}

impl std::str::FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "diagnosis" | "d" => Ok(AnalysisMode::Diagnosis),
            "recognition" | "r" => Ok(AnalysisMode::Recognition),
            _ => Err(format!("Unknown mode: {}. Use diagnosis or recognition", s)),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 病変部位（元画像のピクセル座標、x/yは左上）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// 重症度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// 大文字小文字を区別せずに4段階のいずれかへ変換
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Severity::Low),
            "moderate" => Some(Severity::Moderate),
            "high" => Some(Severity::High),
            "critical" => Some(Severity::Critical),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

/// 病害診断の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub disease: String,

    /// 0.0〜1.0
    #[serde(default)]
    pub confidence: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<String>,

    #[serde(default)]
    pub suggestions: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_type: Option<String>,

    #[serde(default)]
    pub affected_parts: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub causative_agent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_urgency: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_location: Option<Region>,

    #[serde(default)]
    pub inference_ms: u64,
}

impl DiagnosisResult {
    /// 表示用の信頼度（%）
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

/// 土壌情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Soil {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub drainage: Option<String>,
    pub ph: Option<String>,
}

/// 病害虫情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PestsAndDiseases {
    pub pests: Vec<String>,
    pub disease: Vec<String>,
}

/// 育て方（固定6項目、いずれも自由記述）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareGuide {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watering: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fertilizing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repotting: Option<String>,
}

impl CareGuide {
    /// 値のある項目だけを表示順に返す
    pub fn entries(&self) -> Vec<(CareAttribute, &str)> {
        [
            (CareAttribute::Watering, &self.watering),
            (CareAttribute::Sunlight, &self.sunlight),
            (CareAttribute::Temperature, &self.temperature),
            (CareAttribute::Humidity, &self.humidity),
            (CareAttribute::Fertilizing, &self.fertilizing),
            (CareAttribute::Repotting, &self.repotting),
        ]
        .into_iter()
        .filter_map(|(attr, value)| value.as_deref().map(|v| (attr, v)))
        .collect()
    }
}

/// 育て方の項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareAttribute {
    Watering,
    Sunlight,
    Temperature,
    Humidity,
    Fertilizing,
    Repotting,
}

/// 植物同定の結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub plant_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genus: Option<String>,

    #[serde(default)]
    pub common_names: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub care: CareGuide,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<Soil>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pests_and_diseases: Option<PestsAndDiseases>,

    #[serde(default)]
    pub inference_ms: u64,
}

/// AI解析結果
///
/// 境界（Result Interpreter）で必ずこの形に変換し、以降は生JSONを扱わない
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalysisResult {
    Diagnosis(DiagnosisResult),
    Recognition(RecognitionResult),
}

impl AnalysisResult {
    /// この結果を生成したモード
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisResult::Diagnosis(_) => AnalysisMode::Diagnosis,
            AnalysisResult::Recognition(_) => AnalysisMode::Recognition,
        }
    }

    pub fn inference_ms(&self) -> u64 {
        match self {
            AnalysisResult::Diagnosis(d) => d.inference_ms,
            AnalysisResult::Recognition(r) => r.inference_ms,
        }
    }

    pub fn as_diagnosis(&self) -> Option<&DiagnosisResult> {
        match self {
            AnalysisResult::Diagnosis(d) => Some(d),
            AnalysisResult::Recognition(_) => None,
        }
    }

    pub fn as_recognition(&self) -> Option<&RecognitionResult> {
        match self {
            AnalysisResult::Recognition(r) => Some(r),
            AnalysisResult::Diagnosis(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_default_is_diagnosis() {
        assert_eq!(AnalysisMode::default(), AnalysisMode::Diagnosis);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("diagnosis".parse::<AnalysisMode>().unwrap(), AnalysisMode::Diagnosis);
        assert_eq!("Recognition".parse::<AnalysisMode>().unwrap(), AnalysisMode::Recognition);
        assert_eq!("r".parse::<AnalysisMode>().unwrap(), AnalysisMode::Recognition);
        assert!("identify".parse::<AnalysisMode>().is_err());
    }

    #[test]
    fn test_mode_toggled() {
        assert_eq!(AnalysisMode::Diagnosis.toggled(), AnalysisMode::Recognition);
        assert_eq!(AnalysisMode::Recognition.toggled(), AnalysisMode::Diagnosis);
    }

    #[test]
    fn test_mode_serialize() {
        let json = serde_json::to_string(&AnalysisMode::Recognition).expect("シリアライズ失敗");
        assert_eq!(json, "\"recognition\"");
    }

    #[test]
    fn test_severity_parse() {
        assert_eq!(Severity::parse("High"), Some(Severity::High));
        assert_eq!(Severity::parse(" critical "), Some(Severity::Critical));
        assert_eq!(Severity::parse("MODERATE"), Some(Severity::Moderate));
        assert_eq!(Severity::parse("Unknown"), None);
        assert_eq!(Severity::parse(""), None);
    }

    #[test]
    fn test_care_guide_entries_skip_missing() {
        let care = CareGuide {
            watering: Some("Once in 2 weeks".to_string()),
            humidity: Some("40-60%".to_string()),
            ..Default::default()
        };

        let entries = care.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (CareAttribute::Watering, "Once in 2 weeks"));
        assert_eq!(entries[1], (CareAttribute::Humidity, "40-60%"));
    }

    #[test]
    fn test_analysis_result_serialize_tagged() {
        let result = AnalysisResult::Diagnosis(DiagnosisResult {
            disease: "Leaf Spot".to_string(),
            confidence: 0.8,
            ..Default::default()
        });

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"kind\":\"diagnosis\""));
        assert!(json.contains("\"disease\":\"Leaf Spot\""));
        assert!(!json.contains("disease_location"));
    }

    #[test]
    fn test_recognition_serialize_flattens_care() {
        let result = AnalysisResult::Recognition(RecognitionResult {
            plant_name: "Snake plant".to_string(),
            care: CareGuide {
                sunlight: Some("Part shade".to_string()),
                ..Default::default()
            },
            ..Default::default()
        });

        let json = serde_json::to_string(&result).expect("シリアライズ失敗");
        assert!(json.contains("\"kind\":\"recognition\""));
        assert!(json.contains("\"sunlight\":\"Part shade\""));
        assert!(!json.contains("\"care\""));
    }

    #[test]
    fn test_analysis_result_accessors() {
        let result = AnalysisResult::Recognition(RecognitionResult {
            plant_name: "Pothos".to_string(),
            inference_ms: 812,
            ..Default::default()
        });

        assert_eq!(result.mode(), AnalysisMode::Recognition);
        assert_eq!(result.inference_ms(), 812);
        assert!(result.as_diagnosis().is_none());
        assert_eq!(result.as_recognition().map(|r| r.plant_name.as_str()), Some("Pothos"));
    }

    #[test]
    fn test_confidence_percent() {
        let result = DiagnosisResult {
            confidence: 0.855,
            ..Default::default()
        };
        assert!((result.confidence_percent() - 85.5).abs() < 1e-9);
    }
}
