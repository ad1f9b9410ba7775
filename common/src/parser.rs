//! APIレスポンスパーサー（Result Interpreter）
//!
//! `/predict` のレスポンス（エンベロープ）を、要求したモードに応じて
//! DiagnosisResult / RecognitionResult のどちらかに変換する。
//! どちらの形かは明示的なタグではなく、モードごとの必須フィールドの有無で判定する:
//! - diagnosis: `disease`
//! - recognition: `plant_name`

use crate::error::{Error, Result};
use crate::types::{
    AnalysisMode, AnalysisResult, CareGuide, DiagnosisResult, PestsAndDiseases, RecognitionResult,
    Region, Severity, Soil,
};
use serde::Deserialize;
use serde_json::Value;

/// バックエンドが返しうる全フィールド（両モード共通のエンベロープ）
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Envelope {
    id: Option<String>,
    inference_ms: Option<f64>,

    // diagnosis
    disease: Option<String>,
    confidence: Option<f64>,
    description: Option<String>,
    treatment: Option<String>,
    suggestions: Option<Vec<String>>,
    severity: Option<String>,
    plant_type: Option<String>,
    affected_parts: Option<Vec<String>>,
    causative_agent: Option<String>,
    treatment_urgency: Option<String>,
    disease_location: Option<Region>,

    // recognition
    plant_name: Option<String>,
    scientific_name: Option<String>,
    genus: Option<String>,
    common_names: Option<Vec<String>>,
    tags: Option<Vec<String>>,
    watering: Option<String>,
    sunlight: Option<String>,
    temperature: Option<String>,
    humidity: Option<String>,
    fertilizing: Option<String>,
    repotting: Option<String>,
    soil: Option<Soil>,
    pests_and_diseases: Option<PestsAndDiseases>,
}

/// レスポンス本文（JSON文字列）をパースして解釈
///
/// # Returns
/// * `Err(Error::Json)` - JSONとして不正
/// * `Err(Error::Interpretation)` - 必須フィールド欠落・型不一致
pub fn parse_response(mode: AnalysisMode, body: &str) -> Result<AnalysisResult> {
    let raw: Value = serde_json::from_str(body)?;
    interpret(mode, &raw)
}

/// パース済みJSONを要求モードの結果型に変換
///
/// # Examples
/// ```
/// use plant_ai_common::{interpret, AnalysisMode};
///
/// let raw = serde_json::json!({"plant_name": "Pothos"});
/// let result = interpret(AnalysisMode::Recognition, &raw).unwrap();
/// assert_eq!(result.as_recognition().unwrap().plant_name, "Pothos");
/// assert!(interpret(AnalysisMode::Diagnosis, &raw).is_err());
/// ```
pub fn interpret(mode: AnalysisMode, raw: &Value) -> Result<AnalysisResult> {
    if !raw.is_object() {
        return Err(Error::Interpretation(format!(
            "expected a JSON object, got {}",
            json_kind(raw)
        )));
    }

    let envelope = Envelope::deserialize(raw)
        .map_err(|e| Error::Interpretation(format!("unusable {} payload: {}", mode, e)))?;

    let result = match mode {
        AnalysisMode::Diagnosis => AnalysisResult::Diagnosis(into_diagnosis(envelope)?),
        AnalysisMode::Recognition => AnalysisResult::Recognition(into_recognition(envelope)?),
    };
    Ok(result)
}

fn into_diagnosis(envelope: Envelope) -> Result<DiagnosisResult> {
    let disease = envelope
        .disease
        .ok_or_else(|| Error::Interpretation("diagnosis payload has no `disease`".into()))?;

    let severity = envelope.severity.as_deref().and_then(|s| {
        let parsed = Severity::parse(s);
        if parsed.is_none() {
            log::debug!("unrecognised severity {:?}, treating as absent", s);
        }
        parsed
    });

    Ok(DiagnosisResult {
        id: envelope.id,
        disease,
        confidence: normalize_confidence(envelope.confidence),
        description: envelope.description,
        treatment: envelope.treatment,
        suggestions: envelope.suggestions.unwrap_or_default(),
        severity,
        plant_type: envelope.plant_type,
        affected_parts: envelope.affected_parts.unwrap_or_default(),
        causative_agent: envelope.causative_agent,
        treatment_urgency: envelope.treatment_urgency,
        disease_location: envelope.disease_location,
        inference_ms: normalize_inference_ms(envelope.inference_ms),
    })
}

fn into_recognition(envelope: Envelope) -> Result<RecognitionResult> {
    let plant_name = envelope
        .plant_name
        .ok_or_else(|| Error::Interpretation("recognition payload has no `plant_name`".into()))?;

    Ok(RecognitionResult {
        id: envelope.id,
        plant_name,
        scientific_name: envelope.scientific_name,
        genus: envelope.genus,
        common_names: envelope.common_names.unwrap_or_default(),
        tags: envelope.tags.unwrap_or_default(),
        description: envelope.description,
        care: CareGuide {
            watering: envelope.watering,
            sunlight: envelope.sunlight,
            temperature: envelope.temperature,
            humidity: envelope.humidity,
            fertilizing: envelope.fertilizing,
            repotting: envelope.repotting,
        },
        soil: envelope.soil,
        pests_and_diseases: envelope.pests_and_diseases,
        inference_ms: normalize_inference_ms(envelope.inference_ms),
    })
}

/// 欠落・非有限値は0、範囲外は[0, 1]に丸める
fn normalize_confidence(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

fn normalize_inference_ms(value: Option<f64>) -> u64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.round() as u64,
        _ => 0,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
