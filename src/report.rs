//! 解析結果の端末表示

use plant_ai_common::{
    tr, AnalysisResult, DiagnosisResult, DisplayRegion, Key, Language, RecognitionResult,
};

/// 解析結果をテキストに整形
pub fn render(result: &AnalysisResult, overlay: Option<&DisplayRegion>, language: Language) -> String {
    let mut out = String::new();
    match result {
        AnalysisResult::Diagnosis(d) => render_diagnosis(&mut out, d, language),
        AnalysisResult::Recognition(r) => render_recognition(&mut out, r, language),
    }

    if let Some(region) = overlay {
        out.push_str(&format!(
            "  [overlay] left={:.1} top={:.1} width={:.1} height={:.1}\n",
            region.left, region.top, region.width, region.height
        ));
    }

    out.push_str(&format!("  {}: {} ms\n", tr(language, Key::InferenceTime), result.inference_ms()));
    out
}

fn render_diagnosis(out: &mut String, d: &DiagnosisResult, language: Language) {
    let t = |key| tr(language, key);

    out.push_str(&format!("🩺 {}\n", d.disease));
    out.push_str(&format!("  {}: {:.1}%\n", t(Key::Confidence), d.confidence_percent()));

    if let Some(severity) = d.severity {
        field(out, t(Key::Severity), severity.as_str());
    }
    optional(out, t(Key::PlantType), d.plant_type.as_deref());
    optional(out, t(Key::CausativeAgent), d.causative_agent.as_deref());
    optional(out, t(Key::TreatmentUrgency), d.treatment_urgency.as_deref());
    list(out, t(Key::AffectedParts), &d.affected_parts);
    optional(out, t(Key::Description), d.description.as_deref());
    optional(out, t(Key::Treatment), d.treatment.as_deref());

    if !d.suggestions.is_empty() {
        out.push_str(&format!("  {}:\n", t(Key::Suggestions)));
        for (i, s) in d.suggestions.iter().enumerate() {
            out.push_str(&format!("    {}. {}\n", i + 1, s));
        }
    }
}

fn render_recognition(out: &mut String, r: &RecognitionResult, language: Language) {
    let t = |key| tr(language, key);

    out.push_str(&format!("🌿 {}\n", r.plant_name));
    optional(out, t(Key::ScientificName), r.scientific_name.as_deref());
    optional(out, t(Key::Genus), r.genus.as_deref());
    list(out, t(Key::CommonNames), &r.common_names);
    list(out, t(Key::Tags), &r.tags);
    optional(out, t(Key::Description), r.description.as_deref());

    for (attr, value) in r.care.entries() {
        field(out, t(care_key(attr)), value);
    }

    if let Some(soil) = &r.soil {
        out.push_str(&format!("  {}:\n", t(Key::Soil)));
        optional(out, &format!("  {}", t(Key::Soil)), soil.kind.as_deref());
        optional(out, &format!("  {}", t(Key::Drainage)), soil.drainage.as_deref());
        optional(out, &format!("  {}", t(Key::Ph)), soil.ph.as_deref());
    }

    if let Some(pd) = &r.pests_and_diseases {
        list(out, t(Key::Pests), &pd.pests);
        list(out, t(Key::Diseases), &pd.disease);
    }
}

fn care_key(attr: plant_ai_common::CareAttribute) -> Key {
    use plant_ai_common::CareAttribute::*;
    match attr {
        Watering => Key::Watering,
        Sunlight => Key::Sunlight,
        Temperature => Key::Temperature,
        Humidity => Key::Humidity,
        Fertilizing => Key::Fertilizing,
        Repotting => Key::Repotting,
    }
}

fn field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("  {}: {}\n", label, value));
}

fn optional(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
        field(out, label, v);
    }
}

fn list(out: &mut String, label: &str, values: &[String]) {
    if !values.is_empty() {
        field(out, label, &values.join(", "));
    }
}
