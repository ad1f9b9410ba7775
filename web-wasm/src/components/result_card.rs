//! 解析結果カード

use leptos::prelude::*;
use plant_ai_common::{
    tr, AnalysisResult, CareAttribute, DiagnosisResult, Key, Language, RecognitionResult, Severity,
};

#[component]
pub fn ResultCard(result: AnalysisResult, language: Language) -> impl IntoView {
    match result {
        AnalysisResult::Diagnosis(d) => view! { <DiagnosisCard result=d language=language /> }.into_any(),
        AnalysisResult::Recognition(r) => {
            view! { <RecognitionCard result=r language=language /> }.into_any()
        }
    }
}

/// 重症度バッジのCSSクラス
pub fn severity_class(severity: Option<Severity>) -> &'static str {
    match severity {
        Some(Severity::Low) => "badge severity-low",
        Some(Severity::Moderate) => "badge severity-moderate",
        Some(Severity::High) => "badge severity-high",
        Some(Severity::Critical) => "badge severity-critical",
        None => "badge",
    }
}

fn care_key(attr: CareAttribute) -> Key {
    match attr {
        CareAttribute::Watering => Key::Watering,
        CareAttribute::Sunlight => Key::Sunlight,
        CareAttribute::Temperature => Key::Temperature,
        CareAttribute::Humidity => Key::Humidity,
        CareAttribute::Fertilizing => Key::Fertilizing,
        CareAttribute::Repotting => Key::Repotting,
    }
}

fn row(label: &'static str, value: Option<String>) -> impl IntoView {
    value.filter(|v| !v.is_empty()).map(|v| {
        view! {
            <div class="result-row">
                <span class="label">{label}</span>
                <span class="value">{v}</span>
            </div>
        }
    })
}

fn joined(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(", "))
}

#[component]
fn DiagnosisCard(result: DiagnosisResult, language: Language) -> impl IntoView {
    let t = move |key| tr(language, key);
    let confidence = format!("{:.1}%", result.confidence_percent());
    let suggestions = result.suggestions.clone();

    view! {
        <div class="result-card diagnosis">
            <h2>{result.disease.clone()}</h2>
            <div class="result-meta">
                <span class="badge">{format!("{}: {}", t(Key::Confidence), confidence)}</span>
                {result.severity.map(|s| {
                    view! { <span class=severity_class(Some(s))>{format!("{}: {}", t(Key::Severity), s.as_str())}</span> }
                })}
            </div>

            {row(t(Key::PlantType), result.plant_type.clone())}
            {row(t(Key::CausativeAgent), result.causative_agent.clone())}
            {row(t(Key::TreatmentUrgency), result.treatment_urgency.clone())}
            {row(t(Key::AffectedParts), joined(&result.affected_parts))}
            {row(t(Key::Description), result.description.clone())}
            {row(t(Key::Treatment), result.treatment.clone())}

            {(!suggestions.is_empty()).then(|| {
                view! {
                    <h3>{t(Key::Suggestions)}</h3>
                    <ol class="suggestions">
                        {suggestions.into_iter().map(|s| view! { <li>{s}</li> }).collect_view()}
                    </ol>
                }
            })}

            <p class="text-muted">{format!("{}: {} ms", t(Key::InferenceTime), result.inference_ms)}</p>
        </div>
    }
}

#[component]
fn RecognitionCard(result: RecognitionResult, language: Language) -> impl IntoView {
    let t = move |key| tr(language, key);

    let care_rows = result
        .care
        .entries()
        .into_iter()
        .map(|(attr, value)| row(t(care_key(attr)), Some(value.to_string())))
        .collect_view();

    let soil = result.soil.clone().map(|soil| {
        view! {
            <h3>{t(Key::Soil)}</h3>
            {row(t(Key::Soil), soil.kind)}
            {row(t(Key::Drainage), soil.drainage)}
            {row(t(Key::Ph), soil.ph)}
        }
    });

    let pests = result.pests_and_diseases.clone().map(|pd| {
        view! {
            {row(t(Key::Pests), joined(&pd.pests))}
            {row(t(Key::Diseases), joined(&pd.disease))}
        }
    });

    let tags = result.tags.clone();

    view! {
        <div class="result-card recognition">
            <h2>{result.plant_name.clone()}</h2>
            {result.scientific_name.clone().map(|s| view! { <p class="scientific-name"><em>{s}</em></p> })}
            <div class="result-meta">
                {tags.into_iter().map(|tag| view! { <span class="badge">{tag}</span> }).collect_view()}
            </div>

            {row(t(Key::Genus), result.genus.clone())}
            {row(t(Key::CommonNames), joined(&result.common_names))}
            {row(t(Key::Description), result.description.clone())}
            {care_rows}
            {soil}
            {pests}

            <p class="text-muted">{format!("{}: {} ms", t(Key::InferenceTime), result.inference_ms)}</p>
        </div>
    }
}
