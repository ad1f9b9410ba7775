//! 表示文言の多言語テーブル
//!
//! 言語ごとに `Key` を網羅する `match` で定義するため、
//! 訳語の欠落はコンパイルエラーになる

use serde::{Deserialize, Serialize};
use std::fmt;

/// 応答言語（バックエンドへもこのコードで渡す）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    Hi,
    Ta,
    Ml,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Ru,
        Language::Hi,
        Language::Ta,
        Language::Ml,
    ];

    /// multipartの`language`フィールドに載せるコード
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Hi => "hi",
            Language::Ta => "ta",
            Language::Ml => "ml",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_lowercase();
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    /// 言語選択UIに出す自言語名
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
            Language::Hi => "हिन्दी",
            Language::Ta => "தமிழ்",
            Language::Ml => "മലയാളം",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| format!("Unknown language: {}. Use en, ru, hi, ta or ml", s))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// 文言キー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    AppTitle,
    SelectImage,
    DropHint,
    SelectImageFirst,
    InvalidFileType,
    PredictionFailed,
    ServerError,
    Predict,
    Predicting,
    Clear,
    ModeDiagnosis,
    ModeRecognition,
    Language,
    Confidence,
    Severity,
    Suggestions,
    PlantType,
    CausativeAgent,
    TreatmentUrgency,
    AffectedParts,
    Description,
    Treatment,
    InferenceTime,
    ScientificName,
    Genus,
    CommonNames,
    Tags,
    Watering,
    Sunlight,
    Temperature,
    Humidity,
    Fertilizing,
    Repotting,
    Soil,
    Drainage,
    Ph,
    Pests,
    Diseases,
}

impl Key {
    pub const ALL: [Key; 38] = [
        Key::AppTitle,
        Key::SelectImage,
        Key::DropHint,
        Key::SelectImageFirst,
        Key::InvalidFileType,
        Key::PredictionFailed,
        Key::ServerError,
        Key::Predict,
        Key::Predicting,
        Key::Clear,
        Key::ModeDiagnosis,
        Key::ModeRecognition,
        Key::Language,
        Key::Confidence,
        Key::Severity,
        Key::Suggestions,
        Key::PlantType,
        Key::CausativeAgent,
        Key::TreatmentUrgency,
        Key::AffectedParts,
        Key::Description,
        Key::Treatment,
        Key::InferenceTime,
        Key::ScientificName,
        Key::Genus,
        Key::CommonNames,
        Key::Tags,
        Key::Watering,
        Key::Sunlight,
        Key::Temperature,
        Key::Humidity,
        Key::Fertilizing,
        Key::Repotting,
        Key::Soil,
        Key::Drainage,
        Key::Ph,
        Key::Pests,
        Key::Diseases,
    ];
}

/// 文言を引く
pub fn tr(language: Language, key: Key) -> &'static str {
    match language {
        Language::En => en(key),
        Language::Ru => ru(key),
        Language::Hi => hi(key),
        Language::Ta => ta(key),
        Language::Ml => ml(key),
    }
}

fn en(key: Key) -> &'static str {
    match key {
        Key::AppTitle => "PlantAI",
        Key::SelectImage => "Select image",
        Key::DropHint => "Drop a plant photo here or click to choose",
        Key::SelectImageFirst => "Please select an image first",
        Key::InvalidFileType => "Please drop an image file",
        Key::PredictionFailed => "Prediction failed. Please try again",
        Key::ServerError => "Server error",
        Key::Predict => "Analyze",
        Key::Predicting => "Analyzing...",
        Key::Clear => "Clear",
        Key::ModeDiagnosis => "Disease diagnosis",
        Key::ModeRecognition => "Plant recognition",
        Key::Language => "Language",
        Key::Confidence => "Confidence",
        Key::Severity => "Severity",
        Key::Suggestions => "Suggestions",
        Key::PlantType => "Plant type",
        Key::CausativeAgent => "Causative agent",
        Key::TreatmentUrgency => "Treatment urgency",
        Key::AffectedParts => "Affected parts",
        Key::Description => "Description",
        Key::Treatment => "Treatment",
        Key::InferenceTime => "Inference time",
        Key::ScientificName => "Scientific name",
        Key::Genus => "Genus",
        Key::CommonNames => "Common names",
        Key::Tags => "Tags",
        Key::Watering => "Watering",
        Key::Sunlight => "Sunlight",
        Key::Temperature => "Temperature",
        Key::Humidity => "Humidity",
        Key::Fertilizing => "Fertilizing",
        Key::Repotting => "Repotting",
        Key::Soil => "Soil",
        Key::Drainage => "Drainage",
        Key::Ph => "pH",
        Key::Pests => "Pests",
        Key::Diseases => "Diseases",
    }
}

fn ru(key: Key) -> &'static str {
    match key {
        Key::AppTitle => "PlantAI",
        Key::SelectImage => "Выбрать изображение",
        Key::DropHint => "Перетащите фото растения сюда или нажмите для выбора",
        Key::SelectImageFirst => "Сначала выберите изображение",
        Key::InvalidFileType => "Перетащите файл изображения",
        Key::PredictionFailed => "Не удалось выполнить анализ. Попробуйте ещё раз",
        Key::ServerError => "Ошибка сервера",
        Key::Predict => "Анализировать",
        Key::Predicting => "Анализ...",
        Key::Clear => "Очистить",
        Key::ModeDiagnosis => "Диагностика болезней",
        Key::ModeRecognition => "Распознавание растений",
        Key::Language => "Язык",
        Key::Confidence => "Уверенность",
        Key::Severity => "Тяжесть",
        Key::Suggestions => "Рекомендации",
        Key::PlantType => "Тип растения",
        Key::CausativeAgent => "Возбудитель",
        Key::TreatmentUrgency => "Срочность лечения",
        Key::AffectedParts => "Поражённые части",
        Key::Description => "Описание",
        Key::Treatment => "Лечение",
        Key::InferenceTime => "Время анализа",
        Key::ScientificName => "Научное название",
        Key::Genus => "Род",
        Key::CommonNames => "Общие названия",
        Key::Tags => "Теги",
        Key::Watering => "Полив",
        Key::Sunlight => "Освещение",
        Key::Temperature => "Температура",
        Key::Humidity => "Влажность",
        Key::Fertilizing => "Подкормка",
        Key::Repotting => "Пересадка",
        Key::Soil => "Почва",
        Key::Drainage => "Дренаж",
        Key::Ph => "pH",
        Key::Pests => "Вредители",
        Key::Diseases => "Болезни",
    }
}

fn hi(key: Key) -> &'static str {
    match key {
        Key::AppTitle => "PlantAI",
        Key::SelectImage => "छवि चुनें",
        Key::DropHint => "पौधे की फ़ोटो यहाँ छोड़ें या चुनने के लिए क्लिक करें",
        Key::SelectImageFirst => "कृपया पहले एक छवि चुनें",
        Key::InvalidFileType => "कृपया एक छवि फ़ाइल छोड़ें",
        Key::PredictionFailed => "विश्लेषण विफल रहा। कृपया पुनः प्रयास करें",
        Key::ServerError => "सर्वर त्रुटि",
        Key::Predict => "विश्लेषण करें",
        Key::Predicting => "विश्लेषण हो रहा है...",
        Key::Clear => "साफ़ करें",
        Key::ModeDiagnosis => "रोग निदान",
        Key::ModeRecognition => "पौधे की पहचान",
        Key::Language => "भाषा",
        Key::Confidence => "विश्वास",
        Key::Severity => "गंभीरता",
        Key::Suggestions => "सुझाव",
        Key::PlantType => "पौधे का प्रकार",
        Key::CausativeAgent => "रोगकारक",
        Key::TreatmentUrgency => "उपचार की तात्कालिकता",
        Key::AffectedParts => "प्रभावित भाग",
        Key::Description => "विवरण",
        Key::Treatment => "उपचार",
        Key::InferenceTime => "विश्लेषण समय",
        Key::ScientificName => "वैज्ञानिक नाम",
        Key::Genus => "वंश",
        Key::CommonNames => "सामान्य नाम",
        Key::Tags => "टैग",
        Key::Watering => "सिंचाई",
        Key::Sunlight => "धूप",
        Key::Temperature => "तापमान",
        Key::Humidity => "नमी",
        Key::Fertilizing => "उर्वरक",
        Key::Repotting => "गमला बदलना",
        Key::Soil => "मिट्टी",
        Key::Drainage => "जल निकासी",
        Key::Ph => "pH",
        Key::Pests => "कीट",
        Key::Diseases => "रोग",
    }
}

fn ta(key: Key) -> &'static str {
    match key {
        Key::AppTitle => "PlantAI",
        Key::SelectImage => "படத்தைத் தேர்ந்தெடு",
        Key::DropHint => "தாவரப் புகைப்படத்தை இங்கே இழுத்து விடுங்கள் அல்லது தேர்ந்தெடுக்க கிளிக் செய்யுங்கள்",
        Key::SelectImageFirst => "முதலில் ஒரு படத்தைத் தேர்ந்தெடுக்கவும்",
        Key::InvalidFileType => "ஒரு படக் கோப்பை இடவும்",
        Key::PredictionFailed => "பகுப்பாய்வு தோல்வியடைந்தது. மீண்டும் முயற்சிக்கவும்",
        Key::ServerError => "சேவையகப் பிழை",
        Key::Predict => "பகுப்பாய்வு செய்",
        Key::Predicting => "பகுப்பாய்வு செய்யப்படுகிறது...",
        Key::Clear => "அழி",
        Key::ModeDiagnosis => "நோய் கண்டறிதல்",
        Key::ModeRecognition => "தாவர அடையாளம்",
        Key::Language => "மொழி",
        Key::Confidence => "நம்பகத்தன்மை",
        Key::Severity => "தீவிரம்",
        Key::Suggestions => "பரிந்துரைகள்",
        Key::PlantType => "தாவர வகை",
        Key::CausativeAgent => "நோய்க்காரணி",
        Key::TreatmentUrgency => "சிகிச்சை அவசரம்",
        Key::AffectedParts => "பாதிக்கப்பட்ட பகுதிகள்",
        Key::Description => "விளக்கம்",
        Key::Treatment => "சிகிச்சை",
        Key::InferenceTime => "பகுப்பாய்வு நேரம்",
        Key::ScientificName => "அறிவியல் பெயர்",
        Key::Genus => "பேரினம்",
        Key::CommonNames => "பொதுப் பெயர்கள்",
        Key::Tags => "குறிச்சொற்கள்",
        Key::Watering => "நீர்ப்பாசனம்",
        Key::Sunlight => "சூரிய ஒளி",
        Key::Temperature => "வெப்பநிலை",
        Key::Humidity => "ஈரப்பதம்",
        Key::Fertilizing => "உரமிடுதல்",
        Key::Repotting => "தொட்டி மாற்றுதல்",
        Key::Soil => "மண்",
        Key::Drainage => "வடிகால்",
        Key::Ph => "pH",
        Key::Pests => "பூச்சிகள்",
        Key::Diseases => "நோய்கள்",
    }
}

fn ml(key: Key) -> &'static str {
    match key {
        Key::AppTitle => "PlantAI",
        Key::SelectImage => "ചിത്രം തിരഞ്ഞെടുക്കുക",
        Key::DropHint => "ചെടിയുടെ ഫോട്ടോ ഇവിടെ ഇടുക അല്ലെങ്കിൽ തിരഞ്ഞെടുക്കാൻ ക്ലിക്ക് ചെയ്യുക",
        Key::SelectImageFirst => "ആദ്യം ഒരു ചിത്രം തിരഞ്ഞെടുക്കുക",
        Key::InvalidFileType => "ഒരു ചിത്ര ഫയൽ ഇടുക",
        Key::PredictionFailed => "വിശകലനം പരാജയപ്പെട്ടു. വീണ്ടും ശ്രമിക്കുക",
        Key::ServerError => "സെർവർ പിശക്",
        Key::Predict => "വിശകലനം ചെയ്യുക",
        Key::Predicting => "വിശകലനം ചെയ്യുന്നു...",
        Key::Clear => "മായ്ക്കുക",
        Key::ModeDiagnosis => "രോഗനിർണയം",
        Key::ModeRecognition => "ചെടി തിരിച്ചറിയൽ",
        Key::Language => "ഭാഷ",
        Key::Confidence => "വിശ്വാസ്യത",
        Key::Severity => "തീവ്രത",
        Key::Suggestions => "നിർദ്ദേശങ്ങൾ",
        Key::PlantType => "ചെടിയുടെ തരം",
        Key::CausativeAgent => "രോഗകാരി",
        Key::TreatmentUrgency => "ചികിത്സയുടെ അടിയന്തിരത",
        Key::AffectedParts => "ബാധിച്ച ഭാഗങ്ങൾ",
        Key::Description => "വിവരണം",
        Key::Treatment => "ചികിത്സ",
        Key::InferenceTime => "വിശകലന സമയം",
        Key::ScientificName => "ശാസ്ത്രീയ നാമം",
        Key::Genus => "ജനുസ്സ്",
        Key::CommonNames => "പൊതുനാമങ്ങൾ",
        Key::Tags => "ടാഗുകൾ",
        Key::Watering => "നനയ്ക്കൽ",
        Key::Sunlight => "സൂര്യപ്രകാശം",
        Key::Temperature => "താപനില",
        Key::Humidity => "ഈർപ്പം",
        Key::Fertilizing => "വളപ്രയോഗം",
        Key::Repotting => "ചട്ടി മാറ്റൽ",
        Key::Soil => "മണ്ണ്",
        Key::Drainage => "നീർവാർച്ച",
        Key::Ph => "pH",
        Key::Pests => "കീടങ്ങൾ",
        Key::Diseases => "രോഗങ്ങൾ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes_round_trip() {
        for language in Language::ALL {
            assert_eq!(Language::from_code(language.code()), Some(language));
        }
        assert_eq!(Language::from_code(" RU "), Some(Language::Ru));
        assert_eq!(Language::from_code("ja"), None);
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("hi".parse::<Language>().unwrap(), Language::Hi);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_serialize() {
        let json = serde_json::to_string(&Language::Ml).expect("シリアライズ失敗");
        assert_eq!(json, "\"ml\"");
        let parsed: Language = serde_json::from_str("\"ta\"").expect("デシリアライズ失敗");
        assert_eq!(parsed, Language::Ta);
    }

    #[test]
    fn test_every_key_is_non_empty() {
        for language in Language::ALL {
            for key in Key::ALL {
                assert!(!tr(language, key).is_empty(), "{:?}/{:?}", language, key);
            }
        }
    }

    #[test]
    fn test_non_english_tables_are_translated() {
        for language in [Language::Ru, Language::Hi, Language::Ta, Language::Ml] {
            assert_ne!(tr(language, Key::SelectImageFirst), tr(Language::En, Key::SelectImageFirst));
            assert_ne!(tr(language, Key::PredictionFailed), tr(Language::En, Key::PredictionFailed));
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(tr(Language::En, Key::SelectImageFirst), "Please select an image first");
        assert_eq!(tr(Language::Ru, Key::Clear), "Очистить");
    }
}
