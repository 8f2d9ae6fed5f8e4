use serde::{Deserialize, Serialize};

/// Body of `POST /translate/text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextTranslationRequest {
    /// Text to translate
    pub text: String,
    /// Target language, e.g. "Spanish"
    pub target_language: String,
    #[serde(default)]
    pub source_language: Option<String>,
    /// Additional context for the translation
    #[serde(default)]
    pub context: Option<String>,
}

/// Translation result returned by both the image and text endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// Original detected or submitted text
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    /// Always the caller's requested target language, unchanged
    pub target_language: String,
    /// Cultural context and explanation
    pub context_explanation: Option<String>,
    /// Fixed per task, in [0, 1]
    pub confidence: Option<f32>,
    /// Labels of objects detected in the image
    #[serde(default)]
    pub detected_objects: Vec<String>,
}

/// Entry of the supported-language list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
    pub native_name: String,
}
