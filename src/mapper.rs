//! Maps free-text model replies onto the fixed response records.
//!
//! Nothing here can fail: when extraction finds nothing, fixed fallback values
//! are returned instead. Callers get a well-formed record even if the model
//! ignored the requested layout, so a degraded answer looks like a normal one.

use crate::models::{FormAnalysisResponse, FormField, TranslationResponse};

const IMAGE_ORIGINAL_FALLBACK: &str = "Text detected in image";
const AUTO_DETECTED: &str = "auto-detected";
const IMAGE_CONFIDENCE: f32 = 0.85;
const TEXT_CONFIDENCE: f32 = 0.90;

/// Fields recovered by [`scan_labelled_lines`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LabelledLines {
    pub original: Option<String>,
    pub translation: Option<String>,
    pub context: Option<String>,
}

/// Keyword heuristic over the reply's lines.
///
/// A line whose lowercase form mentions "original"/"detected", "translation",
/// or "context"/"cultural" labels the line that follows it. Keywords are tested
/// in that order and only the first matching group applies to a given line.
/// Later labels overwrite earlier ones; a label on the last line is ignored.
pub fn scan_labelled_lines(raw: &str) -> LabelledLines {
    let lines: Vec<&str> = raw.split('\n').collect();
    let mut found = LabelledLines::default();

    for (i, line) in lines.iter().enumerate() {
        let Some(next) = lines.get(i + 1) else {
            break;
        };
        let next = next.trim().to_string();
        let lower = line.to_lowercase();

        if lower.contains("original") || lower.contains("detected") {
            found.original = Some(next);
        } else if lower.contains("translation") {
            found.translation = Some(next);
        } else if lower.contains("context") || lower.contains("cultural") {
            found.context = Some(next);
        }
    }

    found
}

/// Image translation: line heuristic with the whole reply as fallback translation.
pub fn to_image_translation(raw: &str, target_language: &str) -> TranslationResponse {
    let found = scan_labelled_lines(raw);

    TranslationResponse {
        original_text: found
            .original
            .unwrap_or_else(|| IMAGE_ORIGINAL_FALLBACK.to_string()),
        translated_text: found.translation.unwrap_or_else(|| raw.to_string()),
        source_language: AUTO_DETECTED.to_string(),
        target_language: target_language.to_string(),
        context_explanation: found.context,
        confidence: Some(IMAGE_CONFIDENCE),
        detected_objects: Vec::new(),
    }
}

/// Text translation: no scanning. The model writes translation and context
/// together in prose, so the full reply fills both fields.
pub fn to_text_translation(
    raw: &str,
    original_text: &str,
    target_language: &str,
    source_language: Option<&str>,
) -> TranslationResponse {
    TranslationResponse {
        original_text: original_text.to_string(),
        translated_text: raw.to_string(),
        source_language: source_language
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(AUTO_DETECTED)
            .to_string(),
        target_language: target_language.to_string(),
        context_explanation: Some(raw.to_string()),
        confidence: Some(TEXT_CONFIDENCE),
        detected_objects: Vec::new(),
    }
}

/// Form analysis placeholder. The reply becomes the description; everything
/// else is fixed content.
// TODO: extract fields, instructions and documents from the reply once the
// prompt asks the model for tagged sections.
pub fn to_form_analysis(raw: &str) -> FormAnalysisResponse {
    FormAnalysisResponse {
        form_type: "Government Form".to_string(),
        title: "Analyzed Form".to_string(),
        description: raw.to_string(),
        fields: vec![FormField {
            field_name: "sample_field".to_string(),
            field_type: "text".to_string(),
            label: "Sample Field".to_string(),
            explanation: "This is a sample field explanation".to_string(),
            required: true,
            example_value: Some("Example value".to_string()),
            validation_rules: Vec::new(),
        }],
        instructions: vec![
            "Fill out all required fields".to_string(),
            "Provide accurate information".to_string(),
            "Review before submission".to_string(),
        ],
        required_documents: vec!["ID document".to_string(), "Proof of address".to_string()],
        estimated_time: Some("15-30 minutes".to_string()),
        tips: Vec::new(),
    }
}
