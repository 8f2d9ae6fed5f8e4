use serde::{Deserialize, Serialize};

/// One field of an analyzed form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Name or identifier of the field
    pub field_name: String,
    /// Type of field (text, checkbox, dropdown, etc.)
    pub field_type: String,
    pub label: String,
    /// User-friendly explanation in the target language
    pub explanation: String,
    #[serde(default)]
    pub required: bool,
    pub example_value: Option<String>,
    #[serde(default)]
    pub validation_rules: Vec<String>,
}

/// Result of `POST /forms/analyze`.
///
/// `fields` and `instructions` are shown to the user step by step, so their
/// order matters. Field names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormAnalysisResponse {
    pub form_type: String,
    pub title: String,
    /// Overall form description in the target language
    pub description: String,
    pub fields: Vec<FormField>,
    pub instructions: Vec<String>,
    #[serde(default)]
    pub required_documents: Vec<String>,
    pub estimated_time: Option<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Body of `POST /forms/explain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormExplanationRequest {
    pub field_name: String,
    /// Context around the field
    pub field_context: String,
    pub form_type: String,
    pub target_language: String,
    #[serde(default)]
    pub user_situation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldExplanation {
    pub field_name: String,
    pub explanation: String,
    pub example_values: Vec<String>,
    pub common_mistakes: Vec<String>,
    pub required_documents: Vec<String>,
    pub tips: Vec<String>,
}

/// Pre-analyzed form guide offered by `GET /forms/templates`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTemplate {
    pub id: String,
    pub name: String,
    pub country: String,
    /// Category of form (immigration, employment, ...)
    pub category: String,
    pub description: String,
    pub difficulty: String,
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormCategory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}
