//! Static lookup data served by the language, template and category endpoints.

use crate::models::{FieldExplanation, FormCategory, FormExplanationRequest, FormTemplate, Language};

/// (code, name, native name)
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("English", "English", "English"),
    ("Spanish", "Spanish", "Español"),
    ("French", "French", "Français"),
    ("German", "German", "Deutsch"),
    ("Arabic", "Arabic", "العربية"),
    ("Ukrainian", "Ukrainian", "Українська"),
    ("Russian", "Russian", "Русский"),
    ("Polish", "Polish", "Polski"),
    ("Turkish", "Turkish", "Türkçe"),
    ("Persian", "Persian", "فارسی"),
    ("Pashto", "Pashto", "پښتو"),
    ("Dari", "Dari", "دری"),
    ("Portuguese", "Portuguese", "Português"),
    ("Italian", "Italian", "Italiano"),
    ("Dutch", "Dutch", "Nederlands"),
    ("Swedish", "Swedish", "Svenska"),
    ("Norwegian", "Norwegian", "Norsk"),
    ("Danish", "Danish", "Dansk"),
    ("Finnish", "Finnish", "Suomi"),
];

/// (id, name, country, category, description, difficulty, estimated time)
const TEMPLATES: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    (
        "visa-application-us",
        "US Visa Application (I-94)",
        "US",
        "immigration",
        "Tourist and temporary visitor visa application",
        "medium",
        "30-45 minutes",
    ),
    (
        "employment-auth-us",
        "Employment Authorization (I-765)",
        "US",
        "employment",
        "Work authorization application",
        "high",
        "60-90 minutes",
    ),
    (
        "residence-permit-de",
        "German Residence Permit",
        "DE",
        "immigration",
        "Application for German residence permit",
        "high",
        "45-60 minutes",
    ),
    (
        "housing-benefit-uk",
        "UK Housing Benefit Application",
        "UK",
        "benefits",
        "Application for housing assistance",
        "medium",
        "30-45 minutes",
    ),
];

/// Category ids offered as template filters.
pub const TEMPLATE_CATEGORIES: &[&str] =
    &["immigration", "employment", "benefits", "healthcare", "education"];

pub const TEMPLATE_COUNTRIES: &[&str] = &["US", "UK", "DE", "FR", "CA", "AU", "SE", "NO"];

/// (id, name, description, icon)
const CATEGORIES: &[(&str, &str, &str, &str)] = &[
    (
        "immigration",
        "Immigration & Visa",
        "Visa applications, residence permits, citizenship forms",
        "passport",
    ),
    (
        "employment",
        "Employment",
        "Work permits, job applications, employment benefits",
        "briefcase",
    ),
    (
        "benefits",
        "Social Benefits",
        "Healthcare, housing assistance, social services",
        "heart",
    ),
    (
        "healthcare",
        "Healthcare",
        "Medical forms, insurance applications, health services",
        "medical",
    ),
    (
        "education",
        "Education",
        "School enrollment, university applications, credentials",
        "graduation-cap",
    ),
    (
        "banking",
        "Banking & Finance",
        "Bank account opening, loan applications, tax forms",
        "dollar-sign",
    ),
];

pub fn languages() -> Vec<Language> {
    LANGUAGES
        .iter()
        .map(|(code, name, native_name)| Language {
            code: code.to_string(),
            name: name.to_string(),
            native_name: native_name.to_string(),
        })
        .collect()
}

/// Templates matching both filters. Country compares case-insensitively,
/// category exactly; an absent filter matches everything.
pub fn templates(country: Option<&str>, category: Option<&str>) -> Vec<FormTemplate> {
    TEMPLATES
        .iter()
        .filter(|t| country.map_or(true, |c| t.2.eq_ignore_ascii_case(c)))
        .filter(|t| category.map_or(true, |c| t.3 == c))
        .map(
            |(id, name, country, category, description, difficulty, estimated_time)| FormTemplate {
                id: id.to_string(),
                name: name.to_string(),
                country: country.to_string(),
                category: category.to_string(),
                description: description.to_string(),
                difficulty: difficulty.to_string(),
                estimated_time: estimated_time.to_string(),
            },
        )
        .collect()
}

pub fn categories() -> Vec<FormCategory> {
    CATEGORIES
        .iter()
        .map(|(id, name, description, icon)| FormCategory {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        })
        .collect()
}

/// Canned guidance for a single form field. Does not call the model.
pub fn explain_field(request: &FormExplanationRequest) -> FieldExplanation {
    FieldExplanation {
        field_name: request.field_name.clone(),
        explanation: format!(
            "Detailed explanation for {} in {}",
            request.field_name, request.target_language
        ),
        example_values: vec!["Example 1".to_string(), "Example 2".to_string()],
        common_mistakes: vec!["Don't leave blank".to_string(), "Use proper format".to_string()],
        required_documents: vec!["Supporting document if needed".to_string()],
        tips: vec![
            "Be accurate and honest".to_string(),
            "Double-check spelling".to_string(),
            "Keep copies of everything".to_string(),
        ],
    }
}
