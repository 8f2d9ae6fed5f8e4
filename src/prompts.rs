//! Prompt templates for the three assistance tasks.
//!
//! The numbered lists in the user instructions are what the response mapper's
//! keyword scan expects to find echoed back, so keep their wording stable.

use crate::error::ApiError;

pub const IMAGE_TRANSLATION_SYSTEM_PROMPT: &str = "You are a multilingual translation assistant specialized in helping refugees and immigrants. \
Analyze the image, detect any text, and provide accurate translations with cultural context. \
Always include explanations about what the text means in the target culture. \
Focus on practical, helpful information that assists with daily life navigation.";

pub const TEXT_TRANSLATION_SYSTEM_PROMPT: &str = "You are a cultural translation assistant for refugees and immigrants. \
Provide accurate translations with cultural context and practical explanations. \
Help users understand not just what words mean, but how to use them appropriately.";

pub const FORM_ANALYSIS_SYSTEM_PROMPT: &str = "You are a form analysis assistant for refugees and immigrants. \
Analyze forms and provide clear, step-by-step explanations in the user's language. \
Focus on practical guidance that helps people fill out forms correctly. \
Be sensitive to cultural differences and varying levels of bureaucratic familiarity.";

const AUTO_DETECT: &str = "auto-detect";
const GENERAL: &str = "general";
const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ImageTranslation,
    TextTranslation,
    FormAnalysis,
}

impl Task {
    /// Prefix of the error message reported when this task's model call fails.
    pub fn failure_label(&self) -> &'static str {
        match self {
            Task::ImageTranslation => "Translation processing",
            Task::TextTranslation => "Text translation",
            Task::FormAnalysis => "Form analysis",
        }
    }

    fn system_prompt(&self) -> &'static str {
        match self {
            Task::ImageTranslation => IMAGE_TRANSLATION_SYSTEM_PROMPT,
            Task::TextTranslation => TEXT_TRANSLATION_SYSTEM_PROMPT,
            Task::FormAnalysis => FORM_ANALYSIS_SYSTEM_PROMPT,
        }
    }
}

/// User-supplied parameters. Fields a task does not use are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptParams<'a> {
    pub target_language: &'a str,
    pub source_language: Option<&'a str>,
    pub context: Option<&'a str>,
    pub document_type: Option<&'a str>,
    pub country: Option<&'a str>,
    /// Text to translate; required for `Task::TextTranslation`.
    pub text: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("{0}")]
    InvalidArgument(String),
}

impl From<PromptError> for ApiError {
    fn from(err: PromptError) -> Self {
        ApiError::Unprocessable(err.to_string())
    }
}

pub fn build(task: Task, params: &PromptParams<'_>) -> Result<Prompt, PromptError> {
    let target_language = params.target_language.trim();
    if target_language.is_empty() {
        return Err(PromptError::InvalidArgument(
            "target_language must not be empty".to_string(),
        ));
    }

    let user = match task {
        Task::ImageTranslation => format!(
            "Analyze this image and translate any text to {target}. \
             Source language: {source}. \
             Context: {context}. \
             Provide: 1) Original detected text 2) Translation 3) Cultural context \
             4) What this means for daily life 5) Any important tips or warnings",
            target = target_language,
            source = or_token(params.source_language, AUTO_DETECT),
            context = or_token(params.context, GENERAL),
        ),
        Task::TextTranslation => {
            let text = params
                .text
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| PromptError::InvalidArgument("Text cannot be empty".to_string()))?;
            format!(
                "Translate this text to {target}: '{text}'\n\
                 Source language: {source}\n\
                 Context: {context}\n\
                 Provide: 1) Translation 2) Cultural context 3) Usage tips",
                target = target_language,
                text = text,
                source = or_token(params.source_language, AUTO_DETECT),
                context = or_token(params.context, GENERAL),
            )
        }
        Task::FormAnalysis => format!(
            "Analyze this form and explain it in {target}:\n\
             Document type: {document_type}\n\
             Country context: {country}\n\
             Provide detailed field-by-field explanations, required documents, and completion tips.",
            target = target_language,
            document_type = or_token(params.document_type, UNKNOWN),
            country = or_token(params.country, GENERAL),
        ),
    };

    Ok(Prompt {
        system: task.system_prompt().to_string(),
        user,
    })
}

/// Blank values count as absent.
fn or_token<'a>(value: Option<&'a str>, token: &'a str) -> &'a str {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(token)
}
