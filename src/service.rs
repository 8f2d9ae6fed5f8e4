use std::sync::Arc;
use tracing::{error, info};

use crate::config::Settings;
use crate::error::ApiError;
use crate::gateway::{CompletionRequest, GatewayError, ImageAttachment, ModelGateway};
use crate::mapper;
use crate::models::{FormAnalysisResponse, TextTranslationRequest, TranslationResponse};
use crate::prompts::{self, PromptError, PromptParams, Task};
use crate::upload::UploadedFile;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    InvalidInput(#[from] PromptError),

    #[error("{} failed: {source}", .task.failure_label())]
    Upstream {
        task: Task,
        #[source]
        source: GatewayError,
    },
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(e) => e.into(),
            upstream @ ServiceError::Upstream { .. } => ApiError::Upstream(upstream.to_string()),
        }
    }
}

/// Optional parameters of an image translation.
#[derive(Debug, Default, Clone)]
pub struct ImageTranslationParams {
    pub target_language: String,
    pub source_language: Option<String>,
    pub context: Option<String>,
}

/// Optional parameters of a form analysis.
#[derive(Debug, Default, Clone)]
pub struct FormAnalysisParams {
    pub target_language: String,
    pub document_type: Option<String>,
    pub country: Option<String>,
}

/// Prompt -> model call -> mapped response, once per request.
pub struct AssistanceService {
    settings: Arc<Settings>,
    gateway: Arc<dyn ModelGateway>,
}

impl AssistanceService {
    pub fn new(settings: Arc<Settings>, gateway: Arc<dyn ModelGateway>) -> Self {
        Self { settings, gateway }
    }

    pub async fn translate_image(
        &self,
        image: &UploadedFile,
        params: &ImageTranslationParams,
    ) -> Result<TranslationResponse, ServiceError> {
        let task = Task::ImageTranslation;
        let prompt = prompts::build(
            task,
            &PromptParams {
                target_language: &params.target_language,
                source_language: params.source_language.as_deref(),
                context: params.context.as_deref(),
                ..PromptParams::default()
            },
        )?;

        info!(
            "Translating image ({} bytes, {}) to {}",
            image.data.len(),
            image.content_type,
            params.target_language
        );
        let raw = self
            .call(task, &self.settings.vision_model, &prompt, Some(image))
            .await?;
        Ok(mapper::to_image_translation(&raw, &params.target_language))
    }

    pub async fn translate_text(
        &self,
        request: &TextTranslationRequest,
    ) -> Result<TranslationResponse, ServiceError> {
        let task = Task::TextTranslation;
        let prompt = prompts::build(
            task,
            &PromptParams {
                target_language: &request.target_language,
                source_language: request.source_language.as_deref(),
                context: request.context.as_deref(),
                text: Some(request.text.as_str()),
                ..PromptParams::default()
            },
        )?;

        info!(
            "Translating {} chars of text to {}",
            request.text.chars().count(),
            request.target_language
        );
        let raw = self
            .call(task, &self.settings.text_model, &prompt, None)
            .await?;
        Ok(mapper::to_text_translation(
            &raw,
            &request.text,
            &request.target_language,
            request.source_language.as_deref(),
        ))
    }

    pub async fn analyze_form(
        &self,
        document: &UploadedFile,
        params: &FormAnalysisParams,
    ) -> Result<FormAnalysisResponse, ServiceError> {
        let task = Task::FormAnalysis;
        let prompt = prompts::build(
            task,
            &PromptParams {
                target_language: &params.target_language,
                document_type: params.document_type.as_deref(),
                country: params.country.as_deref(),
                ..PromptParams::default()
            },
        )?;

        info!(
            "Analyzing form ({} bytes, {}) in {}",
            document.data.len(),
            document.content_type,
            params.target_language
        );
        let raw = self
            .call(task, &self.settings.vision_model, &prompt, Some(document))
            .await?;
        Ok(mapper::to_form_analysis(&raw))
    }

    async fn call(
        &self,
        task: Task,
        model: &str,
        prompt: &prompts::Prompt,
        attachment: Option<&UploadedFile>,
    ) -> Result<String, ServiceError> {
        let request = CompletionRequest {
            model,
            system: &prompt.system,
            user: &prompt.user,
            image: attachment.map(|file| ImageAttachment {
                data: &file.data,
                mime_type: &file.content_type,
            }),
            max_tokens: self.settings.max_tokens,
        };

        match self.gateway.complete(request).await {
            Ok(text) => {
                info!("{:?} completed: {} chars from {}", task, text.len(), model);
                Ok(text)
            }
            Err(source) => {
                error!("{:?} model call failed: {}", task, source);
                Err(ServiceError::Upstream { task, source })
            }
        }
    }
}
