use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::interface::{CompletionRequest, GatewayError, ImageAttachment, ModelGateway};
use crate::config::Settings;

/// Sampling temperature for every call; low to keep answers literal.
pub const TEMPERATURE: f32 = 0.3;

/// Label used when the upload is not an image (e.g. a PDF form).
const FALLBACK_IMAGE_MIME: &str = "image/jpeg";

/// Gateway to an OpenAI-compatible chat completion API (OpenRouter by default).
pub struct OpenAiCompatibleGateway {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiCompatibleGateway {
    pub fn new(base_url: String, api_key: String) -> Self {
        info!("Initialized OpenAiCompatibleGateway: base_url={}", base_url);
        Self {
            client: Client::new(),
            base_url,
            api_key,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.openrouter_base_url.clone(),
            settings.openrouter_api_key.clone(),
        )
    }

    fn completions_url(&self) -> String {
        if self.base_url.ends_with('/') {
            format!("{}chat/completions", self.base_url)
        } else {
            format!("{}/chat/completions", self.base_url)
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum ChatMessage<'a> {
    System { content: &'a str },
    User { content: Vec<ContentPart<'a>> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ProviderError>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    message: String,
}

/// Encode an attachment as an inline `data:` URI.
///
/// Image uploads keep their declared media type; anything else is labelled
/// as JPEG, which is what the provider expects in an `image_url` part.
pub fn image_data_uri(image: &ImageAttachment<'_>) -> String {
    let mime = if image.mime_type.starts_with("image/") {
        image.mime_type
    } else {
        FALLBACK_IMAGE_MIME
    };
    format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(image.data)
    )
}

fn build_body<'a>(request: &CompletionRequest<'a>) -> ChatCompletionRequest<'a> {
    let mut content = vec![ContentPart::Text { text: request.user }];
    if let Some(image) = &request.image {
        content.push(ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: image_data_uri(image),
            },
        });
    }

    ChatCompletionRequest {
        model: request.model,
        messages: vec![
            ChatMessage::System {
                content: request.system,
            },
            ChatMessage::User { content },
        ],
        max_tokens: request.max_tokens,
        temperature: TEMPERATURE,
    }
}

#[async_trait]
impl ModelGateway for OpenAiCompatibleGateway {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GatewayError> {
        debug!(
            "Sending chat completion: model={}, image_attached={}",
            request.model,
            request.image.is_some()
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&build_body(&request))
            .send()
            .await?;

        let status = response.status();
        debug!("Chat completion responded with {}", status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(GatewayError::Provider(error.message));
        }

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| GatewayError::InvalidResponse("no completion content".to_string()))
    }
}
