use async_trait::async_trait;

/// Image or document bytes sent alongside the text instruction.
#[derive(Debug, Clone, Copy)]
pub struct ImageAttachment<'a> {
    pub data: &'a [u8],
    /// MIME type declared by the uploader
    pub mime_type: &'a str,
}

/// A single chat completion: one system message, one user message.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub user: &'a str,
    pub image: Option<ImageAttachment<'a>>,
    pub max_tokens: u32,
}

/// Any failure of the outbound model call. Callers treat every variant the
/// same way: the request fails and is not retried.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Interface to a hosted multimodal model.
/// Implementations make exactly one round trip per call and return the full completion text.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GatewayError>;
}
