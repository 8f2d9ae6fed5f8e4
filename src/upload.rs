use crate::config::Settings;
use crate::error::ApiError;

const PDF_MIME_TYPE: &str = "application/pdf";

/// A file part received in a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub data: Vec<u8>,
    /// MIME type as declared by the client; never sniffed.
    pub content_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejection {
    #[error("Invalid file type. Allowed types: {allowed}")]
    UnsupportedMediaType { allowed: String },

    #[error("File too large. Maximum size: {}MB", .max_bytes / (1024 * 1024))]
    PayloadTooLarge { max_bytes: usize },
}

impl From<UploadRejection> for ApiError {
    fn from(rejection: UploadRejection) -> Self {
        match rejection {
            UploadRejection::UnsupportedMediaType { .. } => {
                ApiError::UnsupportedMediaType(rejection.to_string())
            }
            UploadRejection::PayloadTooLarge { .. } => {
                ApiError::PayloadTooLarge(rejection.to_string())
            }
        }
    }
}

/// MIME allow-list plus byte ceiling applied to an upload.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed_types: Vec<String>,
    max_bytes: usize,
    /// Wording used in the rejection message.
    allowed_label: String,
}

impl UploadPolicy {
    /// Policy for endpoints that accept images only.
    pub fn for_images(settings: &Settings) -> Self {
        Self {
            allowed_types: settings.allowed_image_types.clone(),
            max_bytes: settings.max_file_size,
            allowed_label: settings.allowed_image_types.join(", "),
        }
    }

    /// Policy for form documents: the configured images plus PDF.
    pub fn for_documents(settings: &Settings) -> Self {
        let mut allowed_types = settings.allowed_image_types.clone();
        allowed_types.push(PDF_MIME_TYPE.to_string());
        Self {
            allowed_types,
            max_bytes: settings.max_file_size,
            allowed_label: "images and PDF".to_string(),
        }
    }

    pub fn validate(&self, payload: &[u8], declared_mime: &str) -> Result<(), UploadRejection> {
        if !self.allowed_types.iter().any(|t| t == declared_mime) {
            return Err(UploadRejection::UnsupportedMediaType {
                allowed: self.allowed_label.clone(),
            });
        }

        if payload.len() > self.max_bytes {
            return Err(UploadRejection::PayloadTooLarge {
                max_bytes: self.max_bytes,
            });
        }

        Ok(())
    }
}
