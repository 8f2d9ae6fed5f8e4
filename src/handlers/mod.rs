pub mod forms;
pub mod health;
pub mod translation;

use axum::extract::Multipart;
use std::collections::HashMap;

use crate::error::ApiError;
use crate::upload::UploadedFile;

/// Fallback for unrouted paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

const UNKNOWN_CONTENT_TYPE: &str = "application/octet-stream";

/// Text fields plus the one file part of a multipart upload.
#[derive(Debug, Default)]
pub(crate) struct UploadForm {
    fields: HashMap<String, String>,
    file: Option<UploadedFile>,
}

impl UploadForm {
    /// Drain `multipart`, keeping the part named `file_field` as the upload.
    pub(crate) async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, ApiError> {
        let mut form = UploadForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == file_field {
                let content_type = field
                    .content_type()
                    .unwrap_or(UNKNOWN_CONTENT_TYPE)
                    .to_string();
                let data = field.bytes().await?.to_vec();
                form.file = Some(UploadedFile { data, content_type });
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// A required text field; blank counts as missing.
    pub(crate) fn required(&self, name: &str) -> Result<String, ApiError> {
        self.optional(name)
            .ok_or_else(|| ApiError::Unprocessable(format!("Field required: {}", name)))
    }

    pub(crate) fn optional(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    pub(crate) fn take_file(&mut self, name: &str) -> Result<UploadedFile, ApiError> {
        self.file
            .take()
            .ok_or_else(|| ApiError::Unprocessable(format!("Field required: {}", name)))
    }
}
