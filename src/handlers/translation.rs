use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, State},
    Json,
};
use serde_json::{json, Value};

use super::UploadForm;
use crate::catalog;
use crate::error::ApiError;
use crate::models::{TextTranslationRequest, TranslationResponse};
use crate::service::ImageTranslationParams;
use crate::state::AppState;

/// `POST /translate/image`: translate the text found in an uploaded image.
pub async fn translate_image(
    State(state): State<AppState>,
    payload: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let mut form = UploadForm::read(payload?, "image").await?;
    let params = ImageTranslationParams {
        target_language: form.required("target_language")?,
        source_language: form.optional("source_language"),
        context: form.optional("context"),
    };
    let image = form.take_file("image")?;

    state.image_policy.validate(&image.data, &image.content_type)?;

    let response = state.service.translate_image(&image, &params).await?;
    Ok(Json(response))
}

/// `POST /translate/text`
pub async fn translate_text(
    State(state): State<AppState>,
    payload: Result<Json<TextTranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, ApiError> {
    let Json(request) = payload?;
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("Text cannot be empty".to_string()));
    }

    let response = state.service.translate_text(&request).await?;
    Ok(Json(response))
}

pub async fn get_supported_languages() -> Json<Value> {
    Json(json!({ "languages": catalog::languages() }))
}
