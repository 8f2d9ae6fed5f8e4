use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection, Multipart, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::UploadForm;
use crate::catalog;
use crate::error::ApiError;
use crate::models::{FieldExplanation, FormAnalysisResponse, FormExplanationRequest};
use crate::service::FormAnalysisParams;
use crate::state::AppState;

/// `POST /forms/analyze`: explain an uploaded form (image or PDF).
pub async fn analyze_form(
    State(state): State<AppState>,
    payload: Result<Multipart, MultipartRejection>,
) -> Result<Json<FormAnalysisResponse>, ApiError> {
    let mut form = UploadForm::read(payload?, "document").await?;
    let params = FormAnalysisParams {
        target_language: form.required("target_language")?,
        document_type: form.optional("document_type"),
        country: form.optional("country"),
    };
    let document = form.take_file("document")?;

    state
        .document_policy
        .validate(&document.data, &document.content_type)?;

    let response = state.service.analyze_form(&document, &params).await?;
    Ok(Json(response))
}

pub async fn explain_form_field(
    payload: Result<Json<FormExplanationRequest>, JsonRejection>,
) -> Result<Json<FieldExplanation>, ApiError> {
    let Json(request) = payload?;
    if request.field_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Field name cannot be empty".to_string()));
    }

    Ok(Json(catalog::explain_field(&request)))
}

#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    pub country: Option<String>,
    pub category: Option<String>,
}

pub async fn get_form_templates(Query(query): Query<TemplateQuery>) -> Json<Value> {
    let country = query.country.as_deref().filter(|c| !c.trim().is_empty());
    let category = query.category.as_deref().filter(|c| !c.trim().is_empty());

    Json(json!({
        "templates": catalog::templates(country, category),
        "categories": catalog::TEMPLATE_CATEGORIES,
        "countries": catalog::TEMPLATE_COUNTRIES,
    }))
}

pub async fn get_form_categories() -> Json<Value> {
    Json(json!({ "categories": catalog::categories() }))
}
