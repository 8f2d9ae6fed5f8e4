use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::config::Settings;
use crate::error::ApiError;
use crate::state::AppState;

pub const SERVICE_NAME: &str = "refugee-assistance-api";

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessCheck {
    pub service: String,
    /// "ready" or "not_ready"
    pub status: &'static str,
    pub message: String,
}

impl ReadinessCheck {
    fn new(service: &str, ready: bool, ready_message: &str, missing_message: &str) -> Self {
        Self {
            service: service.to_string(),
            status: if ready { "ready" } else { "not_ready" },
            message: if ready { ready_message } else { missing_message }.to_string(),
        }
    }

    fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

/// Per-dependency checklist for the readiness probe.
pub fn readiness_checks(settings: &Settings) -> Vec<ReadinessCheck> {
    vec![
        ReadinessCheck::new(
            "openrouter_api",
            settings.api_key_configured(),
            "API key configured",
            "API key not configured",
        ),
        ReadinessCheck::new(
            "config_secret_key",
            settings.secret_key_configured(),
            "SECRET_KEY is configured",
            "SECRET_KEY is not configured",
        ),
    ]
}

fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

pub async fn health_status(State(state): State<AppState>) -> Json<Value> {
    let settings = &state.settings;
    Json(json!({
        "status": "healthy",
        "timestamp": timestamp(),
        "version": env!("CARGO_PKG_VERSION"),
        "environment_checks": {
            "openrouter_api_configured": settings.api_key_configured(),
            "secret_key_configured": settings.secret_key_configured(),
        },
        "api_configuration": {
            "debug_mode": settings.debug,
            "host": settings.host,
            "port": settings.port,
            "vision_model": settings.vision_model,
            "text_model": settings.text_model,
        },
        "uptime": "Available",
    }))
}

/// 200 when every required secret is present, 503 with the checklist otherwise.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let checks = readiness_checks(&state.settings);
    let ready = checks.iter().all(ReadinessCheck::is_ready);

    let report = json!({
        "ready": ready,
        "timestamp": timestamp(),
        "checks": checks,
    });

    if ready {
        Ok(Json(report))
    } else {
        Err(ApiError::NotReady(report))
    }
}

pub async fn liveness_check() -> Json<Value> {
    Json(json!({
        "alive": true,
        "timestamp": timestamp(),
        "service": SERVICE_NAME,
    }))
}

pub async fn root_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Refugee Assistance API is running",
    }))
}
