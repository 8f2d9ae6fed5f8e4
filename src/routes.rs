use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::Settings;
use crate::handlers::{self, forms, health, translation};
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

/// Headroom above the upload ceiling for multipart framing and text fields,
/// so oversize files reach the upload validator instead of the body limit.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let api = Router::new()
        // Translation
        .route("/translate/image", post(translation::translate_image))
        .route("/translate/text", post(translation::translate_text))
        .route("/translate/languages", get(translation::get_supported_languages))
        // Forms
        .route("/forms/analyze", post(forms::analyze_form))
        .route("/forms/explain", post(forms::explain_form_field))
        .route("/forms/templates", get(forms::get_form_templates))
        .route("/forms/categories", get(forms::get_form_categories))
        // Probes
        .route("/health/status", get(health::health_status))
        .route("/health/readiness", get(health::readiness_check))
        .route("/health/liveness", get(health::liveness_check));

    Router::new()
        .nest(API_PREFIX, api)
        .route("/health", get(health::root_health))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(
            state
                .settings
                .max_file_size
                .saturating_add(MULTIPART_OVERHEAD),
        ))
}

/// Wildcard hosts get a permissive policy; otherwise only the listed origins,
/// with credentials allowed.
pub fn cors_layer(settings: &Settings) -> CorsLayer {
    if settings.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = settings
        .allowed_hosts
        .iter()
        .filter_map(|host| match host.trim().parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping invalid allowed host: {}", host);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// The full application: routes, CORS and request tracing bound to `state`.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.settings);

    Router::new()
        .merge(create_routes(&state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::ModelGateway;
    use crate::service::test_support::StubGateway;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "refugee-assist-test-boundary";

    fn configured_settings() -> Settings {
        Settings {
            openrouter_api_key: "sk-or-test".to_string(),
            ..Settings::default()
        }
    }

    fn app_with(settings: Settings, stub: &Arc<StubGateway>) -> Router {
        let gateway: Arc<dyn ModelGateway> = stub.clone();
        build_app(AppState::with_gateway(settings, gateway))
    }

    fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((name, mime, data)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"upload\"\r\nContent-Type: {mime}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn image_translation_returns_mapped_reply() {
        let stub = StubGateway::replying("Original text\nSalida\nTranslation\nExit");
        let app = app_with(configured_settings(), &stub);

        let body = multipart_body(
            &[("target_language", "en"), ("context", "airport")],
            Some(("image", "image/png", b"\x89PNG fake")),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/translate/image", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["original_text"], "Salida");
        assert_eq!(json["target_language"], "en");
        assert_eq!(json["source_language"], "auto-detected");

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].user.contains("Context: airport"));
        assert_eq!(
            calls[0].image,
            Some((b"\x89PNG fake".to_vec(), "image/png".to_string()))
        );
    }

    #[tokio::test]
    async fn disallowed_mime_is_rejected_before_the_model() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let body = multipart_body(
            &[("target_language", "en")],
            Some(("image", "image/gif", b"GIF89a")),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/translate/image", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["detail"]
            .as_str()
            .unwrap()
            .starts_with("Invalid file type"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn oversize_upload_is_rejected_before_the_model() {
        let stub = StubGateway::replying("unused");
        let settings = Settings {
            max_file_size: 8,
            ..configured_settings()
        };
        let app = app_with(settings, &stub);

        let body = multipart_body(
            &[("target_language", "en")],
            Some(("image", "image/jpeg", b"123456789")),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/translate/image", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let json = body_json(response).await;
        assert!(json["detail"].as_str().unwrap().starts_with("File too large"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_target_language_is_unprocessable() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let body = multipart_body(&[], Some(("image", "image/jpeg", b"jpeg")));
        let response = app
            .oneshot(multipart_request("/api/v1/translate/image", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_image_part_is_unprocessable() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let body = multipart_body(&[("target_language", "en")], None);
        let response = app
            .oneshot(multipart_request("/api/v1/translate/image", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_translation_error() {
        let stub = StubGateway::failing("upstream exploded");
        let app = app_with(configured_settings(), &stub);

        let body = multipart_body(
            &[("target_language", "en")],
            Some(("image", "image/jpeg", b"jpeg")),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/translate/image", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body_json(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.contains("Translation"));
        assert!(detail.contains("upstream exploded"));
    }

    #[tokio::test]
    async fn text_translation_end_to_end() {
        let stub = StubGateway::replying("Hola, saludo común");
        let app = app_with(configured_settings(), &stub);

        let response = app
            .oneshot(json_request(
                "/api/v1/translate/text",
                json!({ "text": "Hello", "target_language": "Spanish" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["original_text"], "Hello");
        assert_eq!(json["translated_text"], "Hola, saludo común");
        assert_eq!(json["context_explanation"], "Hola, saludo común");
        assert_eq!(json["source_language"], "auto-detected");
        assert_eq!(json["target_language"], "Spanish");

        let calls = stub.calls.lock().unwrap();
        assert!(calls[0].image.is_none());
        assert!(calls[0].user.contains("'Hello'"));
    }

    #[tokio::test]
    async fn empty_text_is_rejected_without_model_call() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let response = app
            .oneshot(json_request(
                "/api/v1/translate/text",
                json!({ "text": "   ", "target_language": "es" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "Text cannot be empty");
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn text_without_target_language_is_unprocessable() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let response = app
            .oneshot(json_request("/api/v1/translate/text", json!({ "text": "Hello" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn form_analysis_accepts_pdf() {
        let stub = StubGateway::replying("This is a housing form.");
        let app = app_with(configured_settings(), &stub);

        let body = multipart_body(
            &[("target_language", "ar"), ("country", "DE")],
            Some(("document", "application/pdf", b"%PDF-1.4")),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/forms/analyze", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let calls = stub.calls.lock().unwrap();
        assert!(calls[0].user.contains("Country context: DE"));
    }

    #[tokio::test]
    async fn form_analysis_failure_names_the_task() {
        let stub = StubGateway::failing("timeout");
        let app = app_with(configured_settings(), &stub);

        let body = multipart_body(
            &[("target_language", "en")],
            Some(("document", "image/png", b"png")),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/forms/analyze", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["detail"].as_str().unwrap().contains("Form analysis"));
    }

    #[tokio::test]
    async fn explain_requires_field_name() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let response = app
            .oneshot(json_request(
                "/api/v1/forms/explain",
                json!({
                    "field_name": " ",
                    "field_context": "Section A",
                    "form_type": "asylum",
                    "target_language": "en"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "Field name cannot be empty");
    }

    #[tokio::test]
    async fn templates_filter_by_country_and_category() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let response = app
            .oneshot(get_request("/api/v1/forms/templates?country=us&category=immigration"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let templates = json["templates"].as_array().unwrap();
        assert!(!templates.is_empty());
        for template in templates {
            assert_eq!(template["country"], "US");
            assert_eq!(template["category"], "immigration");
        }
        assert!(json["countries"].as_array().unwrap().contains(&json!("US")));
    }

    #[tokio::test]
    async fn lookups_are_stable_across_calls() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        for uri in [
            "/api/v1/translate/languages",
            "/api/v1/forms/categories",
            "/api/v1/forms/templates",
        ] {
            let first = body_json(app.clone().oneshot(get_request(uri)).await.unwrap()).await;
            let second = body_json(app.clone().oneshot(get_request(uri)).await.unwrap()).await;
            assert_eq!(first, second, "{uri}");
        }
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn readiness_reflects_api_key() {
        let stub = StubGateway::replying("unused");

        let response = app_with(Settings::default(), &stub)
            .oneshot(get_request("/api/v1/health/readiness"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = body_json(response).await;
        assert_eq!(json["detail"]["ready"], false);
        assert_eq!(json["detail"]["checks"][0]["status"], "not_ready");

        let response = app_with(configured_settings(), &stub)
            .oneshot(get_request("/api/v1/health/readiness"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["ready"], true);
    }

    #[tokio::test]
    async fn status_never_exposes_the_api_key() {
        let stub = StubGateway::replying("unused");
        let response = app_with(configured_settings(), &stub)
            .oneshot(get_request("/api/v1/health/status"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["environment_checks"]["openrouter_api_configured"], true);
        assert!(!json.to_string().contains("sk-or-test"));
    }

    #[tokio::test]
    async fn liveness_and_root_health() {
        let stub = StubGateway::replying("unused");
        let app = app_with(Settings::default(), &stub);

        let live = body_json(app.clone().oneshot(get_request("/api/v1/health/liveness")).await.unwrap()).await;
        assert_eq!(live["alive"], true);
        assert_eq!(live["service"], "refugee-assistance-api");

        let root = body_json(app.oneshot(get_request("/health")).await.unwrap()).await;
        assert_eq!(root["status"], "healthy");
    }

    #[tokio::test]
    async fn non_multipart_upload_is_unprocessable_json() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let response = app
            .oneshot(json_request(
                "/api/v1/translate/image",
                json!({ "target_language": "en" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = body_json(response).await;
        assert!(json["detail"].is_string());
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn form_analysis_rejects_disallowed_type() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let body = multipart_body(
            &[("target_language", "en")],
            Some(("document", "text/plain", b"plain notes")),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/forms/analyze", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["detail"],
            "Invalid file type. Allowed types: images and PDF"
        );
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn form_analysis_rejects_oversize_document() {
        let stub = StubGateway::replying("unused");
        let settings = Settings {
            max_file_size: 8,
            ..configured_settings()
        };
        let app = app_with(settings, &stub);

        let body = multipart_body(
            &[("target_language", "en")],
            Some(("document", "application/pdf", b"%PDF-1.4 too long")),
        );
        let response = app
            .oneshot(multipart_request("/api/v1/forms/analyze", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(body_json(response).await["detail"]
            .as_str()
            .unwrap()
            .starts_with("File too large"));
        assert_eq!(stub.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_path_returns_detail_body() {
        let stub = StubGateway::replying("unused");
        let app = app_with(configured_settings(), &stub);

        let response = app
            .oneshot(get_request("/api/v1/does-not-exist"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "detail": "Not Found" }));
    }

    #[tokio::test]
    async fn huge_upload_ceiling_does_not_overflow_body_limit() {
        let stub = StubGateway::replying("unused");
        let settings = Settings {
            max_file_size: usize::MAX,
            ..configured_settings()
        };
        let response = app_with(settings, &stub)
            .oneshot(get_request("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn explicit_hosts_only_allow_listed_origins() {
        let stub = StubGateway::replying("unused");
        let settings = Settings {
            allowed_hosts: vec!["https://aid.example.org".to_string()],
            ..configured_settings()
        };
        let app = app_with(settings, &stub);

        let with_origin = |origin: &str| {
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, origin)
                .body(Body::empty())
                .unwrap()
        };

        let listed = app
            .clone()
            .oneshot(with_origin("https://aid.example.org"))
            .await
            .unwrap();
        assert_eq!(
            listed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://aid.example.org"))
        );
        assert_eq!(
            listed.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
            Some(&HeaderValue::from_static("true"))
        );

        let unlisted = app
            .oneshot(with_origin("https://elsewhere.example.com"))
            .await
            .unwrap();
        assert!(unlisted
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
