//! Axum route handlers.
//!
//! # Routes
//!
//! - `GET  /health`       — Returns `{"status": "ok", "version": ..., "service": ...}`
//! - `GET  /`             — Username form
//! - `POST /`             — Form submission, renders the result page
//! - `POST /api/predict`  — JSON `{"username": ...}` → prediction

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::templates::Templates;
use crate::service::{PersonalityService, UserPrediction};

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Prediction pipeline shared by every request.
    pub service: Arc<PersonalityService>,
    /// Form front-end pages.
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(service: PersonalityService) -> tera::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            templates: Arc::new(Templates::new()?),
        })
    }
}

/// Username field of both the form and the JSON API.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub username: String,
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/", get(index_handler).post(form_predict_handler))
        .route("/api/predict", post(api_predict_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "personality-predictor",
    }))
}

/// GET / — username form.
async fn index_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    state
        .templates
        .render_index()
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// POST / — predict from the form and render the result page.
async fn form_predict_handler(
    State(state): State<AppState>,
    Form(request): Form<PredictRequest>,
) -> Result<Html<String>, (StatusCode, String)> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Missing username".to_string()));
    }

    let result = state.service.predict_for_user(username).await.map_err(|e| {
        log::error!("Prediction for '{}' failed: {}", username, e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    state
        .templates
        .render_result(&result.username, &result.mbti.to_string(), result.post_count)
        .map(Html)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// POST /api/predict — JSON prediction.
///
/// Request:  `{ "username": "alice" }`
/// Response: `{ "username": "alice", "mbti": "INTJ", "post_count": 50, "cached": false }`
///
/// `mbti` carries the no-data message when the user has no posts.
async fn api_predict_handler(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<UserPrediction>, ApiError> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'username'"));
    }

    state
        .service
        .predict_for_user(username)
        .await
        .map(Json)
        .map_err(|e| {
            log::error!("Prediction for '{}' failed: {}", username, e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cache::PostCache;
    use crate::classifier::testing::{uniform_set, ConstantClassifier, FailingClassifier};
    use crate::classifier::Classifier;
    use crate::personality::{PersonalityPredictor, NO_DATA_MESSAGE};
    use crate::posts::StaticPostSource;
    use crate::vocabulary::Vocabulary;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn state_with(classifier: Arc<dyn Classifier>) -> AppState {
        let vocab = Vocabulary::from_pairs([("happy", 1), ("sad", 2)]).unwrap();
        let predictor = PersonalityPredictor::new(Arc::new(vocab), uniform_set(classifier));
        let source = StaticPostSource::default()
            .with_user("alice", vec!["I am happy".to_string(), "I am happy".to_string()])
            .with_user("silent", Vec::new());
        let service = PersonalityService::new(
            Arc::new(predictor),
            Arc::new(source),
            PostCache::new(Duration::from_secs(60)),
        );
        AppState::new(service).unwrap()
    }

    fn state() -> AppState {
        state_with(Arc::new(ConstantClassifier::new(1.0)))
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = app_router(state());

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::VERSION);
        assert_eq!(json["service"], "personality-predictor");
    }

    #[tokio::test]
    async fn test_index_page() {
        let app = app_router(state());
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("name=\"username\""));
    }

    #[tokio::test]
    async fn test_form_predict_renders_code() {
        let app = app_router(state());
        let response = app.oneshot(form_request("username=alice")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("Result for @alice"));
        assert!(html.contains("ISTP"));
    }

    #[tokio::test]
    async fn test_form_predict_no_posts() {
        let app = app_router(state());
        let response = app.oneshot(form_request("username=silent")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(NO_DATA_MESSAGE));
    }

    #[tokio::test]
    async fn test_form_predict_blank_username() {
        let app = app_router(state());
        let response = app.oneshot(form_request("username=+++")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_predict() {
        let state = state();
        let app = app_router(state.clone());

        let response = app
            .clone()
            .oneshot(json_request("/api/predict", serde_json::json!({"username": "alice"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["mbti"], "ISTP");
        assert_eq!(json["post_count"], 2);
        assert_eq!(json["cached"], false);

        let response = app
            .oneshot(json_request("/api/predict", serde_json::json!({"username": "alice"})))
            .await
            .unwrap();
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["cached"], true);
        assert_eq!(state.service.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_api_predict_no_posts() {
        let app = app_router(state());
        let response = app
            .oneshot(json_request("/api/predict", serde_json::json!({"username": "silent"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["mbti"], NO_DATA_MESSAGE);
        assert_eq!(json["post_count"], 0);
    }

    #[tokio::test]
    async fn test_api_predict_missing_username() {
        let app = app_router(state());
        let response = app
            .oneshot(json_request("/api/predict", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["error"].as_str().unwrap().contains("username"));
    }

    #[tokio::test]
    async fn test_api_predict_classifier_failure_is_500() {
        let app = app_router(state_with(Arc::new(FailingClassifier)));
        let response = app
            .oneshot(json_request("/api/predict", serde_json::json!({"username": "alice"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("Classification failed"));
    }
}
