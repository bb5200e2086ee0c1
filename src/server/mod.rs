//! HTTP API.
//!
//! `POST /analyze` runs the pipeline; stored reports are served from the
//! results directory.

mod docs;
mod error;

pub use error::ApiError;

use crate::config::Settings;
use crate::error::SeoError;
use crate::pipeline::{AnalysisReport, AnalysisRequest, Pipeline};
use crate::results::ResultStore;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// Shared application state.
pub struct AppState {
    pub pipeline: Pipeline,
    pub settings: Settings,
}

impl AppState {
    /// Store used for listing reports, even when saving is disabled.
    fn results(&self) -> ResultStore {
        self.pipeline
            .store()
            .cloned()
            .unwrap_or_else(|| ResultStore::new(self.settings.results_dir()))
    }
}

/// (method, path, description) of every route, for listings.
pub const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("POST", "/analyze", "Analyze a video and/or keyword"),
    ("GET", "/results", "List stored reports"),
    ("GET", "/results/{name}", "Fetch a stored report"),
    ("GET", "/docs", "Interactive API docs"),
    ("GET", "/openapi.json", "OpenAPI document"),
    ("GET", "/health", "Liveness check"),
];

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/docs", get(swagger_ui))
        .route("/openapi.json", get(openapi))
        .route("/analyze", post(analyze))
        .route("/results", get(list_results))
        .route("/results/{name}", get(get_result))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> impl IntoResponse {
    let endpoints: serde_json::Map<String, serde_json::Value> = ENDPOINTS
        .iter()
        .map(|(method, path, description)| (format!("{method} {path}"), json!(description)))
        .collect();

    Json(json!({
        "message": "Welcome to tubeseo, the YouTube SEO assistant",
        "endpoints": endpoints,
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn swagger_ui() -> Html<&'static str> {
    Html(docs::SWAGGER_UI)
}

async fn openapi() -> impl IntoResponse {
    Json(docs::openapi())
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Json(request) = body?;
    debug!("Analyze request: {:?}", request);

    let outcome = state.pipeline.analyze(request).await?;
    Ok(Json(outcome.report))
}

async fn list_results(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let store = state.results();
    let results = tokio::task::spawn_blocking(move || store.list())
        .await
        .map_err(SeoError::from)??;
    Ok(Json(json!({
        "total": results.len(),
        "results": results,
    })))
}

async fn get_result(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let store = state.results();
    let report = tokio::task::spawn_blocking(move || store.load(&name))
        .await
        .map_err(SeoError::from)??;
    Ok(Json(report))
}
