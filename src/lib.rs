pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logger;
pub mod metrics;
pub mod models;
pub mod prompts;
pub mod relay;

use std::sync::Arc;
use std::time::Instant;

use axum::routing::{get, post, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use client::{CodeGenBackend, HttpBackend};
use config::RelayConfig;
use metrics::Metrics;

// shared by every handler; the backend and its http client are built once
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn CodeGenBackend>,
    pub metrics: Arc<Metrics>,
    pub service_url: String,
    pub started_at: Instant
}

impl AppState {

    pub fn new(backend: Arc<dyn CodeGenBackend>, service_url: impl Into<String>) -> Self {

        AppState {
            backend,
            metrics: Arc::new(Metrics::new()),
            service_url: service_url.into(),
            started_at: Instant::now()
        }

    }

    pub fn from_config(config: &RelayConfig) -> Result<Self, reqwest::Error> {

        let backend = HttpBackend::new(&config.service_url, config.timeout)?;
        Ok(AppState::new(Arc::new(backend), config.service_url.as_str()))

    }

}

pub fn build_app(state: AppState) -> Router {

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/health/live", get(handlers::liveness))
        .route("/health/ready", get(handlers::readiness))
        .route("/metrics", get(handlers::metrics))
        .route("/api/code-generation/generate", post(handlers::generate_code))
        .route("/api/code-generation/improve", post(handlers::improve_code))
        .route("/api/code-generation/explain", post(handlers::explain_code))
        .route("/api/code-generation/tests", post(handlers::generate_tests))
        .route("/api/code-generation/refactor", post(handlers::refactor_code))
        .route("/api/code-generation/template", post(handlers::generate_from_template))
        .route("/api/code-generation/languages", get(handlers::list_languages))
        .route("/api/code-generation/templates", get(handlers::list_templates))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)

}
