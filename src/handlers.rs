use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::AppState;
use crate::catalog::{LANGUAGES, template_infos};
use crate::error::RelayError;
use crate::logger::log_generation;
use crate::metrics::Outcome;
use crate::models::{
    ErrorBody, ExplainRequest, GenerationRequest, GenerationResponse, ImproveRequest,
    RefactorRequest, TemplateRequest, TestsRequest
};
use crate::{prompts, relay};

type RelayResult = Result<Json<GenerationResponse>, RelayError>;

pub async fn generate_code(
    State(state): State<AppState>,
    payload: Result<Bytes, BytesRejection>
) -> RelayResult {

    run(&state, body(payload)).await

}

pub async fn improve_code(
    State(state): State<AppState>,
    payload: Result<Bytes, BytesRejection>
) -> RelayResult {

    run(&state, body(payload).and_then(prompts::improve)).await

}

pub async fn explain_code(
    State(state): State<AppState>,
    payload: Result<Bytes, BytesRejection>
) -> RelayResult {

    run(&state, body(payload).and_then(prompts::explain)).await

}

pub async fn generate_tests(
    State(state): State<AppState>,
    payload: Result<Bytes, BytesRejection>
) -> RelayResult {

    run(&state, body(payload).and_then(prompts::generate_tests)).await

}

pub async fn refactor_code(
    State(state): State<AppState>,
    payload: Result<Bytes, BytesRejection>
) -> RelayResult {

    run(&state, body(payload).and_then(prompts::refactor)).await

}

pub async fn generate_from_template(
    State(state): State<AppState>,
    payload: Result<Bytes, BytesRejection>
) -> RelayResult {

    run(&state, body(payload).and_then(prompts::from_template)).await

}

// shared tail of every generation endpoint: relay, count, log
async fn run(state: &AppState, request: Result<GenerationRequest, RelayError>) -> RelayResult {

    let started = Instant::now();

    let (language, prompt_len) = match &request {
        Ok(r) => (
            Some(relay::effective_language(r).to_string()),
            r.prompt.as_deref().map(str::len).unwrap_or(0)
        ),
        Err(_) => (None, 0)
    };

    let result = match request {
        Ok(request) => relay::generate(state.backend.as_ref(), request).await,
        Err(e) => Err(e)
    };

    let outcome = match &result {
        Ok(generation) if generation.is_fallback() => Outcome::Fallback,
        Ok(_) => Outcome::Generated,
        Err(RelayError::Upstream { .. }) => Outcome::UpstreamError,
        Err(RelayError::Internal(_)) => Outcome::InternalError,
        Err(_) => Outcome::Invalid
    };

    state.metrics.record(outcome);
    log_generation(outcome, language.as_deref(), prompt_len, started.elapsed());

    if let Err(e @ (RelayError::Upstream { .. } | RelayError::Internal(_))) = &result {
        tracing::error!(code = e.code(), "code generation error: {}", e);
    }

    result.map(|generation| Json(generation.into_inner()))

}

// bodies are parsed as json whatever the content-type header says
fn body<T: DeserializeOwned>(payload: Result<Bytes, BytesRejection>) -> Result<T, RelayError> {

    let bytes = payload.map_err(|rejection| RelayError::Internal(rejection.body_text()))?;
    serde_json::from_slice(&bytes).map_err(|e| RelayError::Internal(e.to_string()))

}

pub async fn list_languages() -> Json<Value> {

    Json(json!({ "languages": LANGUAGES }))

}

pub async fn list_templates() -> Json<Value> {

    Json(json!({ "templates": template_infos() }))

}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {

    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "upstream": state.service_url,
        "timestamp": Utc::now().to_rfc3339()
    }))

}

pub async fn liveness() -> Json<Value> {

    Json(json!({
        "alive": true,
        "timestamp": Utc::now().to_rfc3339()
    }))

}

pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Value>) {

    let upstream = state.backend.ready().await;
    let status = if upstream { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };

    (status, Json(json!({
        "ready": upstream,
        "checks": { "upstream": upstream, "server": true }
    })))

}

pub async fn metrics(State(state): State<AppState>) -> Json<Value> {

    let snapshot = state.metrics.snapshot();
    let fallback_rate = snapshot.fallback_rate();

    Json(json!({
        "requests": snapshot,
        "fallback_rate": fallback_rate
    }))

}

pub async fn not_found() -> Response {

    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "route not found".to_string(),
            code: "NOT_FOUND".to_string(),
            details: None
        })
    )
        .into_response()

}
