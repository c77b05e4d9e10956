use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::CodeGenBackend;
use crate::error::{RelayError, UpstreamError};
use crate::models::{GenerationRequest, GenerationResponse, UpstreamPayload, UpstreamReply};

pub const DEFAULT_LANGUAGE: &str = "typescript";
pub const DEFAULT_CONTEXT: &str = "playground";

const FALLBACK_SUGGESTIONS: [&str; 3] = [
    "Check that the code generation service is running",
    "Verify the CODEGEN_SERVICE_URL environment variable",
    "Try again in a few moments"
];

/// Result of a relayed generation. Both variants are served as 200.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    Upstream(GenerationResponse),
    Fallback(GenerationResponse)
}

impl Generation {

    pub fn is_fallback(&self) -> bool {

        matches!(self, Generation::Fallback(_))

    }

    pub fn response(&self) -> &GenerationResponse {

        match self {
            Generation::Upstream(r) | Generation::Fallback(r) => r
        }

    }

    pub fn into_inner(self) -> GenerationResponse {

        match self {
            Generation::Upstream(r) | Generation::Fallback(r) => r
        }

    }

}

/// Validates a request, forwards it once to the backend and reshapes the reply.
///
/// Network failures reaching the backend are absorbed into a fallback
/// response. Non-success statuses and undecodable bodies are returned as
/// errors.
pub async fn generate(
    backend: &dyn CodeGenBackend,
    request: GenerationRequest
) -> Result<Generation, RelayError> {

    let payload = upstream_payload(request)?;

    debug!(
        language = %payload.language,
        context = %payload.context,
        prompt_len = payload.prompt.len(),
        "forwarding generation request"
    );

    match backend.generate(&payload).await {
        Ok(reply) => Ok(Generation::Upstream(normalize(reply, &payload.language))),
        Err(UpstreamError::Unavailable(reason)) => {
            warn!(%reason, "code generation service unavailable, using fallback");
            Ok(Generation::Fallback(fallback_response(&payload)))
        },
        Err(UpstreamError::Status { status, message }) => Err(RelayError::Upstream { status, message }),
        Err(err @ UpstreamError::Decode(_)) => Err(RelayError::Internal(err.to_string()))
    }

}

/// Returns the prompt when it is present and not blank.
pub fn validate(request: &GenerationRequest) -> Result<&str, RelayError> {

    match request.prompt.as_deref() {
        Some(prompt) if !prompt.trim().is_empty() => Ok(prompt),
        _ => Err(RelayError::InvalidPrompt)
    }

}

pub fn upstream_payload(request: GenerationRequest) -> Result<UpstreamPayload, RelayError> {

    validate(&request)?;

    let language = effective_language(&request).to_string();
    let GenerationRequest { prompt, framework, context, .. } = request;

    Ok(UpstreamPayload {
        // forwarded as submitted, trimming only applies to validation
        prompt: prompt.unwrap_or_default(),
        language,
        framework: non_blank(framework),
        context: non_blank(context).unwrap_or_else(|| DEFAULT_CONTEXT.to_string())
    })

}

// the language the request will be relayed with
pub fn effective_language(request: &GenerationRequest) -> &str {

    request.language.as_deref()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)

}

pub fn normalize(reply: UpstreamReply, language: &str) -> GenerationResponse {

    GenerationResponse {
        id: non_blank(reply.id).unwrap_or_else(|| generate_id("req")),
        code: reply.code.unwrap_or_default(),
        language: language.to_string(),
        explanation: reply.explanation.unwrap_or_default(),
        // not populated by the relay yet
        suggestions: Vec::new(),
        timestamp: reply.timestamp.unwrap_or_else(now_millis)
    }

}

pub fn fallback_response(payload: &UpstreamPayload) -> GenerationResponse {

    let code = format!(
        "// Code generation service temporarily unavailable\n\
         // Requested: {}\n\
         // Language: {}\n\
         \n\
         // This is a placeholder response\n\
         // Generated code will appear here when the service is available",
        payload.prompt,
        payload.language
    );

    GenerationResponse {
        id: generate_id("fallback"),
        code,
        language: payload.language.clone(),
        explanation: "This is a fallback response. The code generation service is temporarily unavailable. Please try again later.".to_string(),
        suggestions: FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
        timestamp: now_millis()
    }

}

// <prefix>_<epoch ms>_<9 chars>
pub fn generate_id(prefix: &str) -> String {

    let random = Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, now_millis(), &random[..9])

}

pub fn now_millis() -> i64 {

    Utc::now().timestamp_millis()

}

fn non_blank(value: Option<String>) -> Option<String> {

    value.filter(|v| !v.trim().is_empty())

}
