use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Prompt is required")]
    InvalidPrompt,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Template '{0}' not found")]
    TemplateNotFound(String),

    // upstream was reachable but answered with a non-success status
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("internal error: {0}")]
    Internal(String)
}

impl RelayError {

    pub fn status(&self) -> StatusCode {

        match self {
            RelayError::InvalidPrompt
            | RelayError::InvalidInput(_)
            | RelayError::TemplateNotFound(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { .. } | RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR
        }

    }

    pub fn code(&self) -> &'static str {

        match self {
            RelayError::InvalidPrompt => "INVALID_PROMPT",
            RelayError::InvalidInput(_) => "INVALID_INPUT",
            RelayError::TemplateNotFound(_) => "TEMPLATE_NOT_FOUND",
            RelayError::Upstream { .. } | RelayError::Internal(_) => "INTERNAL_ERROR"
        }

    }

    pub fn body(&self) -> ErrorBody {

        match self {
            RelayError::Upstream { status, message } => ErrorBody {
                error: message.clone(),
                code: self.code().to_string(),
                details: Some(format!("Service responded with {}", status))
            },
            RelayError::Internal(details) => ErrorBody {
                error: "Internal server error".to_string(),
                code: self.code().to_string(),
                details: Some(details.clone())
            },
            other => ErrorBody {
                error: other.to_string(),
                code: other.code().to_string(),
                details: None
            }
        }

    }

}

impl IntoResponse for RelayError {

    fn into_response(self) -> Response {

        (self.status(), Json(self.body())).into_response()

    }

}

/// Failures talking to the upstream code generation service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    #[error("upstream responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode upstream response: {0}")]
    Decode(String)
}

impl From<reqwest::Error> for UpstreamError {

    fn from(err: reqwest::Error) -> Self {

        // transport level: connect refused, dns, timeouts and connections
        // dropped mid-body all mean the service could not be reached.
        // json decoding is done separately and maps to Decode
        UpstreamError::Unavailable(err.to_string())

    }

}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?} ({reason})")]
    InvalidVar { name: &'static str, value: String, reason: String }
}
