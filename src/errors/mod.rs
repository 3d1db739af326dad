/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Failure of the network layer to deliver a document
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: u16 },
}

/// Failure to turn document bytes into a typed record
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("malformed document: {0}")]
    Structural(String),
    #[error("field `{path}`: {message}")]
    Field { path: String, message: String },
}

impl From<roxmltree::Error> for DecodeError {
    fn from(err: roxmltree::Error) -> Self {
        DecodeError::Structural(err.to_string())
    }
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(err: std::str::Utf8Error) -> Self {
        DecodeError::Structural(format!("invalid UTF-8: {}", err))
    }
}

/// Which document a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configuration,
    State,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Configuration => write!(f, "configuration fetch"),
            Phase::State => write!(f, "state fetch"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DsnError {
    #[error("{phase}: {source}")]
    Transport {
        phase: Phase,
        #[source]
        source: TransportError,
    },
    #[error("{phase}: malformed document: {message}")]
    Structural { phase: Phase, message: String },
    #[error("{phase}: field `{path}`: {message}")]
    Field {
        phase: Phase,
        path: String,
        message: String,
    },
}

impl DsnError {
    pub fn transport(phase: Phase, source: TransportError) -> Self {
        DsnError::Transport { phase, source }
    }

    pub fn decode(phase: Phase, err: DecodeError) -> Self {
        match err {
            DecodeError::Structural(message) => DsnError::Structural { phase, message },
            DecodeError::Field { path, message } => DsnError::Field {
                phase,
                path,
                message,
            },
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            DsnError::Transport { phase, .. }
            | DsnError::Structural { phase, .. }
            | DsnError::Field { phase, .. } => *phase,
        }
    }
}

pub type DsnResult<T> = Result<T, DsnError>;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub phase: String,
}

/// Error surfaced by the HTTP handlers
#[derive(Debug)]
pub struct ApiError(pub DsnError);

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ApiError {}

impl From<DsnError> for ApiError {
    fn from(err: DsnError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn code(&self) -> String {
        match &self.0 {
            DsnError::Transport {
                source: TransportError::Status { status, .. },
                ..
            } => match status {
                403 => "UPSTREAM_403".to_string(),
                404 => "UPSTREAM_404".to_string(),
                429 => "UPSTREAM_429".to_string(),
                500..=599 => "UPSTREAM_5XX".to_string(),
                _ => "UPSTREAM_ERROR".to_string(),
            },
            DsnError::Transport { .. } => "UPSTREAM_ERROR".to_string(),
            DsnError::Structural { .. } => "MALFORMED_DOCUMENT".to_string(),
            DsnError::Field { .. } => "INVALID_FIELD".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: self.code(),
                message: self.0.to_string(),
                phase: self.0.phase().to_string(),
            },
        };

        (StatusCode::BAD_GATEWAY, Json(error_response)).into_response()
    }
}
