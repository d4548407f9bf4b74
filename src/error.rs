//! Error types for the relay.
//!
//! Client-level failures are kept distinct so the pipelines can decide
//! between aborting with a fixed literal and substituting a fallback.
//! Only [`AppError`] knows about HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Startup-only configuration failures. Fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Could not find config file. Tried: {0:?}")]
    NotFound(Vec<String>),
}

/// A call to the vision service did not produce a 2xx body.
#[derive(Debug, Error)]
pub enum RemoteServiceError {
    #[error("vision request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("vision service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Translating a single caption failed.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Transport(reqwest::Error),

    #[error("translation service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode translation response: {0}")]
    Decode(reqwest::Error),

    #[error("translation response contained no translations")]
    Empty,
}

/// The caller's request was unusable before any remote call was made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("query parameter `lang` is required")]
    MissingLanguage,

    #[error("query parameter `lang` must be at least 2 characters, got {0:?}")]
    LanguageTooShort(String),
}

/// A pipeline run that could not produce a result.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Vision(#[from] RemoteServiceError),

    #[error("vision response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("vision response has no description.captions list")]
    MissingCaptions,

    #[error("caption {0} has no string `text` field")]
    MissingCaptionText(usize),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors surfaced to HTTP callers.
///
/// Pipeline failures answer HTTP 200 with a fixed plain-text body. Only
/// validation failures use an error status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("describe pipeline failed: {0}")]
    DescribeFailed(PipelineError),

    #[error("celebrity pipeline failed: {0}")]
    CelebrityNotFound(PipelineError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub const DESCRIBE_FAILURE_BODY: &str = "error";
pub const CELEBRITY_FAILURE_BODY: &str = "Celebrity Not Found";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::DescribeFailed(e) => {
                tracing::error!(error = %e, "describe_image failed");
                (StatusCode::OK, DESCRIBE_FAILURE_BODY).into_response()
            }
            AppError::CelebrityNotFound(e) => {
                tracing::error!(error = %e, "find_celebrity failed");
                (StatusCode::OK, CELEBRITY_FAILURE_BODY).into_response()
            }
            AppError::Validation(e) => {
                tracing::warn!(error = %e, "rejected request");
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
