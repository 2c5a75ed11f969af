use thiserror::Error;

use crate::services::match_service::MatchServiceError;

/// Crate-level error type. Handlers return `Result<T, AppError>`; the
/// session's dispatch boundary converts failures into log records and a
/// generic client notice instead of crashing.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Match service error: {0}")]
    MatchService(#[from] MatchServiceError),
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}
