use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

/// Errors surfaced by tournament operations.
#[derive(Debug, thiserror::Error)]
pub enum TournamentError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Underlying storage fault.
    #[error("Storage failure: {0}")]
    Storage(#[from] sqlx::Error),
}

impl TournamentError {
    pub fn validation(message: impl Into<String>) -> Self {
        TournamentError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        TournamentError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        TournamentError::Conflict(message.into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, TournamentError::Storage(e) if is_transient(e))
    }
}

const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

/// Storage failures that may succeed on a second attempt. Postgres reports
/// serialization and deadlock aborts as 40001 / 40P01.
pub fn is_transient(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => true,
        sqlx::Error::Database(db_error) => matches!(
            db_error.code().as_deref(),
            Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED)
        ),
        _ => false,
    }
}

impl ResponseError for TournamentError {
    fn status_code(&self) -> StatusCode {
        match self {
            TournamentError::Validation(_) => StatusCode::BAD_REQUEST,
            TournamentError::NotFound(_) => StatusCode::NOT_FOUND,
            TournamentError::Conflict(_) => StatusCode::CONFLICT,
            TournamentError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            TournamentError::Storage(e) => {
                tracing::error!("Database error: {}", e);
                HttpResponse::build(self.status_code()).json(json!({
                    "success": false,
                    "message": "Storage temporarily unavailable",
                    "error": "storage_failure",
                    "retryable": self.is_retryable()
                }))
            }
            other => HttpResponse::build(self.status_code()).json(json!({
                "success": false,
                "message": other.to_string(),
                "error": other.to_string()
            })),
        }
    }
}
