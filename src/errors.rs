use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Boundary error for every handler; each variant maps onto one HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Registration with an email that is already taken.
    #[error("email already registered")]
    DuplicateEmail,

    /// Login failure. Unknown email and wrong password both end up here so
    /// the response cannot reveal which one it was.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired bearer token.
    #[error("{0}")]
    Unauthenticated(&'static str),

    /// No such row for this caller. Ownership mismatch reports the same way
    /// as true absence.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Unexpected data-store failure.
    #[error(transparent)]
    Store(#[from] sqlx::Error),

    /// Anything else unexpected.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::DuplicateEmail => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// A duplicate registration can slip past the pre-insert lookup; the
    /// unique index on users.email then reports it as a database error.
    pub fn from_insert_user(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db) if db.is_unique_violation() => ApiError::DuplicateEmail,
            _ => ApiError::Store(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => tracing::error!(error = %e, "unhandled store error"),
            ApiError::Internal(e) => tracing::error!(error = %e, "internal error"),
            ApiError::Unauthenticated(_) | ApiError::InvalidCredentials => {
                tracing::warn!(error = %self, "auth rejected")
            }
            _ => tracing::debug!(error = %self, "client error"),
        }

        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
