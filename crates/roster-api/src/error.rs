use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use roster_engine::EngineError;
use roster_types::api::{ErrorBody, ErrorResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Request failed shape validation before reaching the engine.
    #[error("{0}")]
    Invalid(String),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Invalid(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Engine(e) => match e {
                EngineError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
                EngineError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                EngineError::AuthorInactive(_) => (StatusCode::CONFLICT, "AUTHOR_INACTIVE"),
                EngineError::PrMerged(_) => (StatusCode::CONFLICT, "PR_MERGED"),
                EngineError::NotAssigned { .. } => (StatusCode::CONFLICT, "NOT_ASSIGNED"),
                EngineError::NoCandidate { .. } => (StatusCode::CONFLICT, "NO_CANDIDATE"),
                EngineError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Invalid(format!("invalid JSON: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Invalid(format!("invalid path parameter: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {:#}", self);
            "internal error".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}
