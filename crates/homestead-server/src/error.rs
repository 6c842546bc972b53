//! Maps store failures onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use homestead::error::HomesteadError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The store rejected or failed the operation.
    #[error(transparent)]
    Store(#[from] HomesteadError),

    /// The request body was not the JSON the route expects.
    #[error(transparent)]
    Body(#[from] JsonRejection),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body, shaped like `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(HomesteadError::CustomerNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(HomesteadError::DuplicateEmail(_)) => StatusCode::CONFLICT,
            Self::Store(HomesteadError::DuplicateId(_)) => StatusCode::GONE,
            Self::Store(HomesteadError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Body(rejection) => rejection.status(),
            Self::Store(
                HomesteadError::StorageFormat(_)
                | HomesteadError::StorageRead(_)
                | HomesteadError::StorageWrite(_),
            )
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> String {
        match self {
            Self::Store(HomesteadError::CustomerNotFound(_)) => "Customer not found".to_string(),
            Self::Store(HomesteadError::DuplicateEmail(_)) => {
                "Email address already taken".to_string()
            }
            Self::Store(HomesteadError::DuplicateId(_)) => "Customer ID is not unique".to_string(),
            Self::Store(HomesteadError::Validation(e)) => format!("{}: {}", e.field(), e),
            Self::Body(rejection) => rejection.body_text(),
            // Don't expose storage details to clients
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(ErrorBody { detail: self.detail() })).into_response()
    }
}
