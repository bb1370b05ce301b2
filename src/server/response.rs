use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::model::ErrorResponse;
use crate::BookstoreError;

impl BookstoreError {
    /// the HTTP status a request failing with this error is answered with
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookstoreError::NotFound(_) => StatusCode::NOT_FOUND,
            BookstoreError::AlreadyExists(_) => StatusCode::CONFLICT,
            BookstoreError::InvalidCredentials | BookstoreError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            BookstoreError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BookstoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<PathRejection> for BookstoreError {
    fn from(rejection: PathRejection) -> Self {
        BookstoreError::Validation(rejection.body_text())
    }
}
