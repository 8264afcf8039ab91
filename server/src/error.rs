use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store(StoreError::Validation(e)) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Store(e @ StoreError::Io(_)) => {
                tracing::error!("Store unavailable: {e}");
                (StatusCode::SERVICE_UNAVAILABLE, "Store unavailable".to_string())
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Store error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationError;

    #[test]
    fn validation_maps_to_400() {
        let err = AppError::Store(StoreError::Validation(ValidationError { field: "title" }));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_failure_maps_to_503() {
        let err = AppError::Store(StoreError::Io(std::io::Error::other("disk gone")));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn other_store_failures_map_to_500() {
        let err = AppError::Store(StoreError::InvalidAddress("x://".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
