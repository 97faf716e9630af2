use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shared::protocol::ErrorResponse;

use crate::application::error::PermissionError;

impl IntoResponse for PermissionError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            PermissionError::Validation { .. } => (StatusCode::BAD_REQUEST, "Validation Failed"),
            PermissionError::Duplicate { .. } => (StatusCode::BAD_REQUEST, "Bad Request"),
            PermissionError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not Found"),
            PermissionError::Storage(detail) => {
                tracing::error!("Unexpected storage failure: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };
        // Storage details stay server-side; the other kinds carry their
        // domain message to the client.
        let message = match &self {
            PermissionError::Storage(_) => "An unexpected error occurred".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(status.as_u16(), error, message))).into_response()
    }
}

/// A request body that does not deserialize gets the same 400 shape as a
/// field validation failure.
pub fn validation_failed(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(400, "Validation Failed", message)),
    )
        .into_response()
}
