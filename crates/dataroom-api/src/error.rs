//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use dataroom_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Newtype around [`AppError`] giving it an HTTP representation.
///
/// Handlers return `Result<_, ApiError>`; the `?` operator converts
/// any `AppError` bubbling up from the service layer.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// HTTP status and machine-readable code for an error kind.
///
/// `StorageInconsistency` maps to 404 like a plain missing record, but
/// keeps a distinct code so clients can tell "no such file" apart from
/// "record exists, bytes are gone".
fn status_and_code(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Authorization => (StatusCode::FORBIDDEN, "ACCESS_DENIED"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::StorageInconsistency => (StatusCode::NOT_FOUND, "STORAGE_INCONSISTENCY"),
        ErrorKind::ExternalService => (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR"),
        ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization
        | ErrorKind::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = status_and_code(self.0.kind);

        if status.is_server_error() {
            tracing::error!(kind = %self.0.kind, error = %self.0.message, "Request failed");
        }

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message: self.0.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_and_code(ErrorKind::Validation).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_and_code(ErrorKind::Authentication).0,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_and_code(ErrorKind::Authorization).0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(status_and_code(ErrorKind::Conflict).0, StatusCode::CONFLICT);
        assert_eq!(
            status_and_code(ErrorKind::ExternalService).0,
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_missing_blob_is_distinct_404() {
        let (status, code) = status_and_code(ErrorKind::StorageInconsistency);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "STORAGE_INCONSISTENCY");

        let (_, plain) = status_and_code(ErrorKind::NotFound);
        assert_ne!(code, plain);
    }
}
