//! HTTP error responses
//!
//! Maps the canonical `ExError` onto a status code and an `{"error": ...}`
//! body. The body carries only the human message; codes and context go to
//! the log.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jsoncmp_core::errors::{CompareError, ExError};
use serde::{Deserialize, Serialize};

/// Wire shape of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An `ExError` on its way out of a handler
#[derive(Debug)]
pub struct ApiError(pub ExError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.kind().is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<ExError> for ApiError {
    fn from(err: ExError) -> Self {
        Self(err)
    }
}

impl From<CompareError> for ApiError {
    fn from(err: CompareError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(err_code = self.0.code(), "request rejected");
        }

        let body = ErrorBody {
            error: self.0.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsoncmp_core::errors::ExErrorKind;

    #[test]
    fn test_client_kinds_map_to_bad_request() {
        let err = ApiError::from(CompareError::NotReady);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_server_kinds_map_to_internal_error() {
        for kind in [ExErrorKind::Io, ExErrorKind::Persistence, ExErrorKind::Concurrency] {
            let err = ApiError::from(ExError::new(kind).with_message("boom"));
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
