//! HTTP error mapping

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::types::{ErrorResponse, error_codes};
use crate::transfer::TransferError;

/// Rejected request: status + code + message
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            message,
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            message,
        )
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            message,
        )
    }

    /// Error name string
    pub fn name(&self) -> &'static str {
        match self.code {
            error_codes::INVALID_PARAMETER => "INVALID_PARAMETER",
            error_codes::SERVICE_UNAVAILABLE => "SERVICE_UNAVAILABLE",
            _ => "INTERNAL_ERROR",
        }
    }
}

impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        match &err {
            TransferError::InvalidAmount(_) => Self::bad_request(err.to_string()),
            // Only session acquisition failures reach here; everything else
            // is carried inside the report.
            _ => Self::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.code,
            error: self.name().to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::StoreError;

    #[test]
    fn test_transfer_error_status() {
        let err = ApiError::from(TransferError::InvalidAmount(-1));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.name(), "INVALID_PARAMETER");

        let err = ApiError::from(TransferError::Store(StoreError::Unavailable(
            "pool timed out".into(),
        )));
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.starts_with("system error: "));
    }

    #[test]
    fn test_into_response_status() {
        let resp = ApiError::service_unavailable("down").into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
