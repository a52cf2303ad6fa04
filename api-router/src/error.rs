use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::error::AppError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Serialize, Clone)]
pub enum ApiError {
    #[error("Internal server error")]
    InternalError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::UnsupportedFormat(msg) => Self::UnsupportedFormat(msg),
            AppError::InvalidCredential(msg) => Self::Unauthorized(msg),
            AppError::NoUsableModel(msg) => Self::NotFound(msg),
            AppError::UpstreamTimeout(msg)
            | AppError::UpstreamQuotaExceeded(msg)
            | AppError::UpstreamUnavailable(msg) => Self::Upstream(msg),
            AppError::NotFound(msg) => Self::NotFound(msg),
            AppError::Validation(msg) => Self::ValidationError(msg),
            _ => {
                tracing::error!("Internal error: {:?}", err);
                Self::InternalError("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            Self::InternalError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: message,
                    status: "error".to_string(),
                },
            ),
            Self::ValidationError(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    status: "error".to_string(),
                },
            ),
            Self::UnsupportedFormat(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    status: "error".to_string(),
                },
            ),
            Self::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: message,
                    status: "error".to_string(),
                },
            ),
            Self::Unauthorized(message) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    error: message,
                    status: "error".to_string(),
                },
            ),
            Self::Upstream(message) => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    error: message,
                    status: "error".to_string(),
                },
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

#[derive(Serialize, Debug)]
struct ErrorResponse {
    error: String,
    status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Debug;

    fn assert_status_code<T: IntoResponse + Debug>(response: T, expected_status: StatusCode) {
        let response = response.into_response();
        assert_eq!(response.status(), expected_status);
    }

    #[test]
    fn test_app_error_to_api_error_conversion() {
        let unsupported = AppError::UnsupportedFormat("not a PDF".to_string());
        let api_error = ApiError::from(unsupported);
        assert!(matches!(api_error, ApiError::UnsupportedFormat(msg) if msg == "not a PDF"));

        let credential = AppError::InvalidCredential("rejected key".to_string());
        let api_error = ApiError::from(credential);
        assert!(matches!(api_error, ApiError::Unauthorized(msg) if msg == "rejected key"));

        let no_model = AppError::NoUsableModel("empty catalog".to_string());
        let api_error = ApiError::from(no_model);
        assert!(matches!(api_error, ApiError::NotFound(msg) if msg == "empty catalog"));

        let quota = AppError::UpstreamQuotaExceeded("429".to_string());
        let api_error = ApiError::from(quota);
        assert!(matches!(api_error, ApiError::Upstream(_)));

        // Internal errors are sanitized before leaving the process.
        let internal = AppError::Io(std::io::Error::other("io error"));
        let api_error = ApiError::from(internal);
        assert!(matches!(api_error, ApiError::InternalError(_)));
    }

    #[test]
    fn test_api_error_response_status_codes() {
        assert_status_code(
            ApiError::InternalError("server error".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
        );
        assert_status_code(
            ApiError::ValidationError("invalid input".to_string()),
            StatusCode::BAD_REQUEST,
        );
        assert_status_code(
            ApiError::UnsupportedFormat("not a PDF".to_string()),
            StatusCode::BAD_REQUEST,
        );
        assert_status_code(
            ApiError::NotFound("not found".to_string()),
            StatusCode::NOT_FOUND,
        );
        assert_status_code(
            ApiError::Unauthorized("not allowed".to_string()),
            StatusCode::UNAUTHORIZED,
        );
        assert_status_code(
            ApiError::Upstream("bad upstream".to_string()),
            StatusCode::BAD_GATEWAY,
        );
    }

    #[test]
    fn test_internal_error_sanitization() {
        let api_error = ApiError::InternalError("db password incorrect".to_string());
        assert_eq!(api_error.to_string(), "Internal server error");
        assert_status_code(api_error, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
