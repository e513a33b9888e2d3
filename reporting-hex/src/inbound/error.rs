//! Translation of faults into HTTP responses.
//!
//! A request either completes normally or faults. A NotFound fault becomes a
//! 404 carrying its message; every other fault becomes a 400 with a fixed
//! message, and the cause is only logged.

use std::any::Any;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use reporting_types::{AppError, ErrorBody};

/// Message returned for every fault other than NotFound.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(AppError::BadRequest(rejection.body_text()))
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    let body = ErrorBody {
        status_code: status.as_u16(),
        message,
    };
    (status, Json(body)).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::NotFound(message) => {
                tracing::debug!(%message, "entity not found");
                error_response(StatusCode::NOT_FOUND, message)
            }
            AppError::BadRequest(cause) => {
                tracing::warn!(%cause, "rejected request");
                error_response(StatusCode::BAD_REQUEST, GENERIC_ERROR_MESSAGE.into())
            }
            AppError::Internal(cause) => {
                tracing::error!(%cause, "request failed");
                error_response(StatusCode::BAD_REQUEST, GENERIC_ERROR_MESSAGE.into())
            }
        }
    }
}

/// Response for a handler that panicked.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let cause = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(%cause, "handler panicked");
    error_response(StatusCode::BAD_REQUEST, GENERIC_ERROR_MESSAGE.into())
}
