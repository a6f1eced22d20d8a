// ABOUTME: JSON response helpers with a uniform error envelope.
// ABOUTME: Provides write_json, write_error, and the ApiError type that converts into the same shape.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Write `value` as a JSON body with the given status.
pub fn write_json<T: Serialize>(status: StatusCode, value: T) -> Response {
    (status, Json(value)).into_response()
}

/// Write `{"error": message}` with the given status.
pub fn write_error(status: StatusCode, message: &str) -> Response {
    write_json(status, ErrorBody { error: message })
}

/// Errors returned by JSON API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Unauthorized => write_error(StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::NotFound(msg) => write_error(StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => write_error(StatusCode::BAD_REQUEST, msg),
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                write_error(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        }
    }
}
