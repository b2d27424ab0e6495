//! API error type and its mapping onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by API handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The request was malformed; answered with 400 and the message.
    BadRequest(String),
    /// The request failed server-side; answered with 500 and the message.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Internal(message) => {
                tracing::error!("{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
        }
    }
}
