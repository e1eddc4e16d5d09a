//! Error types for the spread API server.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use spread_core::{Code, SpreadError};

/// Errors that can occur in the spread API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body could not be decoded.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The service rejected or failed the operation.
    #[error(transparent)]
    Spread(#[from] SpreadError),
}

impl ApiError {
    /// Status class of the error.
    pub const fn code(&self) -> Code {
        match self {
            Self::InvalidBody(_) => Code::InvalidArgument,
            Self::Spread(e) => e.code(),
        }
    }
}

/// HTTP status for a service status code.
pub const fn http_status(code: Code) -> StatusCode {
    match code {
        Code::InvalidArgument => StatusCode::BAD_REQUEST,
        Code::Unimplemented => StatusCode::NOT_IMPLEMENTED,
        Code::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        Code::DeadlineExceeded => StatusCode::GATEWAY_TIMEOUT,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = http_status(code);

        let causes: Vec<serde_json::Value> = match &self {
            Self::Spread(e) => e
                .causes()
                .iter()
                .map(|cause| {
                    serde_json::json!({
                        "code": cause.code(),
                        "error": cause.to_string(),
                    })
                })
                .collect(),
            Self::InvalidBody(_) => Vec::new(),
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "code": code,
            "status": status.as_u16(),
            "causes": causes,
        });

        (status, axum::Json(body)).into_response()
    }
}
