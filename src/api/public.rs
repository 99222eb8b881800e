//! Public API types

use axum::response::{IntoResponse, Response};
use http::StatusCode;

// Errors

pub struct ApiError {
    status: StatusCode,
    error: anyhow::Error,
}

impl ApiError {
    /// The request itself was wrong, e.g. a window that ends before it
    /// begins.
    pub fn bad_request(err: impl Into<anyhow::Error>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: err.into(),
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        if self.status.is_server_error() {
            tracing::error!("{}", self.error);
        } else {
            tracing::warn!("{}", self.error);
        }

        let message = if self.status.is_server_error() {
            format!("Something went wrong: {}", self.error)
        } else {
            self.error.to_string()
        };

        (self.status, message).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: err.into(),
        }
    }
}

// Re-export public types from each route

pub mod busy {
    pub use crate::api::routes::busy::public::*;
}
