use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vitrine_fakestore::ApiError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`ApiError`] for upstream store failures and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure while talking to the upstream store API.
    #[error(transparent)]
    Store(#[from] ApiError),

    /// The requested resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- Upstream store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- HTTP-specific errors ---
            AppError::NotFound(entity) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} not found"),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify an upstream store error into an HTTP status, error code, and
/// message.
///
/// - An upstream 404 maps to 404.
/// - Everything else (5xx, transport failures, malformed bodies) maps to 502
///   with a sanitized message; the details only go to the logs.
fn classify_store_error(err: &ApiError) -> (StatusCode, &'static str, String) {
    if err.is_not_found() {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    tracing::error!(error = %err, "Store API error");
    (
        StatusCode::BAD_GATEWAY,
        "UPSTREAM_ERROR",
        "The product service is currently unavailable".to_string(),
    )
}
