use axum::response::{IntoResponse, Response};

use super::{messages, AppError};

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    AppError::NotFound(messages::NOT_FOUND.to_string()).into_response()
}
