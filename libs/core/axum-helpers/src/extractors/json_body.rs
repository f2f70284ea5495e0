//! Lenient JSON body extractor.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::{messages, AppError};

/// JSON request body.
///
/// Unlike [`axum::Json`] this does not insist on a `Content-Type` header.
/// Any failure to read or decode the body becomes a 400 envelope with the
/// message `Invalid request body`; the decoder error is only logged.
///
/// # Example
/// ```ignore
/// use axum_helpers::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<CreateThing>) -> impl IntoResponse {
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read request body");
            AppError::BadRequest(messages::INVALID_BODY.to_string())
        })?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::warn!(error = %e, "Invalid request body");
            AppError::BadRequest(messages::INVALID_BODY.to_string())
        })
    }
}
