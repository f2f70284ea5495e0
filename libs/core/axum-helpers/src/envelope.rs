//! The `{status, msg, data}` body every endpoint answers with.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope carrying a payload.
///
/// `status` repeats the HTTP status code. `data` is omitted from the JSON
/// when there is nothing to return.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// HTTP status code of the response
    #[schema(example = 200)]
    pub status: u16,
    /// Human-readable outcome
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 200 OK with `data`
    pub fn ok(msg: impl Into<String>, data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            msg: msg.into(),
            data: Some(data),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Envelope without a payload, used for errors and bare acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = 400)]
    pub status: u16,
    #[schema(example = "Invalid request body")]
    pub msg: String,
}

impl MessageResponse {
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            msg: msg.into(),
        }
    }
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
