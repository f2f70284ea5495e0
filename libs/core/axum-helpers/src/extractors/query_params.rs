use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::errors::{messages, AppError};

/// Query-string extractor that rejects with the shared envelope.
///
/// Every value is decoded as a string, and the first occurrence of a repeated
/// key wins (`?id=a&id=b` yields `a`). Fields are usually `Option<String>` so
/// the handler decides how to report missing or malformed values.
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e.body_text(), "Invalid query string");
                AppError::BadRequest(messages::INVALID_QUERY.to_string())
            })?;

        let mut first_values = Map::new();
        for (key, value) in pairs {
            first_values.entry(key).or_insert(Value::String(value));
        }

        serde_json::from_value(Value::Object(first_values))
            .map(QueryParams)
            .map_err(|e| {
                tracing::warn!(error = %e, "Query parameters do not match the expected shape");
                AppError::BadRequest(messages::INVALID_QUERY.to_string())
            })
    }
}
