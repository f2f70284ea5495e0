//! Extractors whose rejections use the shared envelope instead of axum's
//! plain-text defaults.

pub mod json_body;
pub mod query_params;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
