//! # Axum Helpers
//!
//! Shared HTTP plumbing for the subscription API.
//!
//! ## Modules
//!
//! - **[`envelope`]**: the `{status, msg, data}` response body
//! - **[`errors`]**: `AppError`, rendered as an envelope
//! - **[`extractors`]**: JSON body and query extractors with envelope rejections
//! - **[`middleware`]**: global token-bucket rate limiting
//! - **[`server`]**: router assembly, request logging, bounded graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::{rate_limit::RateLimitConfig, server::ServerConfig};
//!
//! let router = create_router::<ApiDoc>(api_routes, &RateLimitConfig::default());
//! create_production_app(router, &ServerConfig::default(), async {}).await?;
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod server;

pub use envelope::{ApiResponse, MessageResponse};
pub use errors::AppError;
pub use extractors::{JsonBody, QueryParams};
pub use server::{create_production_app, create_router, serve_until, shutdown_signal};
