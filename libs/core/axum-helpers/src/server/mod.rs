//! Server infrastructure: router assembly and bounded graceful shutdown.

pub mod app;
pub mod shutdown;

pub use app::{create_production_app, create_router, serve_until};
pub use shutdown::shutdown_signal;
