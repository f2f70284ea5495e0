//! Subscriptions Domain
//!
//! Storage, business rules and HTTP handlers for users' recurring paid
//! services, plus the monthly cost summary.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← query/body parsing, envelope responses
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← existence checks, summary window
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + Postgres and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← DTOs, validation, month strings
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_subscriptions::{
//!     handlers,
//!     repository::InMemorySubscriptionRepository,
//!     service::SubscriptionService,
//! };
//!
//! let service = SubscriptionService::new(InMemorySubscriptionRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod month;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{SubscriptionError, SubscriptionResult, ValidationError};
pub use handlers::ApiDoc;
pub use models::*;
pub use postgres::PgSubscriptionRepository;
pub use repository::{InMemorySubscriptionRepository, SubscriptionRepository};
pub use service::SubscriptionService;
