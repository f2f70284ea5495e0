//! PostgreSQL bootstrap helpers
//!
//! Connection pool construction from configuration, migration running and a
//! health check, all on top of SeaORM.
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config(PostgresConfig::new("postgresql://localhost/subs")).await?;
//! postgres::run_migrations::<Migrator>(&db, "subscriptions_api").await?;
//! ```
//!
//! # Features
//!
//! - `config` - `core_config::FromEnv` implementations for the config types

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
