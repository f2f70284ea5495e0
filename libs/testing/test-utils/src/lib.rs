//! Test helpers for the subscriptions crates.
//!
//! - `TestDatabase` starts PostgreSQL in a container and runs the migrator
//!   (feature `postgres`, on by default).
//! - `TestDataBuilder` derives stable user ids from a test's name, so rows
//!   written by one test never collide with another's.
//! - `assertions` holds small panicking helpers with context messages.
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestDatabase};
//!
//! #[tokio::test]
//! async fn lists_own_subscriptions() {
//!     let db = TestDatabase::new().await;
//!     let user_id = TestDataBuilder::from_test_name("lists_own_subscriptions").user_id();
//! }
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Seeded source of subscription owners.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Seeds the builder from a test name.
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self { seed: hasher.finish() }
    }

    /// The owner id for this test. The same name always yields the same id.
    pub fn user_id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }
}

pub mod assertions {
    /// Unwraps `value`, panicking with `context` when it is `None`.
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{context}: expected Some, got None"))
    }
}
