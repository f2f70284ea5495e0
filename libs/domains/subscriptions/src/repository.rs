use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::SubscriptionResult;
use crate::models::{Subscription, SubscriptionFilter, SummaryQuery};

/// Repository trait for Subscription persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert a new subscription
    async fn create(&self, subscription: Subscription) -> SubscriptionResult<()>;

    /// Get a subscription by ID
    async fn get_by_id(&self, id: Uuid) -> SubscriptionResult<Option<Subscription>>;

    /// Overwrite the service name, price and dates of the row with this id.
    ///
    /// The owner (`user_id`) is never changed. Updating an absent id is a
    /// silent no-op.
    async fn update(&self, id: Uuid, subscription: Subscription) -> SubscriptionResult<()>;

    /// Check whether a row with this id exists
    async fn exists(&self, id: Uuid) -> SubscriptionResult<bool>;

    /// Delete by ID. Deleting an absent id is a silent no-op.
    async fn delete(&self, id: Uuid) -> SubscriptionResult<()>;

    /// List subscriptions matching every present filter
    async fn list(&self, filter: SubscriptionFilter) -> SubscriptionResult<Vec<Subscription>>;

    /// Sum of prices of matching subscriptions, 0 when none match
    async fn summary(&self, query: SummaryQuery) -> SubscriptionResult<i64>;
}

/// In-memory implementation of SubscriptionRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<HashMap<Uuid, Subscription>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn create(&self, subscription: Subscription) -> SubscriptionResult<()> {
        let mut subscriptions = self.subscriptions.write().await;
        tracing::debug!(subscription_id = %subscription.id, "Created subscription");
        subscriptions.insert(subscription.id, subscription);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> SubscriptionResult<Option<Subscription>> {
        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, subscription: Subscription) -> SubscriptionResult<()> {
        let mut subscriptions = self.subscriptions.write().await;

        if let Some(existing) = subscriptions.get_mut(&id) {
            existing.service_name = subscription.service_name;
            existing.price = subscription.price;
            existing.start_date = subscription.start_date;
            existing.end_date = subscription.end_date;
            tracing::debug!(subscription_id = %id, "Updated subscription");
        }

        Ok(())
    }

    async fn exists(&self, id: Uuid) -> SubscriptionResult<bool> {
        Ok(self.subscriptions.read().await.contains_key(&id))
    }

    async fn delete(&self, id: Uuid) -> SubscriptionResult<()> {
        if self.subscriptions.write().await.remove(&id).is_some() {
            tracing::debug!(subscription_id = %id, "Deleted subscription");
        }
        Ok(())
    }

    async fn list(&self, filter: SubscriptionFilter) -> SubscriptionResult<Vec<Subscription>> {
        let subscriptions = self.subscriptions.read().await;

        let result = subscriptions
            .values()
            .filter(|s| filter.user_id.is_none_or(|id| s.user_id == id))
            .filter(|s| {
                filter
                    .service_name
                    .as_deref()
                    .is_none_or(|name| s.service_name == name)
            })
            .cloned()
            .collect();

        Ok(result)
    }

    async fn summary(&self, query: SummaryQuery) -> SubscriptionResult<i64> {
        let subscriptions = self.subscriptions.read().await;

        Ok(subscriptions
            .values()
            .filter(|s| query.matches(s))
            .map(|s| i64::from(s.price))
            .sum())
    }
}
