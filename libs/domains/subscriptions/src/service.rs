use chrono::{DateTime, FixedOffset, NaiveDate};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{SubscriptionError, SubscriptionResult};
use crate::models::{Subscription, SubscriptionFilter, SummaryQuery, SummaryRequest};
use crate::month;
use crate::repository::SubscriptionRepository;

/// Service layer for Subscription business logic
#[derive(Clone)]
pub struct SubscriptionService<R: SubscriptionRepository> {
    repository: Arc<R>,
}

impl<R: SubscriptionRepository> SubscriptionService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Store an already validated subscription
    pub async fn create_subscription(
        &self,
        subscription: Subscription,
    ) -> SubscriptionResult<Subscription> {
        self.repository.create(subscription.clone()).await?;
        tracing::info!(subscription_id = %subscription.id, "Subscription created");
        Ok(subscription)
    }

    /// Get a subscription by ID
    pub async fn get_subscription(&self, id: Uuid) -> SubscriptionResult<Subscription> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(SubscriptionError::NotFound(id))
    }

    /// Replace the mutable fields of an existing subscription.
    ///
    /// Fails with [`SubscriptionError::DoesNotExist`] without touching storage
    /// when the id is unknown. The check and the write are separate
    /// statements, so a concurrent delete in between goes unnoticed.
    pub async fn update_subscription(
        &self,
        id: Uuid,
        subscription: Subscription,
    ) -> SubscriptionResult<Subscription> {
        if !self.repository.exists(id).await? {
            return Err(SubscriptionError::DoesNotExist(id));
        }

        let subscription = Subscription { id, ..subscription };
        self.repository.update(id, subscription.clone()).await?;

        tracing::info!(subscription_id = %id, "Subscription updated");
        Ok(subscription)
    }

    /// Delete a subscription. Unknown ids succeed.
    pub async fn delete_subscription(&self, id: Uuid) -> SubscriptionResult<()> {
        self.repository.delete(id).await?;
        tracing::info!(subscription_id = %id, "Subscription deleted");
        Ok(())
    }

    /// List subscriptions with filters
    pub async fn list_subscriptions(
        &self,
        filter: SubscriptionFilter,
    ) -> SubscriptionResult<Vec<Subscription>> {
        self.repository.list(filter).await
    }

    /// Total monthly cost of the subscriptions overlapping the requested window
    pub async fn summary(&self, request: SummaryRequest) -> SubscriptionResult<i64> {
        let query = SummaryQuery {
            from: month_bound(request.from),
            to: month_bound(request.to),
            user_id: request.user_id,
            service_name: request.service_name.filter(|name| !name.is_empty()),
        };

        tracing::debug!(?query, "Computing summary");
        self.repository.summary(query).await
    }
}

/// Reduce a window bound to its `MM-YYYY` month.
///
/// The zero instant `0001-01-01T00:00:00Z` counts as "no bound", same as an
/// absent value.
fn month_bound(timestamp: Option<DateTime<FixedOffset>>) -> Option<String> {
    timestamp
        .filter(|ts| !is_zero_instant(ts))
        .map(|ts| month::of_timestamp(&ts))
}

fn is_zero_instant(timestamp: &DateTime<FixedOffset>) -> bool {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .is_some_and(|zero| timestamp.naive_utc() == zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockSubscriptionRepository;
    use mockall::predicate::*;
    use sea_orm::DbErr;

    fn subscription(id: Uuid) -> Subscription {
        Subscription {
            id,
            service_name: "Yandex Plus".to_string(),
            price: 400,
            user_id: Uuid::new_v4(),
            start_date: "07-2025".to_string(),
            end_date: None,
        }
    }

    fn ts(raw: &str) -> Option<DateTime<FixedOffset>> {
        Some(DateTime::parse_from_rfc3339(raw).unwrap())
    }

    #[tokio::test]
    async fn test_get_missing_subscription_is_not_found() {
        let id = Uuid::new_v4();
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));

        let service = SubscriptionService::new(repo);
        let err = service.get_subscription(id).await.unwrap_err();
        assert!(matches!(err, SubscriptionError::NotFound(got) if got == id));
    }

    #[tokio::test]
    async fn test_update_unknown_id_never_writes() {
        let id = Uuid::new_v4();
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_exists()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_update().never();

        let service = SubscriptionService::new(repo);
        let err = service
            .update_subscription(id, subscription(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, SubscriptionError::DoesNotExist(got) if got == id));
    }

    #[tokio::test]
    async fn test_update_uses_addressing_id() {
        let id = Uuid::new_v4();
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_exists().returning(|_| Ok(true));
        repo.expect_update()
            .withf(move |target, sub| *target == id && sub.id == id)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = SubscriptionService::new(repo);
        let updated = service
            .update_subscription(id, subscription(Uuid::new_v4()))
            .await
            .unwrap();
        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn test_update_exists_failure_is_storage_error() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_exists()
            .returning(|_| Err(DbErr::Custom("connection refused".into()).into()));
        repo.expect_update().never();

        let service = SubscriptionService::new(repo);
        let err = service
            .update_subscription(Uuid::new_v4(), subscription(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, SubscriptionError::Database(_)));
    }

    #[tokio::test]
    async fn test_summary_formats_window_in_own_offset() {
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_summary()
            .withf(|query| {
                query.from.as_deref() == Some("01-2025")
                    && query.to.as_deref() == Some("06-2025")
                    && query.service_name.is_none()
            })
            .times(1)
            .returning(|_| Ok(1200));

        let service = SubscriptionService::new(repo);
        let total = service
            .summary(SummaryRequest {
                service_name: Some(String::new()),
                from: ts("2025-01-31T23:00:00-05:00"),
                to: ts("2025-06-01T00:00:00Z"),
                user_id: None,
            })
            .await
            .unwrap();
        assert_eq!(total, 1200);
    }

    #[tokio::test]
    async fn test_summary_zero_instant_means_unbounded() {
        let user_id = Uuid::new_v4();
        let mut repo = MockSubscriptionRepository::new();
        repo.expect_summary()
            .with(eq(SummaryQuery {
                from: None,
                to: None,
                user_id: Some(user_id),
                service_name: Some("Netflix".into()),
            }))
            .times(1)
            .returning(|_| Ok(0));

        let service = SubscriptionService::new(repo);
        let total = service
            .summary(SummaryRequest {
                service_name: Some("Netflix".into()),
                from: ts("0001-01-01T00:00:00Z"),
                to: None,
                user_id: Some(user_id),
            })
            .await
            .unwrap();
        assert_eq!(total, 0);
    }
}
