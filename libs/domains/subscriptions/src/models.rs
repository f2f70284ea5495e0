use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::month;

/// A recurring paid service owned by one user.
///
/// `start_date` and `end_date` are canonical `MM-YYYY` strings. A missing
/// `end_date` means the subscription is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Subscription {
    pub id: Uuid,
    #[schema(example = "Yandex Plus")]
    pub service_name: String,
    #[schema(example = 400)]
    pub price: i32,
    pub user_id: Uuid,
    #[schema(example = "07-2025")]
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "12-2025")]
    pub end_date: Option<String>,
}

/// Body of create and update requests.
///
/// Missing fields and explicit `null`s decode to zero values so that
/// validation, not decoding, reports them. Unknown fields (including `id`)
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SubscriptionRequest {
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "Yandex Plus")]
    pub service_name: String,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = 400)]
    pub price: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: Uuid,
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "07-2025")]
    pub start_date: String,
    #[schema(example = "12-2025")]
    pub end_date: Option<String>,
}

impl SubscriptionRequest {
    /// Validate and normalize into a storable [`Subscription`] with the given id.
    ///
    /// Checks run in a fixed order and the first failure wins.
    pub fn into_subscription(self, id: Uuid) -> Result<Subscription, ValidationError> {
        if self.service_name.is_empty() {
            return Err(ValidationError::InvalidServiceName);
        }
        if self.price <= 0 {
            return Err(ValidationError::InvalidPrice);
        }
        if self.user_id.is_nil() {
            return Err(ValidationError::InvalidUserId);
        }

        let start_date =
            month::normalize(&self.start_date).ok_or(ValidationError::InvalidStartDate)?;

        let end_date = self
            .end_date
            .as_deref()
            .map(|raw| month::normalize(raw).ok_or(ValidationError::InvalidEndDate))
            .transpose()?;

        Ok(Subscription {
            id,
            service_name: self.service_name,
            price: self.price,
            user_id: self.user_id,
            start_date,
            end_date,
        })
    }
}

/// Equality filters for listing. `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

/// Query string of `GET /all-subscriptions`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Only subscriptions of this user
    #[serde(rename = "userId")]
    pub user_id: Option<String>,

    /// Only subscriptions with exactly this service name
    #[serde(rename = "serviceName")]
    pub service_name: Option<String>,
}

/// Query string carrying the subscription id.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Subscription id (UUID)
    pub id: Option<String>,
}

/// Body of `POST /subscriptions/summary`.
///
/// `from` and `to` are RFC 3339 timestamps; only their month matters.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct SummaryRequest {
    pub service_name: Option<String>,
    #[schema(value_type = Option<String>, example = "2025-01-01T00:00:00Z")]
    pub from: Option<DateTime<FixedOffset>>,
    #[schema(value_type = Option<String>, example = "2025-12-01T00:00:00Z")]
    pub to: Option<DateTime<FixedOffset>>,
    pub user_id: Option<Uuid>,
}

/// Summary filters after timestamps have been reduced to `MM-YYYY`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub user_id: Option<Uuid>,
    pub service_name: Option<String>,
}

impl SummaryQuery {
    /// Whether a subscription is counted by this query.
    ///
    /// A subscription overlaps the window when it starts no later than `to`
    /// and has not ended before `from`.
    pub fn matches(&self, subscription: &Subscription) -> bool {
        let starts_in_time = self
            .to
            .as_deref()
            .is_none_or(|to| subscription.start_date.as_str() <= to);
        let still_running = match (self.from.as_deref(), subscription.end_date.as_deref()) {
            (Some(from), Some(end)) => end >= from,
            _ => true,
        };

        starts_in_time
            && still_running
            && self.user_id.is_none_or(|id| subscription.user_id == id)
            && self
                .service_name
                .as_deref()
                .is_none_or(|name| subscription.service_name == name)
    }
}

/// Payload of a successful summary response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SummaryTotal {
    #[schema(example = 1200)]
    pub total: i64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
