use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Client-facing messages of the subscription endpoints.
pub mod messages {
    pub const MISSING_ID: &str = "Missing id parameter";
    pub const INVALID_ID: &str = "Invalid id format";
    pub const INVALID_ID_EXAMPLE: &str =
        "Invalid id format, example xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx";
    pub const INVALID_USER_ID: &str = "Invalid user id parameter";
    pub const NOT_FOUND: &str = "Subscription not found";
    pub const DOES_NOT_EXIST: &str = "Subscription does not exist";

    pub const CREATE_FAILED: &str = "Failed to create subscription";
    pub const GET_FAILED: &str = "Failed to get subscription";
    pub const UPDATE_FAILED: &str = "Failed to update subscription";
    pub const DELETE_FAILED: &str = "Failed to delete subscription";
    pub const LIST_FAILED: &str = "Failed to get list subs";
    pub const SUMMARY_FAILED: &str = "Failed to get summary";

    pub const CREATED: &str = "Successfully created subscription";
    pub const FETCHED: &str = "Successfully get subscriptions";
    pub const UPDATED: &str = "Successfully updated subscription";
    pub const DELETED: &str = "Successfully deleted subscription";
    pub const LISTED: &str = "Successfully get list subs";
    pub const SUMMARIZED: &str = "Successfully get summary";
}

/// First failed check of a create/update body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid service name")]
    InvalidServiceName,

    #[error("invalid price")]
    InvalidPrice,

    #[error("invalid user id")]
    InvalidUserId,

    #[error("invalid start date")]
    InvalidStartDate,

    #[error("invalid end date")]
    InvalidEndDate,
}

#[derive(Debug, Error)]
pub enum SubscriptionError {
    #[error("Invalid request body: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    InvalidParameter(&'static str),

    #[error("Subscription not found: {0}")]
    NotFound(Uuid),

    #[error("Subscription does not exist: {0}")]
    DoesNotExist(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// A storage failure already reduced to its client-facing message.
    #[error("{message}: {source}")]
    Storage {
        message: &'static str,
        #[source]
        source: DbErr,
    },
}

pub type SubscriptionResult<T> = Result<T, SubscriptionError>;

impl SubscriptionError {
    /// Attach the operation's failure message to a storage error.
    ///
    /// Other variants pass through unchanged.
    pub fn on_storage_failure(self, message: &'static str) -> Self {
        match self {
            SubscriptionError::Database(source) => SubscriptionError::Storage { message, source },
            other => other,
        }
    }
}

impl From<SubscriptionError> for AppError {
    fn from(err: SubscriptionError) -> Self {
        match err {
            SubscriptionError::Validation(e) => {
                AppError::BadRequest(format!("Invalid request body: {e}"))
            }
            SubscriptionError::InvalidParameter(msg) => AppError::BadRequest(msg.to_string()),
            SubscriptionError::NotFound(_) => AppError::NotFound(messages::NOT_FOUND.to_string()),
            SubscriptionError::DoesNotExist(_) => {
                AppError::NotFound(messages::DOES_NOT_EXIST.to_string())
            }
            SubscriptionError::Database(e) => {
                tracing::warn!(error = %e, "Unhandled storage failure");
                AppError::InternalServerError(
                    axum_helpers::errors::messages::INTERNAL_ERROR.to_string(),
                )
            }
            SubscriptionError::Storage { message, source } => {
                tracing::warn!(error = %source, "{}", message);
                AppError::InternalServerError(message.to_string())
            }
        }
    }
}

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
