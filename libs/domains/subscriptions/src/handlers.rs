use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_helpers::{ApiResponse, AppError, JsonBody, MessageResponse, QueryParams};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::entity;
use crate::error::{SubscriptionError, SubscriptionResult, messages};
use crate::models::{
    IdQuery, ListQuery, Subscription, SubscriptionFilter, SubscriptionRequest, SummaryRequest,
    SummaryTotal,
};
use crate::repository::SubscriptionRepository;
use crate::service::SubscriptionService;

type HandlerResult<T> = Result<ApiResponse<T>, AppError>;

/// OpenAPI documentation for the Subscriptions API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Subscription Service API",
        version = "1.0",
        description = "CRUD and cost summary for users' online subscriptions"
    ),
    paths(
        create_subscription,
        get_subscription,
        update_subscription,
        delete_subscription,
        list_subscriptions,
        get_summary,
    ),
    components(schemas(
        Subscription,
        SubscriptionRequest,
        SummaryRequest,
        SummaryTotal,
        MessageResponse
    )),
    tags(
        (name = entity::Model::TAG, description = "Subscription management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the subscription router with all HTTP endpoints
pub fn router<R: SubscriptionRepository + 'static>(service: SubscriptionService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/subscriptions",
            get(get_subscription::<R>)
                .post(create_subscription::<R>)
                .put(update_subscription::<R>)
                .delete(delete_subscription::<R>),
        )
        .route("/subscriptions/summary", post(get_summary::<R>))
        .route("/all-subscriptions", get(list_subscriptions::<R>))
        .with_state(shared_service)
}

/// Parse the `id` query parameter. `malformed` is the message for a
/// present but unparseable value.
fn parse_id(raw: Option<String>, malformed: &'static str) -> SubscriptionResult<Uuid> {
    let raw = raw
        .filter(|id| !id.is_empty())
        .ok_or(SubscriptionError::InvalidParameter(messages::MISSING_ID))?;

    Uuid::parse_str(&raw).map_err(|e| {
        tracing::warn!(id = %raw, error = %e, "Malformed id parameter");
        SubscriptionError::InvalidParameter(malformed)
    })
}

/// Create a subscription
#[utoipa::path(
    post,
    path = "/subscriptions",
    tag = entity::Model::TAG,
    request_body = SubscriptionRequest,
    responses(
        (status = 200, description = "Subscription created", body = ApiResponse<Subscription>),
        (status = 400, description = "Malformed or invalid body", body = MessageResponse),
        (status = 429, description = "Rate limited", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
async fn create_subscription<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    JsonBody(input): JsonBody<SubscriptionRequest>,
) -> HandlerResult<Subscription> {
    tracing::info!("Handling create subscription");

    let subscription = input
        .into_subscription(Uuid::new_v4())
        .map_err(SubscriptionError::from)?;
    let created = service
        .create_subscription(subscription)
        .await
        .map_err(|e| e.on_storage_failure(messages::CREATE_FAILED))?;

    Ok(ApiResponse::ok(messages::CREATED, created))
}

/// Get a subscription by ID
#[utoipa::path(
    get,
    path = "/subscriptions",
    tag = entity::Model::TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Subscription found", body = ApiResponse<Subscription>),
        (status = 400, description = "Missing or malformed id", body = MessageResponse),
        (status = 404, description = "Subscription not found", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
async fn get_subscription<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    QueryParams(params): QueryParams<IdQuery>,
) -> HandlerResult<Subscription> {
    tracing::info!("Handling get subscription");

    let id = parse_id(params.id, messages::INVALID_ID)?;
    let subscription = service
        .get_subscription(id)
        .await
        .map_err(|e| e.on_storage_failure(messages::GET_FAILED))?;

    Ok(ApiResponse::ok(messages::FETCHED, subscription))
}

/// Replace a subscription's service name, price and dates
///
/// The owner is never changed, even if the body carries another `user_id`.
#[utoipa::path(
    put,
    path = "/subscriptions",
    tag = entity::Model::TAG,
    params(IdQuery),
    request_body = SubscriptionRequest,
    responses(
        (status = 200, description = "Subscription updated", body = ApiResponse<Subscription>),
        (status = 400, description = "Bad id or invalid body", body = MessageResponse),
        (status = 404, description = "Subscription does not exist", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
async fn update_subscription<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    QueryParams(params): QueryParams<IdQuery>,
    body: Result<JsonBody<SubscriptionRequest>, AppError>,
) -> HandlerResult<Subscription> {
    tracing::info!("Handling update subscription");

    // The id is checked before the body is looked at.
    let id = parse_id(params.id, messages::INVALID_ID_EXAMPLE)?;
    let JsonBody(input) = body?;

    let subscription = input.into_subscription(id).map_err(SubscriptionError::from)?;
    let updated = service
        .update_subscription(id, subscription)
        .await
        .map_err(|e| e.on_storage_failure(messages::UPDATE_FAILED))?;

    Ok(ApiResponse::ok(messages::UPDATED, updated))
}

/// Delete a subscription by ID
///
/// Succeeds for ids that do not exist.
#[utoipa::path(
    delete,
    path = "/subscriptions",
    tag = entity::Model::TAG,
    params(IdQuery),
    responses(
        (status = 200, description = "Subscription deleted", body = MessageResponse),
        (status = 400, description = "Missing or malformed id", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
async fn delete_subscription<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    QueryParams(params): QueryParams<IdQuery>,
) -> Result<MessageResponse, AppError> {
    tracing::info!("Handling delete subscription");

    let id = parse_id(params.id, messages::INVALID_ID)?;
    service
        .delete_subscription(id)
        .await
        .map_err(|e| e.on_storage_failure(messages::DELETE_FAILED))?;

    Ok(MessageResponse::new(StatusCode::OK, messages::DELETED))
}

/// List subscriptions, optionally filtered by user and service name
#[utoipa::path(
    get,
    path = "/all-subscriptions",
    tag = entity::Model::TAG,
    params(ListQuery),
    responses(
        (status = 200, description = "Matching subscriptions", body = ApiResponse<Vec<Subscription>>),
        (status = 400, description = "Malformed user id", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
async fn list_subscriptions<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    QueryParams(params): QueryParams<ListQuery>,
) -> HandlerResult<Vec<Subscription>> {
    tracing::info!("Handling list subscriptions");

    let user_id = params
        .user_id
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            Uuid::parse_str(&raw).map_err(|e| {
                tracing::warn!(user_id = %raw, error = %e, "Malformed user id parameter");
                SubscriptionError::InvalidParameter(messages::INVALID_USER_ID)
            })
        })
        .transpose()?;

    let filter = SubscriptionFilter {
        user_id,
        service_name: params.service_name.filter(|name| !name.is_empty()),
    };

    let subscriptions = service
        .list_subscriptions(filter)
        .await
        .map_err(|e| e.on_storage_failure(messages::LIST_FAILED))?;

    Ok(ApiResponse::ok(messages::LISTED, subscriptions))
}

/// Total monthly cost of subscriptions overlapping a window
///
/// Only the months of `from` and `to` matter. Absent bounds leave that side
/// of the window open.
#[utoipa::path(
    post,
    path = "/subscriptions/summary",
    tag = entity::Model::TAG,
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Summed price", body = ApiResponse<SummaryTotal>),
        (status = 400, description = "Malformed body", body = MessageResponse),
        (status = 500, description = "Storage failure", body = MessageResponse)
    )
)]
async fn get_summary<R: SubscriptionRepository>(
    State(service): State<Arc<SubscriptionService<R>>>,
    JsonBody(request): JsonBody<SummaryRequest>,
) -> HandlerResult<SummaryTotal> {
    tracing::info!("Handling get summary");

    let total = service
        .summary(request)
        .await
        .map_err(|e| e.on_storage_failure(messages::SUMMARY_FAILED))?;

    Ok(ApiResponse::ok(messages::SUMMARIZED, SummaryTotal { total }))
}
