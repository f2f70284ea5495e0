use axum::Router;
use axum_helpers::server::{create_production_app, create_router};
use core_config::rate_limit::RateLimitConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_subscriptions::{
    ApiDoc, PgSubscriptionRepository, SubscriptionRepository, SubscriptionService, handlers,
};
use migration::Migrator;
use tracing::info;

mod config;

use config::Config;

/// Subscription routes behind the shared middleware stack and API docs.
fn app<R: SubscriptionRepository + 'static>(
    service: SubscriptionService<R>,
    limits: &RateLimitConfig,
) -> Router {
    create_router::<ApiDoc>(handlers::router(service), limits)
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config(config.database.clone()).await?;
    database::postgres::run_migrations::<Migrator>(&db, "subscriptions_api").await?;

    let service = SubscriptionService::new(PgSubscriptionRepository::new(db.clone()));
    let router = app(service, &config.rate_limit);

    info!(
        rps = config.rate_limit.requests_per_second.get(),
        burst = config.rate_limit.burst.get(),
        "Starting subscriptions API"
    );

    create_production_app(router, &config.server, async move {
        info!("Shutting down: closing PostgreSQL connections");
        database::postgres::close(db).await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Subscriptions API shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_subscriptions::InMemorySubscriptionRepository;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use std::num::NonZeroU32;
    use tower::ServiceExt;

    fn test_app(rps: u32, burst: u32) -> Router {
        let limits = RateLimitConfig::new(
            NonZeroU32::new(rps).unwrap(),
            NonZeroU32::new(burst).unwrap(),
        );
        app(
            SubscriptionService::new(InMemorySubscriptionRepository::new()),
            &limits,
        )
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_full_stack_create_then_list() {
        let app = test_app(100, 100);

        let body = json!({
            "service_name": "Yandex Plus",
            "price": 400,
            "user_id": "60601fee-2bf1-4721-ae6f-7636e79a0cba",
            "start_date": "07-2025"
        });
        let (status, _) = call(&app, "POST", "/subscriptions", Body::from(body.to_string())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(&app, "GET", "/all-subscriptions", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_route_is_enveloped() {
        let app = test_app(100, 100);

        let (status, body) = call(&app, "GET", "/nope", Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "status": 404, "msg": "Not found" }));
    }

    #[tokio::test]
    async fn test_burst_exhaustion_is_rate_limited() {
        let app = test_app(1, 2);

        for _ in 0..2 {
            let (status, _) = call(&app, "GET", "/all-subscriptions", Body::empty()).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = call(&app, "GET", "/all-subscriptions", Body::empty()).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body, json!({ "status": 429, "msg": "Too many requests" }));
    }

    #[tokio::test]
    async fn test_openapi_lists_subscription_paths() {
        let app = test_app(100, 100);

        let (status, body) = call(&app, "GET", "/api-docs/openapi.json", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        for path in ["/subscriptions", "/subscriptions/summary", "/all-subscriptions"] {
            assert!(body["paths"].get(path).is_some(), "missing {path}");
        }
    }
}
