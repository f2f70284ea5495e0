use crate::errors::handlers::not_found;
use crate::middleware::{rate_limit, rate_limiter};
use super::shutdown::shutdown_signal;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, Response},
    middleware, Router,
};
use core_config::{rate_limit::RateLimitConfig, server::ServerConfig};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, warn, Span};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Wraps the API routes with documentation and cross-cutting middleware.
///
/// Layering, outermost first:
/// 1. request span (`method`, `path`, `remote_addr`) with start/completion events
/// 2. global rate limiter
/// 3. routes, Swagger UI at `/swagger`, envelope 404 fallback
///
/// Every request is logged, including those the limiter rejects.
///
/// # Example
/// ```ignore
/// let router = create_router::<ApiDoc>(api_routes, &RateLimitConfig::default());
/// ```
pub fn create_router<T>(apis: Router, limits: &RateLimitConfig) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            rate_limiter(limits),
            rate_limit,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let remote_addr = request
                        .extensions()
                        .get::<ConnectInfo<SocketAddr>>()
                        .map(|ConnectInfo(addr)| addr.to_string())
                        .unwrap_or_default();

                    info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        remote_addr = %remote_addr,
                    )
                })
                .on_request(|_request: &Request<Body>, _span: &Span| {
                    info!("Request started");
                })
                .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis() as u64,
                        "Request completed"
                    );
                }),
        )
}

/// Serve `router` until `signal` resolves, then drain for at most `grace`.
///
/// New connections stop being accepted as soon as the signal fires. Requests
/// still running when the grace period ends are dropped.
pub async fn serve_until<F>(
    listener: TcpListener,
    router: Router,
    grace: Duration,
    signal: F,
) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut server_task = tokio::spawn(async move { server.await });

    tokio::select! {
        joined = &mut server_task => {
            // Server stopped without being asked to: surface its error.
            return joined.map_err(io::Error::other)?.inspect_err(|e| {
                tracing::error!("Server encountered an error: {:?}", e);
            });
        }
        _ = signal => {}
    }

    info!("Initiating graceful shutdown");
    let _ = stop_tx.send(());
    info!("Draining in-flight requests (timeout: {:?})", grace);

    match tokio::time::timeout(grace, &mut server_task).await {
        Ok(joined) => {
            joined.map_err(io::Error::other)??;
            info!("Server stopped gracefully");
        }
        Err(_) => {
            warn!(
                "Graceful shutdown exceeded timeout of {:?}, forcing shutdown",
                grace
            );
            server_task.abort();
        }
    }

    Ok(())
}

/// Binds the configured address, serves until SIGINT/SIGTERM, drains within
/// `server_config.shutdown_timeout`, then runs `cleanup`.
///
/// # Example
/// ```ignore
/// create_production_app(router, &config.server, async move {
///     database::postgres::close(db).await;
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()>,
{
    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let result = serve_until(
        listener,
        router,
        server_config.shutdown_timeout,
        shutdown_signal(),
    )
    .await;

    info!("Running cleanup tasks");
    cleanup.await;

    result
}
