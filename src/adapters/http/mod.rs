//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the subscription endpoints, the health check and
//! the cross-cutting middleware stack.

pub mod middleware;
pub mod subscription;

pub use subscription::{subscription_routes, SubscriptionHandlers};

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;

use crate::config::ServerConfig;

use middleware::{cors_layer, request_id_header, trace_layer, MakeRequestUuid};

/// Builds the application router.
///
/// Layers run outermost first: request id assignment, tracing, request id
/// echo, timeout, CORS.
pub fn app_router(handlers: SubscriptionHandlers, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/subscriptions", subscription_routes(handlers))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
                .layer(trace_layer())
                .layer(PropagateRequestIdLayer::new(request_id_header()))
                .layer(TimeoutLayer::new(config.request_timeout()))
                .layer(cors_layer(config)),
        )
}

/// GET /health - Liveness check
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
