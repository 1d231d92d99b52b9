//! HTTP routes for subscription endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_subscription, delete_subscription, filter_subscriptions, get_subscription,
    sum_subscriptions, update_subscription, SubscriptionHandlers,
};

/// Creates the subscription router; mount it under `/subscriptions`.
pub fn subscription_routes(handlers: SubscriptionHandlers) -> Router {
    Router::new()
        .route("/", post(create_subscription))
        .route("/filter", post(filter_subscriptions))
        .route("/sum", post(sum_subscriptions))
        .route(
            "/:user_id",
            get(get_subscription)
                .put(update_subscription)
                .delete(delete_subscription),
        )
        .with_state(handlers)
}
