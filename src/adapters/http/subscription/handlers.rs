//! HTTP handlers for subscription endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::handlers::subscription::{
    CreateSubscriptionHandler, DeleteSubscriptionCommand, DeleteSubscriptionHandler,
    FilterSubscriptionsHandler, GetSubscriptionHandler, GetSubscriptionQuery,
    SumSubscriptionsHandler, UpdateSubscriptionHandler,
};
use crate::domain::subscription::SubscriptionError;
use crate::ports::SubscriptionRepository;

use super::dto::{
    CreateSubscriptionRequest, ErrorResponse, FilterSubscriptionsRequest, StatusResponse,
    SumResponse, SumSubscriptionsRequest, UpdateSubscriptionRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SubscriptionHandlers {
    create_handler: Arc<CreateSubscriptionHandler>,
    get_handler: Arc<GetSubscriptionHandler>,
    filter_handler: Arc<FilterSubscriptionsHandler>,
    update_handler: Arc<UpdateSubscriptionHandler>,
    delete_handler: Arc<DeleteSubscriptionHandler>,
    sum_handler: Arc<SumSubscriptionsHandler>,
}

impl SubscriptionHandlers {
    /// Wires every handler to the same repository.
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self {
            create_handler: Arc::new(CreateSubscriptionHandler::new(repository.clone())),
            get_handler: Arc::new(GetSubscriptionHandler::new(repository.clone())),
            filter_handler: Arc::new(FilterSubscriptionsHandler::new(repository.clone())),
            update_handler: Arc::new(UpdateSubscriptionHandler::new(repository.clone())),
            delete_handler: Arc::new(DeleteSubscriptionHandler::new(repository.clone())),
            sum_handler: Arc::new(SumSubscriptionsHandler::new(repository)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /subscriptions - Create a subscription
pub async fn create_subscription(
    State(handlers): State<SubscriptionHandlers>,
    Json(req): Json<CreateSubscriptionRequest>,
) -> Response {
    match handlers.create_handler.handle(req.into()).await {
        Ok(_) => (StatusCode::CREATED, Json(StatusResponse::new("created"))).into_response(),
        Err(e) => handle_subscription_error(e),
    }
}

/// GET /subscriptions/:user_id - First subscription of a user
pub async fn get_subscription(
    State(handlers): State<SubscriptionHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    match handlers
        .get_handler
        .handle(GetSubscriptionQuery { user_id })
        .await
    {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => handle_subscription_error(e),
    }
}

/// POST /subscriptions/filter - Multi-field search
pub async fn filter_subscriptions(
    State(handlers): State<SubscriptionHandlers>,
    Json(req): Json<FilterSubscriptionsRequest>,
) -> Response {
    match handlers.filter_handler.handle(req.into()).await {
        Ok(views) => (StatusCode::OK, Json(views)).into_response(),
        Err(e) => handle_subscription_error(e),
    }
}

/// PUT /subscriptions/:user_id - Partial update of a user's subscriptions
pub async fn update_subscription(
    State(handlers): State<SubscriptionHandlers>,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateSubscriptionRequest>,
) -> Response {
    match handlers
        .update_handler
        .handle(req.into_command(user_id))
        .await
    {
        Ok(()) => (StatusCode::OK, Json(StatusResponse::new("updated"))).into_response(),
        Err(e) => handle_subscription_error(e),
    }
}

/// DELETE /subscriptions/:user_id - Remove a user's subscriptions
pub async fn delete_subscription(
    State(handlers): State<SubscriptionHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    match handlers
        .delete_handler
        .handle(DeleteSubscriptionCommand { user_id })
        .await
    {
        Ok(()) => (StatusCode::OK, Json(StatusResponse::new("deleted"))).into_response(),
        Err(e) => handle_delete_error(e),
    }
}

/// POST /subscriptions/sum - Total spend
pub async fn sum_subscriptions(
    State(handlers): State<SubscriptionHandlers>,
    Json(req): Json<SumSubscriptionsRequest>,
) -> Response {
    match handlers.sum_handler.handle(req.into()).await {
        Ok(total) => (StatusCode::OK, Json(SumResponse { total })).into_response(),
        Err(e) => handle_subscription_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_subscription_error(error: SubscriptionError) -> Response {
    let message = error.to_string();
    match error {
        SubscriptionError::Parse { field, value, .. } => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::bad_request(message)
                    .with_details(json!({ "field": field, "value": value })),
            ),
        )
            .into_response(),
        SubscriptionError::InvalidRange { .. } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(message)),
        )
            .into_response(),
        SubscriptionError::Validation { field, .. } => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(message).with_details(json!({ "field": field }))),
        )
            .into_response(),
        SubscriptionError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(message)),
        )
            .into_response(),
        SubscriptionError::NoRowsAffected(user_id) => {
            tracing::warn!(user_id = %user_id, "Write matched no subscription rows");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(
                    ErrorResponse::no_rows_affected(message)
                        .with_details(json!({ "user_id": user_id })),
                ),
            )
                .into_response()
        }
        SubscriptionError::Persistence(detail) => {
            tracing::error!(error = %detail, "Subscription storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("An unexpected error occurred")),
            )
                .into_response()
        }
    }
}

/// Every delete failure is a server error.
fn handle_delete_error(error: SubscriptionError) -> Response {
    match error {
        SubscriptionError::NoRowsAffected(_) | SubscriptionError::Persistence(_) => {
            handle_subscription_error(error)
        }
        other => {
            tracing::warn!(error = %other, "Delete rejected");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(other.to_string())),
            )
                .into_response()
        }
    }
}
