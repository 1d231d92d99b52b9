//! HTTP adapter for subscription endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSubscriptionRequest, ErrorResponse, FilterSubscriptionsRequest, StatusResponse,
    SumResponse, SumSubscriptionsRequest, UpdateSubscriptionRequest,
};
pub use handlers::SubscriptionHandlers;
pub use routes::subscription_routes;
