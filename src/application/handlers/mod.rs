//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod subscription;

pub use subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, DeleteSubscriptionCommand,
    DeleteSubscriptionHandler, FilterSubscriptionsHandler, FilterSubscriptionsQuery,
    GetSubscriptionHandler, GetSubscriptionQuery, SubscriptionView, SumSubscriptionsHandler,
    SumSubscriptionsQuery, UpdateSubscriptionCommand, UpdateSubscriptionHandler,
};
