//! HTTP DTOs for subscription endpoints.
//!
//! Request bodies mirror the JSON clients send. Missing fields fall back to
//! their defaults so the application layer reports what is wrong.

use serde::{Deserialize, Serialize};

use crate::application::handlers::subscription::{
    CreateSubscriptionCommand, FilterSubscriptionsQuery, SumSubscriptionsQuery,
    UpdateSubscriptionCommand,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a subscription.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateSubscriptionRequest {
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl From<CreateSubscriptionRequest> for CreateSubscriptionCommand {
    fn from(req: CreateSubscriptionRequest) -> Self {
        Self {
            service_name: req.service_name,
            price: req.price,
            user_id: req.user_id,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Filter criteria; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterSubscriptionsRequest {
    pub user_id: Option<String>,
    pub price: Option<i32>,
    pub service_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<FilterSubscriptionsRequest> for FilterSubscriptionsQuery {
    fn from(req: FilterSubscriptionsRequest) -> Self {
        Self {
            user_id: req.user_id,
            price: req.price,
            service_name: req.service_name,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

/// Partial update body; the user comes from the path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSubscriptionRequest {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl UpdateSubscriptionRequest {
    pub fn into_command(self, user_id: String) -> UpdateSubscriptionCommand {
        UpdateSubscriptionCommand {
            user_id,
            service_name: self.service_name,
            price: self.price,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Total-spend criteria; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SumSubscriptionsRequest {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<SumSubscriptionsRequest> for SumSubscriptionsQuery {
    fn from(req: SumSubscriptionsRequest) -> Self {
        Self {
            user_id: req.user_id,
            service_name: req.service_name,
            start_date: req.start_date,
            end_date: req.end_date,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Acknowledgement for write operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumResponse {
    pub total: i64,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn no_rows_affected(message: impl Into<String>) -> Self {
        Self {
            code: "NO_ROWS_AFFECTED".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
