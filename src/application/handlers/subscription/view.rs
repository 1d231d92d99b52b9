//! Wire representation of a subscription.

use serde::{Deserialize, Serialize};

use crate::domain::subscription::Subscription;

/// Subscription as exchanged with clients: dates are `MM-YYYY` strings and
/// `end_date` is omitted for ongoing subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionView {
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl From<&Subscription> for SubscriptionView {
    fn from(sub: &Subscription) -> Self {
        Self {
            service_name: sub.service_name().to_string(),
            price: sub.price(),
            user_id: sub.user_id().to_string(),
            start_date: sub.start_date().to_string(),
            end_date: sub.end_date().map(|d| d.to_string()),
        }
    }
}

impl From<Subscription> for SubscriptionView {
    fn from(sub: Subscription) -> Self {
        Self::from(&sub)
    }
}

/// Empty or missing strings both mean "not given".
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
