//! Filter, partial-update and aggregate query types.
//!
//! Every field is an `Option`: `None` means "not given", so a caller can
//! filter on or write any value, zero included.

use crate::domain::foundation::{MonthYear, UserId};

use super::Subscription;

/// Multi-field filter for subscription reads.
///
/// Predicates are conjoined. `price` is a lower bound, `start_date` a lower
/// bound and `end_date` an upper bound; the rest are equality matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionFilter {
    pub user_id: Option<UserId>,
    pub min_price: Option<i32>,
    pub service_name: Option<String>,
    pub start_date: Option<MonthYear>,
    pub end_date: Option<MonthYear>,
}

impl SubscriptionFilter {
    /// Evaluates the filter the way the SQL predicates do.
    ///
    /// An ongoing subscription (no end date) never satisfies an end-date
    /// bound, matching `NULL <= x` in SQL.
    pub fn matches(&self, sub: &Subscription) -> bool {
        self.user_id.as_ref().map_or(true, |u| sub.user_id() == u)
            && self.min_price.map_or(true, |p| sub.price() >= p)
            && self
                .service_name
                .as_deref()
                .map_or(true, |s| sub.service_name() == s)
            && self.start_date.map_or(true, |d| sub.start_date() >= d)
            && self
                .end_date
                .map_or(true, |d| sub.end_date().is_some_and(|end| end <= d))
    }
}

/// Partial update of the subscriptions owned by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionPatch {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub start_date: Option<MonthYear>,
    pub end_date: Option<MonthYear>,
}

impl SubscriptionPatch {
    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.service_name.is_none()
            && self.price.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// Returns `sub` with every set field replaced.
    pub fn apply_to(&self, sub: &Subscription) -> Subscription {
        Subscription::reconstitute(
            self.service_name
                .clone()
                .unwrap_or_else(|| sub.service_name().to_string()),
            self.price.unwrap_or(sub.price()),
            sub.user_id().clone(),
            self.start_date.unwrap_or(sub.start_date()),
            self.end_date.or(sub.end_date()),
        )
    }
}

/// Parameters of the total-spend aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpendQuery {
    pub user_id: Option<UserId>,
    pub service_name: Option<String>,
    pub start_date: Option<MonthYear>,
    pub end_date: Option<MonthYear>,
}

impl SpendQuery {
    /// The same predicates as a filter, without the price bound.
    pub fn as_filter(&self) -> SubscriptionFilter {
        SubscriptionFilter {
            user_id: self.user_id.clone(),
            min_price: None,
            service_name: self.service_name.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
