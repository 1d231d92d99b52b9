//! Subscription entity.

use crate::domain::foundation::{MonthYear, UserId};

use super::{ensure_ordered, SubscriptionError};

/// A user's subscription to an online service.
///
/// `end_date` of `None` means the subscription is ongoing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    service_name: String,
    price: i32,
    user_id: UserId,
    start_date: MonthYear,
    end_date: Option<MonthYear>,
}

impl Subscription {
    /// Creates a validated subscription.
    ///
    /// # Errors
    ///
    /// - `Validation` if `service_name` is blank or `price` is negative
    /// - `InvalidRange` if `end_date` precedes `start_date`
    pub fn new(
        service_name: impl Into<String>,
        price: i32,
        user_id: UserId,
        start_date: MonthYear,
        end_date: Option<MonthYear>,
    ) -> Result<Self, SubscriptionError> {
        let service_name = service_name.into();
        if service_name.trim().is_empty() {
            return Err(SubscriptionError::validation(
                "service_name",
                "cannot be empty",
            ));
        }
        if price < 0 {
            return Err(SubscriptionError::validation(
                "price",
                format!("cannot be negative, got {}", price),
            ));
        }
        ensure_ordered(Some(start_date), end_date)?;

        Ok(Self {
            service_name,
            price,
            user_id,
            start_date,
            end_date,
        })
    }

    /// Reconstitute a subscription from persistence (no validation).
    pub fn reconstitute(
        service_name: String,
        price: i32,
        user_id: UserId,
        start_date: MonthYear,
        end_date: Option<MonthYear>,
    ) -> Self {
        Self {
            service_name,
            price,
            user_id,
            start_date,
            end_date,
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn price(&self) -> i32 {
        self.price
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn start_date(&self) -> MonthYear {
        self.start_date
    }

    pub fn end_date(&self) -> Option<MonthYear> {
        self.end_date
    }
}
