//! Subscription domain module.
//!
//! A subscription records that a user pays a monthly `price` for an online
//! service between `start_date` and an optional `end_date`. Dates carry
//! month precision only.

mod aggregate;
mod errors;
mod query;

pub use aggregate::Subscription;
pub use errors::SubscriptionError;
pub use query::{SpendQuery, SubscriptionFilter, SubscriptionPatch};

use crate::domain::foundation::MonthYear;

/// Parses a required `MM-YYYY` field.
pub fn parse_month(field: &'static str, value: &str) -> Result<MonthYear, SubscriptionError> {
    value
        .parse()
        .map_err(|e| SubscriptionError::parse(field, value, e))
}

/// Parses an optional `MM-YYYY` field; the empty string means "not given".
pub fn parse_optional_month(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<MonthYear>, SubscriptionError> {
    match value {
        None => Ok(None),
        Some(v) => MonthYear::parse_optional(v).map_err(|e| SubscriptionError::parse(field, v, e)),
    }
}

/// Fails with `InvalidRange` when both bounds are set and end < start.
pub fn ensure_ordered(
    start: Option<MonthYear>,
    end: Option<MonthYear>,
) -> Result<(), SubscriptionError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            Err(SubscriptionError::InvalidRange { start, end })
        }
        _ => Ok(()),
    }
}
