//! Subscription-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, MonthYear, ParseMonthYearError};

/// Errors surfaced by the subscription handlers.
///
/// Each failure kind is its own variant so callers can branch with
/// `matches!` instead of inspecting messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// A date field was not in `MM-YYYY` form.
    #[error("invalid {field} {value:?}: {source}")]
    Parse {
        field: &'static str,
        value: String,
        #[source]
        source: ParseMonthYearError,
    },

    /// End date precedes start date.
    #[error("invalid data: end date {end} cannot be before start date {start}")]
    InvalidRange { start: MonthYear, end: MonthYear },

    /// A non-date field failed validation.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// Lookup or filtered read found nothing.
    #[error("not found :(")]
    NotFound,

    /// Update or delete matched no rows for the user.
    #[error("no subscription found for user {0}")]
    NoRowsAffected(String),

    /// Storage failure (connection, statement, commit).
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl SubscriptionError {
    pub fn parse(field: &'static str, value: impl Into<String>, source: ParseMonthYearError) -> Self {
        SubscriptionError::Parse {
            field,
            value: value.into(),
            source,
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SubscriptionError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for both the lookup sentinel and the update/delete miss.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SubscriptionError::NotFound | SubscriptionError::NoRowsAffected(_)
        )
    }
}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::SubscriptionNotFound => SubscriptionError::NotFound,
            ErrorCode::NoRowsAffected => SubscriptionError::NoRowsAffected(
                err.details.get("user_id").cloned().unwrap_or_default(),
            ),
            ErrorCode::DatabaseError => SubscriptionError::Persistence(err.to_string()),
        }
    }
}
