//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the subscription domain.

mod errors;
mod ids;
mod month_year;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::UserId;
pub use month_year::{MonthYear, ParseMonthYearError};
