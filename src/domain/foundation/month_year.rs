//! Month-precision calendar date.
//!
//! Subscriptions are billed per month, so every date in the system carries
//! a month and a year only. The textual form is `MM-YYYY` (e.g. `01-2024`).
//! Internally the value is the first day of that month, which is also what
//! gets written to `date` columns.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Why a `MM-YYYY` token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseMonthYearError {
    #[error("expected MM-YYYY, got {0:?}")]
    Layout(String),

    #[error("month out of range: {0}")]
    MonthOutOfRange(u32),
}

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear(NaiveDate);

impl MonthYear {
    /// Creates a MonthYear from numeric parts.
    pub fn new(month: u32, year: i32) -> Result<Self, ParseMonthYearError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or(ParseMonthYearError::MonthOutOfRange(month))
    }

    /// Truncates a stored date to its month.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Parses an optional wire value: an empty string means "not given".
    pub fn parse_optional(value: &str) -> Result<Option<Self>, ParseMonthYearError> {
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }

    /// First day of the month, as stored.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl FromStr for MonthYear {
    type Err = ParseMonthYearError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let layout_error = || ParseMonthYearError::Layout(s.to_string());

        let (month, year) = s.split_once('-').ok_or_else(layout_error)?;
        if month.len() != 2
            || year.len() != 4
            || !month.bytes().all(|b| b.is_ascii_digit())
            || !year.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(layout_error());
        }

        let month: u32 = month.parse().map_err(|_| layout_error())?;
        let year: i32 = year.parse().map_err(|_| layout_error())?;
        Self::new(month, year)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month(), self.year())
    }
}
