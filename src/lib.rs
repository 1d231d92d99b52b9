//! Online Subs - subscription tracking service
//!
//! Records which online services a user pays for, over which months, and
//! answers lookups, filtered searches and total-spend queries over them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
