//! HTTP middleware for axum.
//!
//! - `request_id` - `x-request-id` generation, propagation and tracing span
//! - `cors` - CORS layer built from server configuration

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{request_id_header, trace_layer, MakeRequestUuid};
