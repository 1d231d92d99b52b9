//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - `SubscriptionRepository` over PostgreSQL
//! - `memory` - in-process `SubscriptionRepository`
//! - `http` - axum REST surface

pub mod http;
pub mod memory;
pub mod postgres;

pub use memory::InMemorySubscriptionRepository;
pub use postgres::PostgresSubscriptionRepository;
