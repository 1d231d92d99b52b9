//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSubscriptionRepository` - `SubscriptionRepository` over a `PgPool`
//! - `connect_pool` / `run_migrations` - pool bootstrap used by the binaries

mod pool;
mod queries;
mod subscription_repository;

pub use pool::{connect_pool, run_migrations};
pub use subscription_repository::PostgresSubscriptionRepository;
