//! In-memory adapters backing the test suites.

mod subscription_repository;

pub use subscription_repository::InMemorySubscriptionRepository;
