//! Subscription repository port.
//!
//! Defines the contract for persisting and querying subscriptions.
//! Implementations handle the actual storage operations.
//!
//! # Design
//!
//! - **User-scoped writes**: update and delete target every row of a user
//! - **One transaction per write**: insert, update and delete each run in
//!   their own transaction; reads are single non-transactional queries
//! - **Distinct misses**: lookups report `SubscriptionNotFound`, writes that
//!   touch nothing report `NoRowsAffected`

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{
    SpendQuery, Subscription, SubscriptionFilter, SubscriptionPatch,
};

/// Repository port for subscription persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert a new subscription row.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure (the transaction is rolled back)
    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Find the first subscription owned by a user.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if the user has no subscription
    /// - `DatabaseError` on persistence failure
    async fn find_by_user(&self, user_id: &UserId) -> Result<Subscription, DomainError>;

    /// Find every subscription matching the filter.
    ///
    /// # Errors
    ///
    /// - `SubscriptionNotFound` if nothing matches
    /// - `DatabaseError` on persistence failure
    async fn find_filtered(
        &self,
        filter: &SubscriptionFilter,
    ) -> Result<Vec<Subscription>, DomainError>;

    /// Apply a partial update to a user's subscriptions.
    ///
    /// An empty patch is a no-op that succeeds without touching storage.
    ///
    /// # Errors
    ///
    /// - `NoRowsAffected` if the user has no subscription
    /// - `DatabaseError` on persistence failure
    async fn update_by_user(
        &self,
        user_id: &UserId,
        patch: &SubscriptionPatch,
    ) -> Result<(), DomainError>;

    /// Delete every subscription of a user.
    ///
    /// # Errors
    ///
    /// - `NoRowsAffected` if the user has no subscription
    /// - `DatabaseError` on persistence failure
    async fn delete_by_user(&self, user_id: &UserId) -> Result<(), DomainError>;

    /// Sum the prices of matching subscriptions. Zero when nothing matches.
    async fn sum_price(&self, query: &SpendQuery) -> Result<i64, DomainError>;
}
