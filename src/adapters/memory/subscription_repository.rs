//! In-memory subscription repository.
//!
//! Mirrors the PostgreSQL adapter's semantics (lookup sentinels, lower and
//! upper bounds, row ordering) without a database. Used by the unit and
//! router test suites.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{
    SpendQuery, Subscription, SubscriptionFilter, SubscriptionPatch,
};
use crate::ports::SubscriptionRepository;

/// Subscription store backed by a `Vec` behind an async lock.
///
/// Writes hold the write lock for their whole duration, which gives each
/// write the same all-or-nothing behaviour as a database transaction.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    rows: RwLock<Vec<Subscription>>,
}

impl InMemorySubscriptionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with rows.
    pub fn with_rows(rows: Vec<Subscription>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    /// Snapshot of every stored row, in insertion order.
    pub async fn rows(&self) -> Vec<Subscription> {
        self.rows.read().await.clone()
    }
}

/// Same ordering as the SQL adapter's `ORDER BY start_date, service_name`.
fn sorted(mut rows: Vec<Subscription>) -> Vec<Subscription> {
    rows.sort_by(|a, b| {
        a.start_date()
            .cmp(&b.start_date())
            .then_with(|| a.service_name().cmp(b.service_name()))
    });
    rows
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        self.rows.write().await.push(subscription.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Subscription, DomainError> {
        let rows = self.rows.read().await;
        let owned = rows
            .iter()
            .filter(|s| s.user_id() == user_id)
            .cloned()
            .collect();

        sorted(owned)
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found(format!("no subscription for user {}", user_id)))
    }

    async fn find_filtered(
        &self,
        filter: &SubscriptionFilter,
    ) -> Result<Vec<Subscription>, DomainError> {
        let rows = self.rows.read().await;
        let matching: Vec<Subscription> =
            rows.iter().filter(|s| filter.matches(s)).cloned().collect();

        if matching.is_empty() {
            return Err(DomainError::not_found("no subscriptions match the filter"));
        }

        Ok(sorted(matching))
    }

    async fn update_by_user(
        &self,
        user_id: &UserId,
        patch: &SubscriptionPatch,
    ) -> Result<(), DomainError> {
        if patch.is_empty() {
            return Ok(());
        }

        let mut rows = self.rows.write().await;
        let mut affected = 0;
        for row in rows.iter_mut().filter(|s| s.user_id() == user_id) {
            *row = patch.apply_to(row);
            affected += 1;
        }

        if affected == 0 {
            return Err(DomainError::no_rows_affected(user_id));
        }

        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|s| s.user_id() != user_id);

        if rows.len() == before {
            return Err(DomainError::no_rows_affected(user_id));
        }

        Ok(())
    }

    async fn sum_price(&self, query: &SpendQuery) -> Result<i64, DomainError> {
        let filter = query.as_filter();
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|s| filter.matches(s))
            .map(|s| i64::from(s.price()))
            .sum())
    }
}
