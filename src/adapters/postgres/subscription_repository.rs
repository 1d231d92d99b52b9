//! PostgreSQL implementation of SubscriptionRepository.
//!
//! Persists subscriptions to the `subscriptions` table. Writes run inside
//! a transaction that is committed on success; returning early drops the
//! `sqlx::Transaction`, which rolls it back.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, MonthYear, UserId};
use crate::domain::subscription::{
    SpendQuery, Subscription, SubscriptionFilter, SubscriptionPatch,
};
use crate::ports::SubscriptionRepository;

use super::queries::{
    delete_query, filtered_query, insert_query, select_by_user_query, sum_query, update_query,
};

/// PostgreSQL implementation of SubscriptionRepository.
#[derive(Clone)]
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Creates a new PostgresSubscriptionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        insert_query(subscription)
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to create subscription", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        tracing::debug!(
            user_id = %subscription.user_id(),
            service_name = subscription.service_name(),
            "Subscription row inserted"
        );
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Subscription, DomainError> {
        let row = select_by_user_query(user_id)
            .build()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch subscription", e))?;

        match row {
            Some(row) => row_to_subscription(row),
            None => Err(DomainError::not_found(format!(
                "no subscription for user {}",
                user_id
            ))),
        }
    }

    async fn find_filtered(
        &self,
        filter: &SubscriptionFilter,
    ) -> Result<Vec<Subscription>, DomainError> {
        let mut qb = filtered_query(filter);
        tracing::debug!(sql = qb.sql(), "Executing filtered select");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to execute filtered query", e))?;

        if rows.is_empty() {
            return Err(DomainError::not_found("no subscriptions match the filter"));
        }

        rows.into_iter().map(row_to_subscription).collect()
    }

    async fn update_by_user(
        &self,
        user_id: &UserId,
        patch: &SubscriptionPatch,
    ) -> Result<(), DomainError> {
        let Some(mut qb) = update_query(user_id, patch) else {
            tracing::debug!(user_id = %user_id, "Empty patch, nothing to update");
            return Ok(());
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let result = qb
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to update subscription", e))?;

        ensure_affected(result.rows_affected(), user_id)?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let result = delete_query(user_id)
            .build()
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to delete subscription", e))?;

        ensure_affected(result.rows_affected(), user_id)?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(())
    }

    async fn sum_price(&self, query: &SpendQuery) -> Result<i64, DomainError> {
        let total: i64 = sum_query(query)
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to execute sum query", e))?;

        Ok(total)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn row_to_subscription(row: sqlx::postgres::PgRow) -> Result<Subscription, DomainError> {
    let service_name: String = row
        .try_get("service_name")
        .map_err(|e| DomainError::database("Failed to get service_name", e))?;

    let price: i32 = row
        .try_get("price")
        .map_err(|e| DomainError::database("Failed to get price", e))?;

    let user_id: String = row
        .try_get("user_id")
        .map_err(|e| DomainError::database("Failed to get user_id", e))?;

    let start_date: NaiveDate = row
        .try_get("start_date")
        .map_err(|e| DomainError::database("Failed to get start_date", e))?;

    let end_date: Option<NaiveDate> = row
        .try_get("end_date")
        .map_err(|e| DomainError::database("Failed to get end_date", e))?;

    build_subscription(service_name, price, user_id, start_date, end_date)
}

/// Rebuilds a subscription from column values. Dates snap to the first of
/// their month.
fn build_subscription(
    service_name: String,
    price: i32,
    user_id: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<Subscription, DomainError> {
    let user_id = UserId::new(user_id).map_err(|e| DomainError::database("Invalid user_id", e))?;

    Ok(Subscription::reconstitute(
        service_name,
        price,
        user_id,
        MonthYear::from_date(start_date),
        end_date.map(MonthYear::from_date),
    ))
}

/// A write that touched nothing means the user has no subscriptions.
fn ensure_affected(rows_affected: u64, user_id: &UserId) -> Result<(), DomainError> {
    if rows_affected == 0 {
        return Err(DomainError::no_rows_affected(user_id));
    }
    Ok(())
}
