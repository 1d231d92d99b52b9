//! Subscription command and query handlers.
//!
//! Handlers accept the wire representation (dates as `MM-YYYY` text),
//! validate it, and delegate to the `SubscriptionRepository` port.

mod create_subscription;
mod delete_subscription;
mod filter_subscriptions;
mod get_subscription;
mod sum_subscriptions;
mod update_subscription;
mod view;

pub use create_subscription::{CreateSubscriptionCommand, CreateSubscriptionHandler};
pub use delete_subscription::{DeleteSubscriptionCommand, DeleteSubscriptionHandler};
pub use filter_subscriptions::{FilterSubscriptionsHandler, FilterSubscriptionsQuery};
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery};
pub use sum_subscriptions::{SumSubscriptionsHandler, SumSubscriptionsQuery};
pub use update_subscription::{UpdateSubscriptionCommand, UpdateSubscriptionHandler};
pub use view::SubscriptionView;

use crate::domain::foundation::UserId;
use crate::domain::subscription::SubscriptionError;

/// Parses a path or body user id.
fn parse_user_id(raw: &str) -> Result<UserId, SubscriptionError> {
    UserId::new(raw).map_err(|e| SubscriptionError::validation(e.field(), e.to_string()))
}

/// Repository double shared by the handler tests.
#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::adapters::memory::InMemorySubscriptionRepository;
    use crate::domain::foundation::{DomainError, UserId};
    use crate::domain::subscription::{
        SpendQuery, Subscription, SubscriptionFilter, SubscriptionPatch,
    };
    use crate::ports::SubscriptionRepository;

    /// Records every port call and optionally fails them all.
    #[derive(Default)]
    pub struct MockSubscriptionRepository {
        inner: InMemorySubscriptionRepository,
        calls: Mutex<Vec<&'static str>>,
        last_filter: Mutex<Option<SubscriptionFilter>>,
        last_patch: Mutex<Option<SubscriptionPatch>>,
        last_spend_query: Mutex<Option<SpendQuery>>,
        fail_with: Option<DomainError>,
    }

    impl MockSubscriptionRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_rows(rows: Vec<Subscription>) -> Self {
            Self {
                inner: InMemorySubscriptionRepository::with_rows(rows),
                ..Default::default()
            }
        }

        pub fn failing(error: DomainError) -> Self {
            Self {
                fail_with: Some(error),
                ..Default::default()
            }
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        pub fn last_filter(&self) -> Option<SubscriptionFilter> {
            self.last_filter.lock().unwrap().clone()
        }

        pub fn last_patch(&self) -> Option<SubscriptionPatch> {
            self.last_patch.lock().unwrap().clone()
        }

        pub fn last_spend_query(&self) -> Option<SpendQuery> {
            self.last_spend_query.lock().unwrap().clone()
        }

        pub async fn rows(&self) -> Vec<Subscription> {
            self.inner.rows().await
        }

        fn record(&self, call: &'static str) -> Result<(), DomainError> {
            self.calls.lock().unwrap().push(call);
            match &self.fail_with {
                Some(err) => Err(err.clone()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl SubscriptionRepository for MockSubscriptionRepository {
        async fn insert(&self, subscription: &Subscription) -> Result<(), DomainError> {
            self.record("insert")?;
            self.inner.insert(subscription).await
        }

        async fn find_by_user(&self, user_id: &UserId) -> Result<Subscription, DomainError> {
            self.record("find_by_user")?;
            self.inner.find_by_user(user_id).await
        }

        async fn find_filtered(
            &self,
            filter: &SubscriptionFilter,
        ) -> Result<Vec<Subscription>, DomainError> {
            *self.last_filter.lock().unwrap() = Some(filter.clone());
            self.record("find_filtered")?;
            self.inner.find_filtered(filter).await
        }

        async fn update_by_user(
            &self,
            user_id: &UserId,
            patch: &SubscriptionPatch,
        ) -> Result<(), DomainError> {
            *self.last_patch.lock().unwrap() = Some(patch.clone());
            self.record("update_by_user")?;
            self.inner.update_by_user(user_id, patch).await
        }

        async fn delete_by_user(&self, user_id: &UserId) -> Result<(), DomainError> {
            self.record("delete_by_user")?;
            self.inner.delete_by_user(user_id).await
        }

        async fn sum_price(&self, query: &SpendQuery) -> Result<i64, DomainError> {
            *self.last_spend_query.lock().unwrap() = Some(query.clone());
            self.record("sum_price")?;
            self.inner.sum_price(query).await
        }
    }

    pub fn subscription(
        user: &str,
        name: &str,
        price: i32,
        start: &str,
        end: Option<&str>,
    ) -> Subscription {
        Subscription::reconstitute(
            name.to_string(),
            price,
            UserId::new(user).unwrap(),
            start.parse().unwrap(),
            end.map(|e| e.parse().unwrap()),
        )
    }
}
