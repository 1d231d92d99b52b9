//! FilterSubscriptionsHandler - Query handler for multi-field subscription search.

use std::sync::Arc;

use crate::domain::subscription::{
    ensure_ordered, parse_optional_month, SubscriptionError, SubscriptionFilter,
};
use crate::ports::SubscriptionRepository;

use super::view::non_empty;
use super::{parse_user_id, SubscriptionView};

/// Filter in wire form. Every field is optional; empty strings and a zero
/// price mean "do not filter on this field".
#[derive(Debug, Clone, Default)]
pub struct FilterSubscriptionsQuery {
    pub user_id: Option<String>,
    /// Lower bound on price.
    pub price: Option<i32>,
    pub service_name: Option<String>,
    /// Lower bound on start date, `MM-YYYY`.
    pub start_date: Option<String>,
    /// Upper bound on end date, `MM-YYYY`.
    pub end_date: Option<String>,
}

/// Handler for filtered reads.
///
/// An empty result is reported as `NotFound`, not as an empty list.
pub struct FilterSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl FilterSubscriptionsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: FilterSubscriptionsQuery,
    ) -> Result<Vec<SubscriptionView>, SubscriptionError> {
        let filter = build_filter(query)?;
        tracing::debug!(?filter, "Filtering subscriptions");

        let subscriptions = self
            .repository
            .find_filtered(&filter)
            .await
            .map_err(SubscriptionError::from)?;

        tracing::debug!(count = subscriptions.len(), "Filtered subscriptions fetched");

        Ok(subscriptions.iter().map(SubscriptionView::from).collect())
    }
}

fn build_filter(query: FilterSubscriptionsQuery) -> Result<SubscriptionFilter, SubscriptionError> {
    let start_date = parse_optional_month("start_date", query.start_date.as_deref())?;
    let end_date = parse_optional_month("end_date", query.end_date.as_deref())?;
    ensure_ordered(start_date, end_date)?;

    let user_id = non_empty(query.user_id)
        .map(|u| parse_user_id(&u))
        .transpose()?;

    Ok(SubscriptionFilter {
        user_id,
        min_price: query.price.filter(|p| *p != 0),
        service_name: non_empty(query.service_name),
        start_date,
        end_date,
    })
}
