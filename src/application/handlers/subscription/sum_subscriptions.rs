//! SumSubscriptionsHandler - Query handler for total spend over a period.

use std::sync::Arc;

use crate::domain::subscription::{parse_optional_month, SpendQuery, SubscriptionError};
use crate::ports::SubscriptionRepository;

use super::parse_user_id;
use super::view::non_empty;

/// Spend aggregate parameters in wire form; all optional.
#[derive(Debug, Clone, Default)]
pub struct SumSubscriptionsQuery {
    pub user_id: Option<String>,
    pub service_name: Option<String>,
    /// Lower bound on start date, `MM-YYYY`.
    pub start_date: Option<String>,
    /// Upper bound on end date, `MM-YYYY`.
    pub end_date: Option<String>,
}

/// Handler for the total-spend aggregate.
///
/// Unlike the other handlers the period bounds are not checked against each
/// other: an inverted period simply sums to zero.
pub struct SumSubscriptionsHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl SumSubscriptionsHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: SumSubscriptionsQuery) -> Result<i64, SubscriptionError> {
        let spend = SpendQuery {
            user_id: non_empty(query.user_id)
                .map(|u| parse_user_id(&u))
                .transpose()?,
            service_name: non_empty(query.service_name),
            start_date: parse_optional_month("start_date", query.start_date.as_deref())?,
            end_date: parse_optional_month("end_date", query.end_date.as_deref())?,
        };

        let total = self
            .repository
            .sum_price(&spend)
            .await
            .map_err(SubscriptionError::from)?;

        tracing::info!(
            user_id = ?spend.user_id.as_ref().map(|u| u.as_str()),
            service_name = ?spend.service_name,
            total,
            "Subscriptions summed"
        );

        Ok(total)
    }
}
