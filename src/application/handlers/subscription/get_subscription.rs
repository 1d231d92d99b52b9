//! GetSubscriptionHandler - Query handler for a user's subscription.

use std::sync::Arc;

use crate::domain::subscription::SubscriptionError;
use crate::ports::SubscriptionRepository;

use super::{parse_user_id, SubscriptionView};

/// Query for the subscription of a single user.
#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub user_id: String,
}

/// Handler for single-user lookups.
///
/// When a user owns several rows the earliest one is returned.
pub struct GetSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl GetSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetSubscriptionQuery,
    ) -> Result<SubscriptionView, SubscriptionError> {
        tracing::debug!(user_id = %query.user_id, "Fetching subscription");

        let user_id = parse_user_id(&query.user_id)?;
        let subscription = self
            .repository
            .find_by_user(&user_id)
            .await
            .map_err(SubscriptionError::from)?;

        Ok(SubscriptionView::from(&subscription))
    }
}
