//! CreateSubscriptionHandler - Command handler for recording a new subscription.

use std::sync::Arc;

use crate::domain::subscription::{
    parse_month, parse_optional_month, Subscription, SubscriptionError,
};
use crate::ports::SubscriptionRepository;

use super::parse_user_id;

/// Command to create a subscription, in wire form.
#[derive(Debug, Clone)]
pub struct CreateSubscriptionCommand {
    pub service_name: String,
    pub price: i32,
    pub user_id: String,
    /// Required, `MM-YYYY`.
    pub start_date: String,
    /// Optional, `MM-YYYY`; empty means ongoing.
    pub end_date: Option<String>,
}

/// Handler for creating subscriptions.
pub struct CreateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl CreateSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubscriptionCommand,
    ) -> Result<Subscription, SubscriptionError> {
        tracing::info!(
            user_id = %cmd.user_id,
            service_name = %cmd.service_name,
            "Creating subscription"
        );

        // 1. Parse dates (start required, end optional)
        let start_date = parse_month("start_date", &cmd.start_date)?;
        let end_date = parse_optional_month("end_date", cmd.end_date.as_deref())?;

        // 2. Build the validated entity (range, name, price)
        let user_id = parse_user_id(&cmd.user_id)?;
        let subscription =
            Subscription::new(cmd.service_name, cmd.price, user_id, start_date, end_date)?;

        // 3. Persist
        self.repository.insert(&subscription).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create subscription");
            SubscriptionError::from(e)
        })?;

        tracing::info!(
            user_id = %subscription.user_id(),
            service_name = subscription.service_name(),
            "Subscription created"
        );

        Ok(subscription)
    }
}
