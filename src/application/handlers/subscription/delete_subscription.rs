//! DeleteSubscriptionHandler - Command handler for removing a user's subscriptions.

use std::sync::Arc;

use crate::domain::subscription::SubscriptionError;
use crate::ports::SubscriptionRepository;

use super::parse_user_id;

/// Command to delete every subscription of a user.
#[derive(Debug, Clone)]
pub struct DeleteSubscriptionCommand {
    pub user_id: String,
}

/// Handler for permanent deletion. There is no soft delete.
pub struct DeleteSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl DeleteSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteSubscriptionCommand) -> Result<(), SubscriptionError> {
        tracing::info!(user_id = %cmd.user_id, "Deleting subscription");

        let user_id = parse_user_id(&cmd.user_id)?;
        self.repository
            .delete_by_user(&user_id)
            .await
            .map_err(|e| {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to delete subscription");
                SubscriptionError::from(e)
            })?;

        tracing::info!(user_id = %user_id, "Subscription deleted");
        Ok(())
    }
}
