//! UpdateSubscriptionHandler - Command handler for partial subscription updates.

use std::sync::Arc;

use crate::domain::subscription::{
    ensure_ordered, parse_optional_month, SubscriptionError, SubscriptionPatch,
};
use crate::ports::SubscriptionRepository;

use super::parse_user_id;
use super::view::non_empty;

/// Partial update in wire form.
///
/// Absent fields (and empty strings) leave the stored value unchanged.
/// A present `price` is always written, including zero.
#[derive(Debug, Clone, Default)]
pub struct UpdateSubscriptionCommand {
    pub user_id: String,
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Handler for updating every subscription of a user.
pub struct UpdateSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl UpdateSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: UpdateSubscriptionCommand) -> Result<(), SubscriptionError> {
        tracing::info!(user_id = %cmd.user_id, "Updating subscription");

        let user_id = parse_user_id(&cmd.user_id)?;
        let start_date = parse_optional_month("start_date", cmd.start_date.as_deref())?;
        let end_date = parse_optional_month("end_date", cmd.end_date.as_deref())?;
        ensure_ordered(start_date, end_date)?;

        if let Some(price) = cmd.price.filter(|p| *p < 0) {
            return Err(SubscriptionError::validation(
                "price",
                format!("cannot be negative, got {}", price),
            ));
        }

        let patch = SubscriptionPatch {
            service_name: non_empty(cmd.service_name),
            price: cmd.price,
            start_date,
            end_date,
        };

        if patch.is_empty() {
            tracing::debug!(user_id = %user_id, "No fields to update");
        }

        self.repository
            .update_by_user(&user_id, &patch)
            .await
            .map_err(|e| {
                tracing::warn!(user_id = %user_id, error = %e, "Failed to update subscription");
                SubscriptionError::from(e)
            })?;

        tracing::info!(user_id = %user_id, "Subscription updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::subscription::test_support::{
        subscription, MockSubscriptionRepository,
    };

    fn seeded() -> Arc<MockSubscriptionRepository> {
        Arc::new(MockSubscriptionRepository::with_rows(vec![subscription(
            "u1", "Netflix", 999, "01-2024", None,
        )]))
    }

    fn command(user_id: &str) -> UpdateSubscriptionCommand {
        UpdateSubscriptionCommand {
            user_id: user_id.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn updates_only_given_fields() {
        let repo = seeded();
        let handler = UpdateSubscriptionHandler::new(repo.clone());

        let cmd = UpdateSubscriptionCommand {
            price: Some(1299),
            end_date: Some("12-2024".to_string()),
            ..command("u1")
        };
        handler.handle(cmd).await.unwrap();

        let rows = repo.rows().await;
        assert_eq!(rows[0].service_name(), "Netflix");
        assert_eq!(rows[0].price(), 1299);
        assert_eq!(rows[0].start_date().to_string(), "01-2024");
        assert_eq!(rows[0].end_date().map(|d| d.to_string()).as_deref(), Some("12-2024"));
    }

    #[tokio::test]
    async fn price_can_be_reset_to_zero() {
        let repo = seeded();
        let handler = UpdateSubscriptionHandler::new(repo.clone());

        let cmd = UpdateSubscriptionCommand {
            price: Some(0),
            ..command("u1")
        };
        handler.handle(cmd).await.unwrap();

        assert_eq!(repo.rows().await[0].price(), 0);
    }

    #[tokio::test]
    async fn empty_update_is_a_successful_no_op() {
        let repo = seeded();
        let handler = UpdateSubscriptionHandler::new(repo.clone());

        let cmd = UpdateSubscriptionCommand {
            service_name: Some(String::new()),
            start_date: Some(String::new()),
            ..command("u1")
        };
        handler.handle(cmd).await.unwrap();

        assert_eq!(repo.last_patch(), Some(SubscriptionPatch::default()));
        assert_eq!(repo.rows().await[0].price(), 999);
    }

    #[tokio::test]
    async fn inverted_range_fails_without_persisting() {
        let repo = seeded();
        let handler = UpdateSubscriptionHandler::new(repo.clone());

        let cmd = UpdateSubscriptionCommand {
            start_date: Some("06-2024".to_string()),
            end_date: Some("01-2024".to_string()),
            ..command("u1")
        };
        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(SubscriptionError::InvalidRange { .. })));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_user_reports_no_rows_affected() {
        let repo = seeded();
        let handler = UpdateSubscriptionHandler::new(repo);

        let cmd = UpdateSubscriptionCommand {
            service_name: Some("Hulu".to_string()),
            ..command("ghost")
        };
        let result = handler.handle(cmd).await;

        assert_eq!(
            result,
            Err(SubscriptionError::NoRowsAffected("ghost".to_string()))
        );
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn negative_price_is_rejected() {
        let repo = seeded();
        let handler = UpdateSubscriptionHandler::new(repo.clone());

        let cmd = UpdateSubscriptionCommand {
            price: Some(-5),
            ..command("u1")
        };
        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(SubscriptionError::Validation { .. })));
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn malformed_date_is_a_parse_error() {
        let repo = seeded();
        let handler = UpdateSubscriptionHandler::new(repo);

        let cmd = UpdateSubscriptionCommand {
            end_date: Some("13-2024".to_string()),
            ..command("u1")
        };
        let result = handler.handle(cmd).await;

        assert!(matches!(
            result,
            Err(SubscriptionError::Parse { field: "end_date", .. })
        ));
    }
}
