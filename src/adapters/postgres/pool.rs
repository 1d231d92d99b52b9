//! Connection pool bootstrap and schema migrations.

use sqlx::migrate::MigrateError;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::DatabaseConfig;

/// Builds the pool, retrying the first connection with a fixed pause.
///
/// Gives up after `connect_attempts` failures and returns the last error.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let options = PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(Some(config.idle_timeout()))
        .max_lifetime(Some(config.max_lifetime()));

    let attempts = config.connect_attempts.max(1);
    let mut attempt = 1;
    loop {
        match options.clone().connect(&config.url).await {
            Ok(pool) => {
                tracing::info!(attempt, "Connected to PostgreSQL");
                return Ok(pool);
            }
            Err(e) if attempt < attempts => {
                tracing::warn!(
                    attempt,
                    attempts,
                    error = %e,
                    "Database not reachable yet, retrying"
                );
                tokio::time::sleep(config.connect_retry_delay()).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(attempts, error = %e, "Giving up connecting to PostgreSQL");
                return Err(e);
            }
        }
    }
}

/// Applies the embedded migrations from `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}
