//! Applies pending database migrations and exits.

use online_subs::adapters::postgres::{connect_pool, run_migrations};
use online_subs::config::AppConfig;
use online_subs::telemetry::init_tracing;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server)?;

    if let Err(e) = migrate(&config).await {
        tracing::error!(error = %e, "Migration failed");
        return Err(e);
    }
    Ok(())
}

async fn migrate(config: &AppConfig) -> Result<(), BoxError> {
    config.database.validate()?;

    let pool = connect_pool(&config.database).await?;
    run_migrations(&pool).await?;
    pool.close().await;
    Ok(())
}
