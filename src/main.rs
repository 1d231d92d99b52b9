//! Online Subs HTTP server.

use std::sync::Arc;

use online_subs::adapters::http::{app_router, SubscriptionHandlers};
use online_subs::adapters::postgres::{connect_pool, run_migrations};
use online_subs::adapters::PostgresSubscriptionRepository;
use online_subs::config::AppConfig;
use online_subs::telemetry::init_tracing;
use tracing::info;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server)?;

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e);
    }
    Ok(())
}

async fn run(config: AppConfig) -> Result<(), BoxError> {
    config.validate()?;
    info!(
        environment = ?config.server.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Configuration loaded"
    );

    let pool = connect_pool(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }

    let repository = Arc::new(PostgresSubscriptionRepository::new(pool.clone()));
    let app = app_router(SubscriptionHandlers::new(repository), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
