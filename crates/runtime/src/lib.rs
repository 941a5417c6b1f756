use std::sync::Arc;

use anyhow::{Context, Result};
use roster_accounts::{AccountService, UserRepository};
use roster_config::AppConfig;
use roster_database::initialize_database;
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct AccountServices {
    pub db_pool: SqlitePool,
    pub accounts: Arc<AccountService<UserRepository>>,
}

impl AccountServices {
    /// Open the database, apply migrations, and build the account service.
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        config.validate().context("invalid configuration")?;

        let db_pool = initialize_database(&config.database)
            .await
            .context("failed to initialise database")?;

        let accounts = Arc::new(AccountService::sqlite(
            db_pool.clone(),
            config.accounts.clone(),
        ));

        info!(
            reveal_unknown_accounts = config.accounts.reveal_unknown_accounts,
            record_last_login = config.accounts.record_last_login,
            "account service ready"
        );

        Ok(Self { db_pool, accounts })
    }

    pub async fn shutdown(self) {
        self.db_pool.close().await;
        info!("database pool closed");
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
        return std::future::pending().await;
    }
    info!("shutdown signal received");
}

/// Token that fires when the process receives ctrl-c.
pub fn cancel_on_shutdown() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        trigger.cancel();
    });
    token
}
