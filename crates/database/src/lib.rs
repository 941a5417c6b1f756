//! Roster Database Crate
//!
//! This crate provides database functionality for the Roster account service,
//! including connection management, migrations, and the user repository.

use sqlx::SqlitePool;
use roster_config::DatabaseConfig;

pub mod connection;
pub mod migrations;
pub mod repos;
pub mod entities;
pub mod types;

pub use connection::prepare_database;
pub use migrations::run_migrations;

pub use repos::UserRepository;

pub use entities::user::{NewUser, User, UserSummary};

pub use types::{errors::DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
