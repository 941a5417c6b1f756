//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database query error: {0}")]
    QueryError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),
}

impl DatabaseError {
    /// Classify a driver error, naming `entity` in duplicate/not-found cases.
    pub fn from_sqlx(error: sqlx::Error, entity: &str) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound(entity.to_string()),
            sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
                Self::Duplicate(entity.to_string())
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::ConnectionError(error.to_string()),
            other => Self::QueryError(other.to_string()),
        }
    }

    /// Whether the failure concerns reachability of the store rather than a query.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error = DatabaseError::from_sqlx(sqlx::Error::RowNotFound, "user");
        assert!(matches!(error, DatabaseError::NotFound(entity) if entity == "user"));
    }

    #[test]
    fn test_pool_failures_map_to_connection_errors() {
        assert!(DatabaseError::from_sqlx(sqlx::Error::PoolClosed, "user").is_connection_error());
        assert!(DatabaseError::from_sqlx(sqlx::Error::PoolTimedOut, "user").is_connection_error());
    }

    #[test]
    fn test_other_failures_map_to_query_errors() {
        let error = DatabaseError::from_sqlx(sqlx::Error::ColumnNotFound("age".into()), "user");
        assert!(matches!(error, DatabaseError::QueryError(_)));
    }
}
