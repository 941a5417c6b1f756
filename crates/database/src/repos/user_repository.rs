//! User repository for database operations.

use crate::entities::{NewUser, User, UserSummary};
use crate::types::{DatabaseError, DatabaseResult};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const ENTITY: &str = "user";

const USER_COLUMNS: &str =
    "id, name, username, age, password, created_at, updated_at, last_login_time_stamp";

const SUMMARY_COLUMNS: &str = "id, name, username, age, created_at, updated_at";

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a user and return the assigned ID.
    ///
    /// A taken username surfaces as [`DatabaseError::Duplicate`] through the
    /// unique index, so concurrent inserts of the same name cannot both land.
    pub async fn create(&self, new_user: &NewUser) -> DatabaseResult<i64> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (name, username, age, password, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&new_user.name)
        .bind(&new_user.username)
        .bind(new_user.age)
        .bind(&new_user.password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx(e, ENTITY))?;

        Ok(result.last_insert_rowid())
    }

    /// List all users in primary-key order, without credentials
    pub async fn list(&self) -> DatabaseResult<Vec<UserSummary>> {
        let rows = sqlx::query(&format!("SELECT {SUMMARY_COLUMNS} FROM users ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, ENTITY))?;

        rows.iter()
            .map(summary_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DatabaseError::from_sqlx(e, ENTITY))
    }

    /// Find user by username
    pub async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, ENTITY))?;

        row.as_ref()
            .map(user_from_row)
            .transpose()
            .map_err(|e| DatabaseError::from_sqlx(e, ENTITY))
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, ENTITY))?;

        row.as_ref()
            .map(user_from_row)
            .transpose()
            .map_err(|e| DatabaseError::from_sqlx(e, ENTITY))
    }

    /// Update user last login
    pub async fn update_last_login(&self, id: i64, at: DateTime<Utc>) -> DatabaseResult<()> {
        let result = sqlx::query(
            "UPDATE users SET last_login_time_stamp = ?, updated_at = ? WHERE id = ?",
        )
        .bind(at)
        .bind(at)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_sqlx(e, ENTITY))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(ENTITY.to_string()));
        }

        Ok(())
    }

    /// Get user count
    pub async fn count(&self) -> DatabaseResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DatabaseError::from_sqlx(e, ENTITY))
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        username: row.try_get("username")?,
        age: row.try_get("age")?,
        password: row.try_get("password")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        last_login_time_stamp: row.try_get("last_login_time_stamp")?,
    })
}

fn summary_from_row(row: &SqliteRow) -> Result<UserSummary, sqlx::Error> {
    Ok(UserSummary {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        username: row.try_get("username")?,
        age: row.try_get("age")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}
