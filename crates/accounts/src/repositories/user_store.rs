//! The persistence collaborator consumed by the account service.

use std::future::Future;

use chrono::{DateTime, Utc};
use roster_database::{DatabaseResult, NewUser, User, UserRepository, UserSummary};

/// Storage operations the account service depends on.
///
/// Implementations own id and timestamp assignment and must enforce username
/// uniqueness atomically, reporting a clash as `DatabaseError::Duplicate`.
pub trait UserStore: Send + Sync {
    /// Insert one user and return the assigned id.
    fn insert(&self, user: &NewUser) -> impl Future<Output = DatabaseResult<i64>> + Send;

    /// Every user in id order, without credentials.
    fn list(&self) -> impl Future<Output = DatabaseResult<Vec<UserSummary>>> + Send;

    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = DatabaseResult<Option<User>>> + Send;

    fn find_by_id(&self, id: i64) -> impl Future<Output = DatabaseResult<Option<User>>> + Send;

    /// Stamp `at` as the user's last login (and last update).
    fn touch_last_login(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> impl Future<Output = DatabaseResult<()>> + Send;
}

impl UserStore for UserRepository {
    async fn insert(&self, user: &NewUser) -> DatabaseResult<i64> {
        self.create(user).await
    }

    async fn list(&self) -> DatabaseResult<Vec<UserSummary>> {
        UserRepository::list(self).await
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        UserRepository::find_by_username(self, username).await
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        UserRepository::find_by_id(self, id).await
    }

    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> DatabaseResult<()> {
        self.update_last_login(id, at).await
    }
}
