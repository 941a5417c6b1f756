//! In-process user store backed by ordered maps.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use roster_database::{DatabaseError, DatabaseResult, NewUser, User, UserSummary};
use tokio::sync::RwLock;

use super::UserStore;

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    username_index: HashMap<String, i64>,
    last_id: i64,
}

/// User store that keeps everything in memory.
///
/// Ids increase monotonically and are never handed out twice. Cloning shares
/// the same underlying tables.
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl UserStore for InMemoryUserStore {
    async fn insert(&self, user: &NewUser) -> DatabaseResult<i64> {
        let mut tables = self.tables.write().await;

        if tables.username_index.contains_key(&user.username) {
            return Err(DatabaseError::Duplicate("user".to_string()));
        }

        tables.last_id += 1;
        let id = tables.last_id;
        let now = Utc::now();

        tables.users.insert(
            id,
            User {
                id,
                name: user.name.clone(),
                username: user.username.clone(),
                age: user.age,
                password: user.password_hash.clone(),
                created_at: now,
                updated_at: now,
                last_login_time_stamp: None,
            },
        );
        tables.username_index.insert(user.username.clone(), id);

        Ok(id)
    }

    async fn list(&self) -> DatabaseResult<Vec<UserSummary>> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().map(User::summary).collect())
    }

    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .username_index
            .get(username)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> DatabaseResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn touch_last_login(&self, id: i64, at: DateTime<Utc>) -> DatabaseResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound("user".to_string()))?;

        user.last_login_time_stamp = Some(at);
        user.updated_at = at;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            username: username.to_string(),
            age: 41,
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = InMemoryUserStore::new();

        let first = store.insert(&new_user("a")).await.unwrap();
        let second = store.insert(&new_user("b")).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_leaves_store_untouched() {
        let store = InMemoryUserStore::new();
        store.insert(&new_user("a")).await.unwrap();

        let mut clash = new_user("a");
        clash.age = 99;
        let result = store.insert(&clash).await;

        assert!(matches!(result, Err(DatabaseError::Duplicate(_))));
        assert_eq!(store.len().await, 1);
        assert_eq!(store.find_by_username("a").await.unwrap().unwrap().age, 41);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryUserStore::new();
        let clone = store.clone();

        store.insert(&new_user("a")).await.unwrap();

        assert!(!clone.is_empty().await);
        assert!(clone.find_by_id(1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_touch_last_login() {
        let store = InMemoryUserStore::new();
        let id = store.insert(&new_user("a")).await.unwrap();
        let at = Utc::now();

        store.touch_last_login(id, at).await.unwrap();
        let user = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.last_login_time_stamp, Some(at));

        let missing = store.touch_last_login(id + 1, at).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound(_))));
    }
}
