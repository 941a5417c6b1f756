//! User entity definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity representing an account in the system.
///
/// `password` holds the stored credential (a PHC hash string). It is readable
/// for credential checks but never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub age: u32,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_time_stamp: Option<DateTime<Utc>>,
}

impl User {
    /// Project the user onto the list shape, dropping the credential.
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            age: self.age,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Row shape used when enumerating users. Carries no credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub age: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields written on insert. Id and timestamps are assigned by the store.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub age: u32,
    pub password_hash: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("age", &self.age)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: 7,
            name: "Ada".to_string(),
            username: "ada".to_string(),
            age: 30,
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            created_at: now,
            updated_at: now,
            last_login_time_stamp: None,
        }
    }

    #[test]
    fn test_user_serialization_omits_password() {
        let json = serde_json::to_value(sample_user()).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "ada");
        assert_eq!(json["age"], 30);
    }

    #[test]
    fn test_summary_copies_public_fields() {
        let user = sample_user();
        let summary = user.summary();

        assert_eq!(summary.id, user.id);
        assert_eq!(summary.name, user.name);
        assert_eq!(summary.username, user.username);
        assert_eq!(summary.created_at, user.created_at);
    }

    #[test]
    fn test_new_user_debug_redacts_hash() {
        let new_user = NewUser {
            name: "Ada".to_string(),
            username: "ada".to_string(),
            age: 30,
            password_hash: "secret-hash".to_string(),
        };

        let rendered = format!("{new_user:?}");
        assert!(!rendered.contains("secret-hash"));
        assert!(rendered.contains("<redacted>"));
    }
}
