//! Request types for the account service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request for creating a new user
#[derive(Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub age: u32,
    pub password: String,
}

impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("age", &self.age)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Username and submitted password for a login attempt
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
