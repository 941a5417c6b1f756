//! Account service: user lifecycle and credential checks.

use std::future::Future;

use chrono::Utc;
use roster_config::AccountsConfig;
use roster_database::{DatabaseError, NewUser, User, UserRepository, UserSummary};
use sqlx::SqlitePool;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::repositories::{InMemoryUserStore, UserStore};
use crate::types::{AccountError, AccountResult, CreateUserRequest, LoginRequest};
use crate::utils::{
    hash_password, prepare_dummy_hash, validate_name, validate_password, validate_username,
    verify_dummy, verify_password,
};

/// Service for managing user accounts.
///
/// Holds no entity state of its own; every call goes to the store. Each
/// operation takes a [`CancellationToken`] and fails with
/// [`AccountError::Unavailable`] once it fires. Reads and hashing are
/// abandoned mid-flight; writes are only refused before they start, and a
/// write that has started is always reported with its real outcome.
pub struct AccountService<S> {
    store: S,
    config: AccountsConfig,
}

impl AccountService<UserRepository> {
    /// Create a service backed by the SQLite user repository
    pub fn sqlite(pool: SqlitePool, config: AccountsConfig) -> Self {
        Self::new(UserRepository::new(pool), config)
    }
}

impl AccountService<InMemoryUserStore> {
    /// Create a service backed by an empty in-memory store
    pub fn in_memory(config: AccountsConfig) -> Self {
        Self::new(InMemoryUserStore::new(), config)
    }
}

impl<S> AccountService<S>
where
    S: UserStore,
{
    pub fn new(store: S, config: AccountsConfig) -> Self {
        prepare_dummy_hash();
        Self { store, config }
    }

    pub fn config(&self) -> &AccountsConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a user and return the id assigned by the store.
    #[instrument(skip_all, fields(username = %request.username))]
    pub async fn create_user(
        &self,
        request: &CreateUserRequest,
        cancel: &CancellationToken,
    ) -> AccountResult<i64> {
        if let Err(error) = self.validate_create(request) {
            warn!(%error, "rejected user creation");
            return Err(error);
        }

        let password = request.password.clone();
        let password_hash = until_cancelled(cancel, blocking(move || hash_password(&password)))
            .await??
            .map_err(|error| {
                error!(%error, "password hashing failed");
                AccountError::Unavailable("password hashing failed".to_string())
            })?;

        let new_user = NewUser {
            name: request.name.clone(),
            username: request.username.clone(),
            age: request.age,
            password_hash,
        };

        ensure_active(cancel)?;
        let id = self.store.insert(&new_user).await.map_err(store_failure)?;

        info!(user_id = id, "user created");
        Ok(id)
    }

    /// All users in insertion order. Credentials are not part of the result.
    #[instrument(skip_all)]
    pub async fn list_users(&self, cancel: &CancellationToken) -> AccountResult<Vec<UserSummary>> {
        let users = until_cancelled(cancel, self.store.list())
            .await?
            .map_err(store_failure)?;

        debug!(count = users.len(), "users listed");
        Ok(users)
    }

    /// Get a user by exact username
    #[instrument(skip_all, fields(username = %username))]
    pub async fn get_user_by_username(
        &self,
        username: &str,
        cancel: &CancellationToken,
    ) -> AccountResult<User> {
        let user = until_cancelled(cancel, self.store.find_by_username(username))
            .await?
            .map_err(store_failure)?;

        found(user)
    }

    /// Get a user by ID
    #[instrument(skip_all, fields(user_id = id))]
    pub async fn get_user_by_id(&self, id: i64, cancel: &CancellationToken) -> AccountResult<User> {
        let user = until_cancelled(cancel, self.store.find_by_id(id))
            .await?
            .map_err(store_failure)?;

        found(user)
    }

    /// Check a login attempt and return the matching user.
    ///
    /// An unknown username and a wrong password both cost one Argon2
    /// verification and both fail with [`AccountError::Unauthorized`], unless
    /// `reveal_unknown_accounts` is set, in which case an unknown username is
    /// [`AccountError::NotFound`].
    #[instrument(skip_all, fields(username = %request.username))]
    pub async fn authenticate(
        &self,
        request: &LoginRequest,
        cancel: &CancellationToken,
    ) -> AccountResult<User> {
        let existing = until_cancelled(cancel, self.store.find_by_username(&request.username))
            .await?
            .map_err(store_failure)?;

        let password = request.password.clone();

        let Some(mut user) = existing else {
            until_cancelled(cancel, blocking(move || verify_dummy(&password))).await??;
            warn!("login attempt for unknown username");
            return Err(self.unknown_account());
        };

        let stored = user.password.clone();
        let verified =
            until_cancelled(cancel, blocking(move || verify_password(&password, &stored))).await??;

        match verified {
            Ok(true) => {}
            Ok(false) => {
                warn!(user_id = user.id, "password mismatch");
                return Err(AccountError::Unauthorized);
            }
            Err(error) => {
                error!(user_id = user.id, %error, "stored credential is not a valid hash");
                return Err(AccountError::Unauthorized);
            }
        }

        if self.config.record_last_login {
            let now = Utc::now();
            ensure_active(cancel)?;
            match self.store.touch_last_login(user.id, now).await {
                Ok(()) => {}
                Err(DatabaseError::NotFound(_)) => {
                    warn!(user_id = user.id, "user removed during login");
                    return Err(self.unknown_account());
                }
                Err(error) => return Err(store_failure(error)),
            }
            user.last_login_time_stamp = Some(now);
            user.updated_at = now;
        }

        debug!(user_id = user.id, "user authenticated");
        Ok(user)
    }

    /// Failure for a login naming an account that does not exist.
    fn unknown_account(&self) -> AccountError {
        if self.config.reveal_unknown_accounts {
            AccountError::NotFound("user".to_string())
        } else {
            AccountError::Unauthorized
        }
    }

    fn validate_create(&self, request: &CreateUserRequest) -> AccountResult<()> {
        validate_username(&request.username)?;
        validate_password(&request.password, self.config.min_password_length)?;
        validate_name(&request.name)?;
        Ok(())
    }
}

fn found(user: Option<User>) -> AccountResult<User> {
    match user {
        Some(user) => {
            debug!(user_id = user.id, "user fetched");
            Ok(user)
        }
        None => {
            debug!("user not found");
            Err(AccountError::NotFound("user".to_string()))
        }
    }
}

/// Log a store failure at a level matching its cause and map it into the taxonomy.
fn store_failure(error: DatabaseError) -> AccountError {
    match &error {
        DatabaseError::Duplicate(_) => warn!(%error, "username already taken"),
        DatabaseError::NotFound(_) => debug!(%error, "store reported missing row"),
        _ => error!(%error, "store request failed"),
    }
    error.into()
}

/// Refuse to start a write once the token has fired.
fn ensure_active(cancel: &CancellationToken) -> AccountResult<()> {
    if cancel.is_cancelled() {
        warn!("operation cancelled before write");
        return Err(AccountError::cancelled());
    }
    Ok(())
}

async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    future: F,
) -> AccountResult<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("operation cancelled");
            Err(AccountError::cancelled())
        }
        output = future => Ok(output),
    }
}

/// Run CPU-heavy credential work off the async workers.
async fn blocking<T, F>(work: F) -> AccountResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|error| {
        error!(%error, "credential worker failed");
        AccountError::Unavailable("credential check failed".to_string())
    })
}
