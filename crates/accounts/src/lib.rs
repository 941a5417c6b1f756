//! # Roster Accounts Crate
//!
//! This crate owns the user account lifecycle and login checks for Roster.
//! It contains the account service, the storage seam it depends on, and the
//! error taxonomy transport layers map onto responses.
//!
//! ## Architecture
//!
//! - **Services**: [`AccountService`], the business logic layer
//! - **Repositories**: the [`UserStore`] trait and its implementations
//! - **Types**: errors, request value objects, the response envelope
//! - **Utils**: password hashing and input validation
//!
//! ## Usage
//!
//! ```no_run
//! use roster_accounts::{AccountService, CreateUserRequest, LoginRequest};
//! use roster_config::AccountsConfig;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run(pool: sqlx::SqlitePool) -> Result<(), roster_accounts::AccountError> {
//! let service = AccountService::sqlite(pool, AccountsConfig::default());
//! let cancel = CancellationToken::new();
//!
//! let request = CreateUserRequest {
//!     name: "Ada".into(),
//!     username: "ada".into(),
//!     age: 30,
//!     password: "secret".into(),
//! };
//! service.create_user(&request, &cancel).await?;
//! let user = service
//!     .authenticate(&LoginRequest::new("ada", "secret"), &cancel)
//!     .await?;
//! # let _ = user;
//! # Ok(())
//! # }
//! ```

pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;

pub use roster_database::{NewUser, User, UserRepository, UserSummary};

pub use repositories::{InMemoryUserStore, UserStore};
pub use services::AccountService;
pub use types::{
    AccountError, AccountResult, CreateUserRequest, ErrorKind, LoginRequest, MessageResponse,
};
