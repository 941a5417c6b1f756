//! Data access layer for the account service.
//!
//! [`UserStore`] is the seam between the service and storage. The SQLite
//! repository from `roster-database` and [`InMemoryUserStore`] both implement it.

pub mod memory;
pub mod user_store;

pub use memory::InMemoryUserStore;
pub use user_store::UserStore;
