//! Shared types for the account service.
//!
//! Error taxonomy, request value objects, and the response envelope that
//! transport layers serialize.

pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::{AccountError, AccountResult, ErrorKind};
pub use requests::{CreateUserRequest, LoginRequest};
pub use responses::MessageResponse;
