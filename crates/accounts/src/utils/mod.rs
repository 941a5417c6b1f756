//! Internal utilities for the account service.

pub mod password;
pub mod validation;

pub use password::*;
pub use validation::*;
