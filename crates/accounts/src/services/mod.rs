//! Business logic services for the account system.
//!
//! Services coordinate between stores and enforce the account rules.

pub mod account_service;

pub use account_service::AccountService;
