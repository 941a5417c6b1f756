//! Password hashing and verification utilities.

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use once_cell::sync::Lazy;

/// Hash verified when the account does not exist, so both login failure paths
/// pay for one Argon2 run.
pub(crate) static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| hash_password("roster-dummy-credential").ok());

/// Hash a password using Argon2 with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against its PHC hash string.
///
/// Returns `Ok(false)` on mismatch and `Err` only when `hash` is not a
/// parseable PHC string.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other),
    }
}

/// Build the throwaway hash up front so the first unknown-user login costs
/// the same as any other.
pub fn prepare_dummy_hash() {
    let _ = Lazy::force(&DUMMY_HASH);
}

/// Burn one verification against a throwaway hash. Always reports a mismatch.
pub fn verify_dummy(password: &str) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
    false
}
