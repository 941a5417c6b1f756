//! Input validation utilities.

use crate::types::AccountError;

pub const MAX_USERNAME_CHARS: usize = 64;
pub const MAX_NAME_CHARS: usize = 128;
/// Upper bound on password input so hashing cost stays bounded.
pub const MAX_PASSWORD_BYTES: usize = 1024;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), AccountError> {
    if username.trim().is_empty() {
        return Err(AccountError::Invalid("username cannot be empty".to_string()));
    }

    if username.trim() != username {
        return Err(AccountError::Invalid(
            "username cannot start or end with whitespace".to_string(),
        ));
    }

    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(AccountError::Invalid(format!(
            "username must be at most {MAX_USERNAME_CHARS} characters long"
        )));
    }

    if username.chars().any(char::is_control) {
        return Err(AccountError::Invalid(
            "username contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate password length requirements
pub fn validate_password(password: &str, min_length: usize) -> Result<(), AccountError> {
    if password.is_empty() {
        return Err(AccountError::Invalid("password cannot be empty".to_string()));
    }

    if password.chars().count() < min_length {
        return Err(AccountError::Invalid(format!(
            "password must be at least {min_length} characters long"
        )));
    }

    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AccountError::Invalid(format!(
            "password must be at most {MAX_PASSWORD_BYTES} bytes long"
        )));
    }

    Ok(())
}

/// Validate display name. An empty name is allowed.
pub fn validate_name(name: &str) -> Result<(), AccountError> {
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(AccountError::Invalid(format!(
            "name must be at most {MAX_NAME_CHARS} characters long"
        )));
    }

    let disallowed_chars = ['\n', '\r', '\t', '\0'];
    if name.chars().any(|c| disallowed_chars.contains(&c)) {
        return Err(AccountError::Invalid(
            "name contains invalid characters".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(validate_username("ada").is_ok());
        assert!(validate_username("user_123").is_ok());
        assert!(validate_username("ユーザー").is_ok());

        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(" ada").is_err());
        assert!(validate_username("ada\n").is_err());
        assert!(validate_username("a".repeat(65).as_str()).is_err());
    }

    #[test]
    fn test_password_validation() {
        assert!(validate_password("s", 1).is_ok());
        assert!(validate_password("secret", 6).is_ok());

        assert!(validate_password("", 1).is_err());
        assert!(validate_password("short", 8).is_err());
        assert!(validate_password("a".repeat(1025).as_str(), 1).is_err());
    }

    #[test]
    fn test_name_validation() {
        assert!(validate_name("Ada Lovelace").is_ok());
        assert!(validate_name("").is_ok());

        assert!(validate_name("Ada\nLovelace").is_err());
        assert!(validate_name("a".repeat(129).as_str()).is_err());
    }

    #[test]
    fn test_errors_are_invalid_kind() {
        let error = validate_username("").unwrap_err();
        assert!(matches!(error, AccountError::Invalid(_)));
    }
}
