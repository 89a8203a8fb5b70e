//! Input validation for client accounts.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::roles::Role;

/// Maximum byte length of a given name or surname.
pub const MAX_NAME_LEN: usize = 500;

/// Minimum password length in bytes.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum password length in bytes.
pub const MAX_PASSWORD_LEN: usize = 72;

/// A name field must be present and at most [`MAX_NAME_LEN`] bytes.
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must be provided")));
    }
    if value.len() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must not be more than {MAX_NAME_LEN} bytes long"
        )));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("email must be provided".into()));
    }
    if !email.validate_email() {
        return Err(CoreError::Validation(
            "email must be a valid email address".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} bytes long"
        )));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "password must not be more than {MAX_PASSWORD_LEN} bytes long"
        )));
    }
    Ok(())
}

/// Parse a role name, rejecting anything outside the known set.
pub fn validate_role(role: &str) -> Result<Role, CoreError> {
    Role::parse(role).ok_or_else(|| CoreError::Validation(format!("unknown role '{role}'")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn name_required_and_bounded() {
        assert!(validate_name("fname", "Ada").is_ok());
        assert_matches!(validate_name("fname", "  "), Err(CoreError::Validation(_)));
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_matches!(validate_name("sname", &long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn email_must_be_well_formed() {
        assert!(validate_email("ada@example.com").is_ok());
        assert_matches!(validate_email(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_email("not-an-email"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn password_length_bounds() {
        assert_matches!(validate_password("short"), Err(CoreError::Validation(_)));
        assert!(validate_password("exactly8").is_ok());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_LEN)).is_ok());
        assert_matches!(
            validate_password(&"p".repeat(MAX_PASSWORD_LEN + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn role_must_be_known() {
        assert_eq!(validate_role("admin").unwrap(), Role::Admin);
        assert_matches!(validate_role("superuser"), Err(CoreError::Validation(_)));
    }
}
