//! Password change form.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::ValidationError;

/// Minimum length of a new password, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A password change that passed client-side validation.
///
/// The only way to obtain one is [`PasswordChange::new`], so a request built
/// from it has already been checked. The backend may still reject it with
/// its own rules.
#[derive(Clone)]
pub struct PasswordChange {
    old_password: Zeroizing<String>,
    new_password: Zeroizing<String>,
    confirm_password: Zeroizing<String>,
}

impl PasswordChange {
    /// Validates the form: confirmation must match, then the new password
    /// must have at least [`MIN_PASSWORD_LEN`] characters.
    pub fn new(
        old_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<Self, ValidationError> {
        if old_password.is_empty() {
            return Err(ValidationError::MissingField("oldPassword"));
        }
        if new_password != confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(Self {
            old_password: Zeroizing::new(old_password.to_string()),
            new_password: Zeroizing::new(new_password.to_string()),
            confirm_password: Zeroizing::new(confirm_password.to_string()),
        })
    }

    /// Current password.
    pub fn old_password(&self) -> &str {
        &self.old_password
    }

    /// Requested password.
    pub fn new_password(&self) -> &str {
        &self.new_password
    }

    /// Confirmation, forwarded as typed.
    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordChange { .. }")
    }
}
