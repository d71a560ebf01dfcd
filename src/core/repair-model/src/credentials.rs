//! Login form input.

use std::fmt;

use zeroize::Zeroizing;

use crate::error::ValidationError;

/// Login handle and password, as typed into the sign-in form.
///
/// The password is wiped from memory when the value is dropped.
#[derive(Clone)]
pub struct Credentials {
    identifiant: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Builds credentials; both fields are required.
    pub fn new(identifiant: &str, password: &str) -> Result<Self, ValidationError> {
        let identifiant = identifiant.trim();
        if identifiant.is_empty() {
            return Err(ValidationError::MissingField("identifiant"));
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }

        Ok(Self {
            identifiant: identifiant.to_string(),
            password: Zeroizing::new(password.to_string()),
        })
    }

    /// Login handle: a client identifier (`CLT-00001`) or an email.
    pub fn identifiant(&self) -> &str {
        &self.identifiant
    }

    /// Plain password, for the request body only.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifiant", &self.identifiant)
            .field("password", &"<redacted>")
            .finish()
    }
}
