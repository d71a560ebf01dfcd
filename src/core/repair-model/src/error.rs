//! Validation error types.

use thiserror::Error;

/// Errors raised by client-side validation.
///
/// Messages are user-facing and shown next to the form that produced them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// New password and its confirmation differ.
    #[error("Les mots de passe ne correspondent pas")]
    PasswordMismatch,

    /// New password is below the minimum length.
    #[error("Le nouveau mot de passe doit contenir au moins {min} caracteres")]
    PasswordTooShort {
        /// Minimum accepted length, in characters.
        min: usize,
    },

    /// A required form field was left empty.
    #[error("champ obligatoire: {0}")]
    MissingField(&'static str),

    /// Role name not known to this application.
    #[error("role inconnu: {0}")]
    UnknownRole(String),

    /// Machine status name not known.
    #[error("statut inconnu: {0}")]
    UnknownStatus(String),
}
