//! Authentication error types.

use thiserror::Error;

use repair_model::ValidationError;

/// Shown when a rejected login carries no message.
pub const DEFAULT_LOGIN_ERROR: &str = "Identifiant ou mot de passe incorrect";

/// Errors surfaced by login.
///
/// Verify and logout never produce these; their failures are absorbed.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Backend rejected the credentials. Carries the backend's message or
    /// [`DEFAULT_LOGIN_ERROR`].
    #[error("{0}")]
    InvalidCredentials(String),

    /// Backend unreachable.
    #[error("connexion au serveur impossible: {0}")]
    Transport(String),

    /// The account exists but its role has no place in this application.
    #[error("ce compte ({0}) n'a pas acces a cette application")]
    RoleNotAllowed(String),

    /// Login succeeded but the profile could not be read.
    #[error("reponse de connexion invalide: {0}")]
    UnexpectedResponse(String),

    /// The form was incomplete.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
