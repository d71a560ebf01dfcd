//! Data access error types.

use thiserror::Error;

/// Shown when an error response carries no usable message.
pub const DEFAULT_ERROR_MESSAGE: &str = "Erreur serveur";

/// Errors returned by backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    ///
    /// `message` comes from the body's `error` or `message` field, or is
    /// [`DEFAULT_ERROR_MESSAGE`].
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Human-readable message.
        message: String,
    },

    /// The backend could not be reached.
    #[error("connexion au serveur impossible: {0}")]
    Transport(String),

    /// A 2xx body did not have the expected shape.
    #[error("reponse invalide du serveur: {0}")]
    Decode(String),

    /// The HTTP client could not be built.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    /// HTTP status, for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend refused the session (401 or 403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
