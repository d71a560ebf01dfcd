//! Authentication gateway trait.

use async_trait::async_trait;

use repair_model::{AccessRole, Credentials, Identity};

use crate::AuthError;

/// Boundary for every identity-affecting backend call.
///
/// Implementations never attach or inspect a token; the transport carries
/// the session cookie on its own.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Role enum of the application this gateway serves.
    type Role: AccessRole;

    /// Asks the backend who the current session belongs to.
    ///
    /// No session, a rejected session and an unreachable backend all give
    /// `None`: absence of a session is an outcome, not an error.
    async fn verify(&self) -> Option<Identity<Self::Role>>;

    /// Opens a session and returns the profile the backend vouched for.
    async fn login(&self, credentials: &Credentials) -> Result<Identity<Self::Role>, AuthError>;

    /// Closes the session, best-effort. Failures are logged, never returned.
    async fn logout(&self);

    /// Returns the name of this gateway for logging/debugging.
    fn name(&self) -> &'static str;
}
