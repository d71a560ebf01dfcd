//! Session store.
//!
//! Single source of truth for who is signed in. Views hold the store by
//! handle (usually an `Arc`) and observe it through [`SessionStore::subscribe`].
//!
//! Every mutation replaces the whole [`SessionState`] at once, so observers
//! never see a half-updated identity.
//!
//! Verifications race with sign-in and sign-out. Each mutation takes a
//! ticket from a generation counter; a verify result is only adopted when
//! nothing else happened since it started, and the loading flag stays
//! raised while any [`SessionStore::initialize`] is still in flight.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use tokio::sync::watch;
use tracing::{debug, info};

use repair_model::{Credentials, Identity};

use crate::{AuthError, AuthGateway};

/// Snapshot of the session as seen by views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState<R> {
    /// The signed-in principal, if the backend vouched for one.
    pub identity: Option<Identity<R>>,
    /// True while the initial verification is in flight.
    pub is_loading: bool,
}

impl<R> SessionState<R> {
    /// State before the first verification: loading, nobody signed in.
    pub fn initial() -> Self {
        Self {
            identity: None,
            is_loading: true,
        }
    }

    /// Settled state holding `identity`.
    pub fn settled(identity: Option<Identity<R>>) -> Self {
        Self {
            identity,
            is_loading: false,
        }
    }

    /// Whether someone is signed in. Defined by the identity alone.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Holds the current identity and mediates every change to it.
pub struct SessionStore<G: AuthGateway> {
    gateway: G,
    state: watch::Sender<SessionState<G::Role>>,
    generation: AtomicU64,
    initializing: AtomicUsize,
}

impl<G: AuthGateway> SessionStore<G> {
    /// Creates a store in the initial loading state. Call
    /// [`SessionStore::initialize`] once the front-end mounts.
    pub fn new(gateway: G) -> Self {
        let (state, _) = watch::channel(SessionState::initial());
        Self {
            gateway,
            state,
            generation: AtomicU64::new(0),
            initializing: AtomicUsize::new(0),
        }
    }

    /// The gateway behind this store.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Current snapshot.
    pub fn state(&self) -> SessionState<G::Role> {
        self.state.borrow().clone()
    }

    /// Current identity.
    pub fn identity(&self) -> Option<Identity<G::Role>> {
        self.state.borrow().identity.clone()
    }

    /// Whether the initial verification is still running.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Whether someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Observes every change of state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState<G::Role>> {
        self.state.subscribe()
    }

    /// Mount hook: verifies the session against the backend.
    ///
    /// Re-invoking re-verifies and replaces the identity; nothing
    /// accumulates. A sign-in or sign-out landing while the check runs
    /// wins over its result.
    pub async fn initialize(&self) -> Option<Identity<G::Role>> {
        let mut ticket = 0;
        self.state.send_if_modified(|state| {
            self.initializing.fetch_add(1, Ordering::SeqCst);
            ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let was_loading = state.is_loading;
            state.is_loading = true;
            !was_loading
        });

        let verified = self.gateway.verify().await;
        debug!(
            gateway = self.gateway.name(),
            authenticated = verified.is_some(),
            "session initialized"
        );

        self.settle_verified(ticket, verified, true)
    }

    /// Background re-check: same as [`SessionStore::initialize`] but never
    /// raises the loading flag.
    pub async fn refresh(&self) -> Option<Identity<G::Role>> {
        let mut ticket = 0;
        self.state.send_if_modified(|_| {
            ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            false
        });

        let verified = self.gateway.verify().await;
        self.settle_verified(ticket, verified, false)
    }

    /// Signs in with a raw handle and password.
    ///
    /// On failure the current identity is left untouched and the error is
    /// returned to the caller.
    pub async fn login(
        &self,
        identifiant: &str,
        password: &str,
    ) -> Result<Identity<G::Role>, AuthError> {
        let credentials = Credentials::new(identifiant, password)?;
        self.login_with(&credentials).await
    }

    /// Signs in with already-collected credentials.
    pub async fn login_with(
        &self,
        credentials: &Credentials,
    ) -> Result<Identity<G::Role>, AuthError> {
        let identity = self.gateway.login(credentials).await?;
        self.adopt(Some(identity.clone()));
        Ok(identity)
    }

    /// Signs out.
    ///
    /// The backend call is best-effort; the local identity is cleared no
    /// matter how it went, so a flaky network can never leave the front-end
    /// signed in.
    pub async fn logout(&self) {
        self.gateway.logout().await;
        self.adopt(None);
        info!(gateway = self.gateway.name(), "local session cleared");
    }

    /// Unmount hook: drops the local identity without calling the backend.
    pub fn teardown(&self) {
        self.adopt(None);
    }

    /// Installs an identity decided by sign-in or sign-out. Outstanding
    /// verifications become stale.
    fn adopt(&self, identity: Option<Identity<G::Role>>) {
        self.state.send_if_modified(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            let next = SessionState {
                identity,
                is_loading: self.initializing.load(Ordering::SeqCst) > 0,
            };
            replace_with(state, next)
        });
    }

    /// Lands a verify result taken under `ticket` and returns the identity
    /// now held by the store.
    fn settle_verified(
        &self,
        ticket: u64,
        verified: Option<Identity<G::Role>>,
        initializing: bool,
    ) -> Option<Identity<G::Role>> {
        let mut current = None;
        self.state.send_if_modified(|state| {
            let pending = if initializing {
                self.initializing.fetch_sub(1, Ordering::SeqCst) - 1
            } else {
                self.initializing.load(Ordering::SeqCst)
            };

            let identity = if self.generation.load(Ordering::SeqCst) == ticket {
                verified
            } else {
                debug!(gateway = self.gateway.name(), "stale verification discarded");
                state.identity.clone()
            };
            current = identity.clone();

            let next = SessionState {
                identity,
                is_loading: pending > 0,
            };
            replace_with(state, next)
        });
        current
    }

    #[cfg(test)]
    fn replace(&self, next: SessionState<G::Role>) {
        self.state.send_if_modified(|state| replace_with(state, next));
    }
}

/// Swaps in `next`, reporting whether anything changed. Observers are only
/// notified on an actual change; the swap works with no observers left.
fn replace_with<R: PartialEq>(state: &mut SessionState<R>, next: SessionState<R>) -> bool {
    if *state == next {
        return false;
    }
    *state = next;
    true
}
