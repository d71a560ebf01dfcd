//! Access guard.
//!
//! Decides whether a protected region renders, shows a loader, or sends the
//! user elsewhere. Redirects are returned as values for the caller's router
//! to carry out; the guard itself never navigates.

use repair_model::{AccessRole, Identity};

use crate::session::SessionState;

/// Public entry point (the login view).
pub const ENTRY_PATH: &str = "/";

/// Default landing area for signed-in users.
pub const LANDING_PATH: &str = "/dashboard";

/// Outcome of evaluating a guard against a session snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Initial verification running: show a neutral loader.
    Checking,
    /// Nobody signed in: go to the entry point.
    Unauthenticated,
    /// Signed in with a role outside the allowed set: go to the landing area.
    Forbidden,
    /// Render the protected region.
    Authorized,
}

impl GuardState {
    /// Whether the protected region renders.
    pub fn renders_children(&self) -> bool {
        *self == Self::Authorized
    }

    /// Whether a loading indicator is shown instead.
    pub fn shows_loader(&self) -> bool {
        *self == Self::Checking
    }
}

/// Navigation the router should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Target path.
    pub to: String,
}

/// Render-or-redirect policy for one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard<R> {
    public: bool,
    required_roles: Option<Vec<R>>,
    entry_path: String,
    landing_path: String,
}

impl<R: AccessRole> AccessGuard<R> {
    /// Any signed-in user may enter.
    pub fn authenticated() -> Self {
        Self {
            public: false,
            required_roles: None,
            entry_path: ENTRY_PATH.to_string(),
            landing_path: LANDING_PATH.to_string(),
        }
    }

    /// Anyone may enter, signed in or not (the entry point itself).
    pub fn public() -> Self {
        Self {
            public: true,
            ..Self::authenticated()
        }
    }

    /// Whether the region needs no session at all.
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Only users holding one of `roles` may enter.
    pub fn roles(roles: &[R]) -> Self {
        Self {
            required_roles: Some(roles.to_vec()),
            ..Self::authenticated()
        }
    }

    /// Overrides the entry point used for unauthenticated users.
    pub fn with_entry(mut self, path: impl Into<String>) -> Self {
        self.entry_path = path.into();
        self
    }

    /// Overrides the landing area used for forbidden users.
    pub fn with_landing(mut self, path: impl Into<String>) -> Self {
        self.landing_path = path.into();
        self
    }

    /// Allowed roles, `None` when unrestricted.
    pub fn required_roles(&self) -> Option<&[R]> {
        self.required_roles.as_deref()
    }

    /// Whether `identity`'s role passes the restriction.
    pub fn permits(&self, identity: &Identity<R>) -> bool {
        match &self.required_roles {
            None => true,
            Some(roles) => identity.has_any_role(roles),
        }
    }

    /// Pure evaluation against a snapshot.
    pub fn evaluate(&self, session: &SessionState<R>) -> GuardState {
        if self.public {
            return GuardState::Authorized;
        }
        if session.is_loading {
            return GuardState::Checking;
        }
        match &session.identity {
            None => GuardState::Unauthenticated,
            Some(identity) if self.permits(identity) => GuardState::Authorized,
            Some(_) => GuardState::Forbidden,
        }
    }

    /// Where `state` sends the user, if anywhere.
    pub fn redirect_for(&self, state: GuardState) -> Option<Redirect> {
        let to = match state {
            GuardState::Unauthenticated => &self.entry_path,
            GuardState::Forbidden => &self.landing_path,
            GuardState::Checking | GuardState::Authorized => return None,
        };
        Some(Redirect { to: to.clone() })
    }
}

/// Result of feeding a session change to a [`GuardedRoute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Current guard state.
    pub state: GuardState,
    /// Navigation to perform now, if any.
    pub redirect: Option<Redirect>,
}

/// A guard bound to the current navigation.
///
/// The role verdict is taken once per navigation and per identity, then
/// reused on later session changes, so a role update landing in the same
/// tick as a path change cannot bounce the user back and forth. A redirect
/// is emitted at most once per navigation.
#[derive(Debug, Clone)]
pub struct GuardedRoute<R> {
    guard: AccessGuard<R>,
    path: String,
    navigation: u64,
    role_verdict: Option<(i64, bool)>,
    redirected: bool,
    state: GuardState,
}

impl<R: AccessRole> GuardedRoute<R> {
    /// Enters `path` under `guard`.
    pub fn new(guard: AccessGuard<R>, path: impl Into<String>) -> Self {
        Self {
            guard,
            path: path.into(),
            navigation: 0,
            role_verdict: None,
            redirected: false,
            state: GuardState::Checking,
        }
    }

    /// Current path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Number of navigations since creation.
    pub fn navigation(&self) -> u64 {
        self.navigation
    }

    /// Last computed state.
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// The underlying policy.
    pub fn guard(&self) -> &AccessGuard<R> {
        &self.guard
    }

    /// Starts a new navigation to `path` under `guard`; verdict and
    /// redirect latch are reset.
    pub fn navigate(&mut self, path: impl Into<String>, guard: AccessGuard<R>) {
        self.path = path.into();
        self.guard = guard;
        self.navigation += 1;
        self.role_verdict = None;
        self.redirected = false;
        self.state = GuardState::Checking;
    }

    /// Re-evaluates after a session change.
    pub fn update(&mut self, session: &SessionState<R>) -> Transition {
        self.state = if self.guard.public {
            GuardState::Authorized
        } else if session.is_loading {
            GuardState::Checking
        } else {
            match &session.identity {
                None => {
                    self.role_verdict = None;
                    GuardState::Unauthenticated
                },
                Some(identity) => {
                    let permitted = match self.role_verdict {
                        Some((id, verdict)) if id == identity.id => verdict,
                        _ => {
                            let verdict = self.guard.permits(identity);
                            self.role_verdict = Some((identity.id, verdict));
                            verdict
                        },
                    };
                    if permitted {
                        GuardState::Authorized
                    } else {
                        GuardState::Forbidden
                    }
                },
            }
        };

        let redirect = if self.redirected {
            None
        } else {
            self.guard.redirect_for(self.state)
        };
        if redirect.is_some() {
            self.redirected = true;
        }

        Transition {
            state: self.state,
            redirect,
        }
    }

    /// Carries out `redirect` as the router: navigates to its target under
    /// the guard `guard_for` assigns to that path, then settles against
    /// `session`. Chained redirects are followed until the target stops
    /// changing.
    pub fn follow(
        &mut self,
        redirect: Redirect,
        session: &SessionState<R>,
        guard_for: impl Fn(&str) -> AccessGuard<R>,
    ) -> Transition {
        let mut target = redirect.to;
        loop {
            self.navigate(target.clone(), guard_for(&target));
            let transition = self.update(session);
            match &transition.redirect {
                Some(next) if next.to != target => target = next.to.clone(),
                _ => return transition,
            }
        }
    }
}
