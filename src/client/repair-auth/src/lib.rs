//! # RepairSys Auth
//!
//! Client-side session model for the client portal and the staff console.
//!
//! ## Components
//!
//! - [`AuthGateway`] - the only code allowed to make identity-affecting
//!   calls (verify, login, logout)
//! - [`SessionStore`] - who is signed in, observable by every view
//! - [`AccessGuard`] / [`GuardedRoute`] - render-or-redirect decisions
//! - [`navigation`] - role-filtered menus and route guards

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod gateway;
pub mod guard;
pub mod http;
pub mod navigation;
pub mod realm;
pub mod session;

pub use error::AuthError;
pub use gateway::AuthGateway;
pub use guard::{AccessGuard, GuardState, GuardedRoute, Redirect, Transition};
pub use http::HttpAuthGateway;
pub use realm::{ClientPortal, Realm, StaffConsole};
pub use session::{SessionState, SessionStore};

/// Session store of the client portal.
pub type PortalSession = SessionStore<HttpAuthGateway<ClientPortal>>;

/// Session store of the staff console.
pub type StaffSession = SessionStore<HttpAuthGateway<StaffConsole>>;
