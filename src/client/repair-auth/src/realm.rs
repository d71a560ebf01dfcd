//! Which front-end a gateway speaks for.

use repair_api::paths;
use repair_model::{AccessRole, PortalRole, StaffRole};

/// Per-application login contract.
///
/// Both front-ends share the verify and logout endpoints but log in through
/// different routes with different handle fields.
pub trait Realm: Send + Sync + 'static {
    /// Role enum of the application.
    type Role: AccessRole;

    /// Name used in logs.
    const NAME: &'static str;

    /// Login route.
    const LOGIN_PATH: &'static str;

    /// JSON field carrying the login handle.
    const HANDLE_FIELD: &'static str;

    /// Whether a verified profile without `identifiant` uses the email as
    /// its handle.
    const HANDLE_FALLS_BACK_TO_EMAIL: bool;
}

/// The customer-facing portal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientPortal;

impl Realm for ClientPortal {
    type Role = PortalRole;

    const NAME: &'static str = "client-portal";
    const LOGIN_PATH: &'static str = paths::CLIENT_LOGIN;
    const HANDLE_FIELD: &'static str = "identifiant";
    const HANDLE_FALLS_BACK_TO_EMAIL: bool = true;
}

/// The staff management console.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaffConsole;

impl Realm for StaffConsole {
    type Role = StaffRole;

    const NAME: &'static str = "staff-console";
    const LOGIN_PATH: &'static str = paths::STAFF_LOGIN;
    const HANDLE_FIELD: &'static str = "email";
    const HANDLE_FALLS_BACK_TO_EMAIL: bool = false;
}
