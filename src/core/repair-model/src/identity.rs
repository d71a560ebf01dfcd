//! Authenticated principal and role types.
//!
//! The two front-ends share one backend but gate on different role sets, so
//! [`Identity`] is generic over the application's role enum.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A closed set of capability classes for one application.
pub trait AccessRole:
    Copy + Eq + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Every role of the application, in display order.
    const ALL: &'static [Self];

    /// Wire name as sent by the backend (e.g. `"ADMIN"`).
    fn as_str(&self) -> &'static str;

    /// Whether this role sees every record rather than its own scope.
    fn is_admin(&self) -> bool;

    /// Parses a wire name, rejecting roles this application does not know.
    fn parse(name: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ValidationError::UnknownRole(name.to_string()))
    }
}

/// Roles of the staff management console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    /// Full access, including user management.
    Admin,
    /// Front desk: machines and clients.
    Secretaire,
    /// Workshop: machines and repairs.
    Technicien,
}

impl AccessRole for StaffRole {
    const ALL: &'static [Self] = &[Self::Admin, Self::Secretaire, Self::Technicien];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Secretaire => "SECRETAIRE",
            Self::Technicien => "TECHNICIEN",
        }
    }

    fn is_admin(&self) -> bool {
        *self == Self::Admin
    }
}

/// Roles of the client portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PortalRole {
    /// Shop administrator browsing the portal; sees all machines.
    Admin,
    /// A customer; sees only their own machines.
    Client,
}

impl AccessRole for PortalRole {
    const ALL: &'static [Self] = &[Self::Admin, Self::Client];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Client => "CLIENT",
        }
    }

    fn is_admin(&self) -> bool {
        *self == Self::Admin
    }
}

impl PortalRole {
    /// Label shown on the account page.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrateur",
            Self::Client => "Client",
        }
    }
}

macro_rules! role_display_and_parse {
    ($($role:ty),*) => {$(
        impl fmt::Display for $role {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $role {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$role as AccessRole>::parse(s)
            }
        }
    )*};
}

role_display_and_parse!(StaffRole, PortalRole);

/// The authenticated principal, as vouched for by the backend.
///
/// Only ever built from a successful login or verify response; the client
/// never fabricates one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity<R> {
    /// Stable account id.
    pub id: i64,
    /// Last name.
    pub nom: String,
    /// First name.
    pub prenom: String,
    /// Email address.
    pub email: String,
    /// Login handle (client portal accounts only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifiant: Option<String>,
    /// Capability class.
    pub role: R,
}

impl<R: AccessRole> Identity<R> {
    /// "Prenom Nom", as shown in headers and the sidebar.
    pub fn display_name(&self) -> String {
        match (self.prenom.is_empty(), self.nom.is_empty()) {
            (false, false) => format!("{} {}", self.prenom, self.nom),
            (false, true) => self.prenom.clone(),
            (true, false) => self.nom.clone(),
            (true, true) => self.email.clone(),
        }
    }

    /// Two-letter avatar initials: first letter of `nom`, then of `prenom`.
    pub fn initials(&self) -> String {
        self.nom
            .chars()
            .next()
            .into_iter()
            .chain(self.prenom.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Whether the identity holds one of `roles`.
    pub fn has_any_role(&self, roles: &[R]) -> bool {
        roles.contains(&self.role)
    }

    /// Whether this identity sees every record.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
