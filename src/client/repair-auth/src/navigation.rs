//! Role-filtered navigation and per-route guards.

use repair_model::{Identity, PortalRole, StaffRole};

use crate::guard::{AccessGuard, ENTRY_PATH};

/// A sidebar entry of the staff console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Label.
    pub name: &'static str,
    /// Route.
    pub href: &'static str,
    /// Roles that see the entry and may enter the route.
    pub roles: &'static [StaffRole],
}

const ALL_STAFF: &[StaffRole] = &[StaffRole::Admin, StaffRole::Secretaire, StaffRole::Technicien];

/// Staff console sidebar, in display order.
pub const STAFF_NAVIGATION: &[NavItem] = &[
    NavItem {
        name: "Dashboard",
        href: "/dashboard",
        roles: ALL_STAFF,
    },
    NavItem {
        name: "Machines",
        href: "/dashboard/machines",
        roles: ALL_STAFF,
    },
    NavItem {
        name: "Clients",
        href: "/dashboard/clients",
        roles: &[StaffRole::Admin, StaffRole::Secretaire],
    },
    NavItem {
        name: "Utilisateurs",
        href: "/dashboard/users",
        roles: &[StaffRole::Admin],
    },
    NavItem {
        name: "Réparations",
        href: "/dashboard/repairs",
        roles: &[StaffRole::Technicien, StaffRole::Admin],
    },
];

/// Entries visible to `identity`; nothing when signed out.
pub fn visible_items(identity: Option<&Identity<StaffRole>>) -> Vec<&'static NavItem> {
    match identity {
        None => Vec::new(),
        Some(identity) => STAFF_NAVIGATION
            .iter()
            .filter(|item| identity.has_any_role(item.roles))
            .collect(),
    }
}

/// Guard for a staff console route. The entry point is public; unknown
/// routes only require a session.
pub fn staff_route_guard(path: &str) -> AccessGuard<StaffRole> {
    if path == ENTRY_PATH {
        return AccessGuard::public();
    }
    STAFF_NAVIGATION
        .iter()
        .find(|item| item.href == path)
        .map(|item| AccessGuard::roles(item.roles))
        .unwrap_or_else(AccessGuard::authenticated)
}

/// Client portal admin overview.
pub const PORTAL_ADMIN_PATH: &str = "/dashboard/admin";

/// Guard for a client portal route.
pub fn portal_route_guard(path: &str) -> AccessGuard<PortalRole> {
    if path == ENTRY_PATH {
        AccessGuard::public()
    } else if path == PORTAL_ADMIN_PATH {
        AccessGuard::roles(&[PortalRole::Admin])
    } else {
        AccessGuard::authenticated()
    }
}

/// The staff sidebar as rendered for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidebar {
    /// Visible entries.
    pub items: Vec<&'static NavItem>,
    /// "Prenom Nom".
    pub user_name: String,
    /// Avatar initials.
    pub initials: String,
    /// Role label.
    pub role: StaffRole,
    /// Link to the client portal (admins only).
    pub portal_link: Option<String>,
}

impl Sidebar {
    /// Builds the sidebar for `identity`.
    pub fn for_identity(identity: &Identity<StaffRole>, portal_url: &str) -> Self {
        Self {
            items: visible_items(Some(identity)),
            user_name: identity.display_name(),
            initials: identity.initials(),
            role: identity.role,
            portal_link: identity.is_admin().then(|| portal_url.to_string()),
        }
    }
}
