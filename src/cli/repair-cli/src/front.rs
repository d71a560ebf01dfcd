//! Per-application routing of the terminal views.

use repair_auth::navigation::{portal_route_guard, staff_route_guard, Sidebar, PORTAL_ADMIN_PATH};
use repair_auth::{AccessGuard, ClientPortal, Realm, StaffConsole};
use repair_model::{Identity, PortalRole, StaffRole};

use crate::views;

/// Views the terminal front-end can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Machines,
    Machine,
    Clients,
    Navigation,
    Settings,
}

/// What differs between the client portal and the staff console.
pub trait Front: Realm {
    /// Product name shown in banners.
    const TITLE: &'static str;

    /// Whether machine lists cover the whole shop for every role.
    const SHOP_WIDE: bool;

    /// Route backing `view`, `None` when the application has no such view.
    fn route(view: View) -> Option<&'static str>;

    /// Guard protecting `path`.
    fn guard(path: &str) -> AccessGuard<Self::Role>;

    /// Navigation menu for `identity`.
    fn navigation(identity: &Identity<Self::Role>, portal_url: &str) -> String;
}

impl Front for ClientPortal {
    const TITLE: &'static str = "RepairTrack";
    const SHOP_WIDE: bool = false;

    fn route(view: View) -> Option<&'static str> {
        Some(match view {
            View::Dashboard | View::Machines | View::Navigation => "/dashboard",
            View::Machine => "/dashboard/machine",
            View::Clients => PORTAL_ADMIN_PATH,
            View::Settings => "/dashboard/settings",
        })
    }

    fn guard(path: &str) -> AccessGuard<PortalRole> {
        portal_route_guard(path)
    }

    fn navigation(identity: &Identity<PortalRole>, _portal_url: &str) -> String {
        views::portal_navigation(identity)
    }
}

impl Front for StaffConsole {
    const TITLE: &'static str = "RepairSys";
    const SHOP_WIDE: bool = true;

    fn route(view: View) -> Option<&'static str> {
        match view {
            View::Dashboard | View::Navigation => Some("/dashboard"),
            View::Machines | View::Machine => Some("/dashboard/machines"),
            View::Clients => Some("/dashboard/clients"),
            View::Settings => None,
        }
    }

    fn guard(path: &str) -> AccessGuard<StaffRole> {
        staff_route_guard(path)
    }

    fn navigation(identity: &Identity<StaffRole>, portal_url: &str) -> String {
        views::sidebar(&Sidebar::for_identity(identity, portal_url))
    }
}
