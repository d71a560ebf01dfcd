//! Local filtering of fetched lists.

use std::fmt;
use std::str::FromStr;

use crate::client::ClientRecord;
use crate::error::ValidationError;
use crate::machine::{Machine, MachineStatus};

/// Status selector above the machine list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every status.
    #[default]
    All,
    /// A single status.
    Only(MachineStatus),
}

impl StatusFilter {
    /// Whether `status` passes the filter.
    pub fn accepts(&self, status: MachineStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => fmt::Display::fmt(status, f),
        }
    }
}

/// Search box plus status selector of the machine dashboard.
#[derive(Debug, Clone, Default)]
pub struct MachineFilter {
    /// Free-text query; empty matches everything.
    pub search: String,
    /// Status selector.
    pub status: StatusFilter,
    /// Also match owner names (admin viewers).
    pub include_client_names: bool,
}

impl MachineFilter {
    /// Whether `machine` is shown.
    pub fn matches(&self, machine: &Machine) -> bool {
        self.status.accepts(machine.statut) && self.matches_search(machine)
    }

    /// Filtered view, preserving order.
    pub fn apply<'a>(&self, machines: &'a [Machine]) -> Vec<&'a Machine> {
        machines.iter().filter(|m| self.matches(m)).collect()
    }

    /// Whether any criterion is set.
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || self.status != StatusFilter::All
    }

    fn matches_search(&self, machine: &Machine) -> bool {
        let query = self.search.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        let hit = |field: &str| field.to_lowercase().contains(&query);

        hit(&machine.marque)
            || hit(&machine.modele)
            || hit(&machine.defaut)
            || machine.numero_serie.as_deref().is_some_and(hit)
            || (self.include_client_names
                && (hit(&machine.client.nom) || hit(&machine.client.prenom)))
    }
}

/// Clients whose name, email or identifier contains `query`, case-insensitively.
pub fn search_clients<'a>(clients: &'a [ClientRecord], query: &str) -> Vec<&'a ClientRecord> {
    let query = query.trim().to_lowercase();
    clients
        .iter()
        .filter(|c| {
            query.is_empty()
                || [&c.nom, &c.prenom, &c.email, &c.identifiant]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}
