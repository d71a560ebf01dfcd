//! Dashboard statistics derived from fetched lists.

use crate::client::ClientRecord;
use crate::machine::{Machine, MachineStatus};

/// Counts machines in the given status.
pub fn count_status(machines: &[Machine], status: MachineStatus) -> usize {
    machines.iter().filter(|m| m.statut == status).count()
}

/// Per-status counters shown above the machine list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MachineStats {
    /// All machines.
    pub total: usize,
    /// Waiting for a technician.
    pub en_attente: usize,
    /// Being repaired.
    pub en_cours: usize,
    /// Repaired.
    pub termine: usize,
    /// With a detected problem.
    pub anomalie: usize,
}

impl MachineStats {
    /// Derives the counters from a machine list.
    pub fn from_machines(machines: &[Machine]) -> Self {
        Self {
            total: machines.len(),
            en_attente: count_status(machines, MachineStatus::EnAttente),
            en_cours: count_status(machines, MachineStatus::EnCours),
            termine: count_status(machines, MachineStatus::Termine),
            anomalie: count_status(machines, MachineStatus::Anomalie),
        }
    }
}

/// Admin overview of the whole shop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AdminStats {
    /// Registered clients.
    pub total_clients: usize,
    /// Clients with an enabled account.
    pub active_clients: usize,
    /// Machine counters.
    pub machines: MachineStats,
    /// Machines marked as paid.
    pub paid_machines: usize,
    /// Sum of amounts over paid machines, in FCFA.
    pub total_revenue: f64,
}

impl AdminStats {
    /// Derives the overview from the client and machine lists.
    pub fn compute(clients: &[ClientRecord], machines: &[Machine]) -> Self {
        let total_revenue = machines
            .iter()
            .filter(|m| m.paye)
            .filter_map(|m| m.montant)
            .sum();

        Self {
            total_clients: clients.len(),
            active_clients: clients.iter().filter(|c| c.active).count(),
            machines: MachineStats::from_machines(machines),
            paid_machines: machines.iter().filter(|m| m.paye).count(),
            total_revenue,
        }
    }
}
