//! Machines under repair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Repair status of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineStatus {
    /// Waiting for a technician.
    EnAttente,
    /// Being repaired.
    EnCours,
    /// Repair done, ready for pickup.
    Termine,
    /// A problem was found; the shop will call the customer.
    Anomalie,
    /// Payment received.
    Paye,
    /// Handed back to the customer.
    RemisAuClient,
}

impl MachineStatus {
    /// All statuses, in declaration order.
    pub const ALL: [MachineStatus; 6] = [
        Self::EnAttente,
        Self::EnCours,
        Self::Termine,
        Self::Anomalie,
        Self::Paye,
        Self::RemisAuClient,
    ];

    /// The normal repair track. [`MachineStatus::Anomalie`] is off-track.
    pub const PROGRESS: [MachineStatus; 5] = [
        Self::EnAttente,
        Self::EnCours,
        Self::Termine,
        Self::Paye,
        Self::RemisAuClient,
    ];

    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnAttente => "EN_ATTENTE",
            Self::EnCours => "EN_COURS",
            Self::Termine => "TERMINE",
            Self::Anomalie => "ANOMALIE",
            Self::Paye => "PAYE",
            Self::RemisAuClient => "REMIS_AU_CLIENT",
        }
    }

    /// Short badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EnAttente => "En attente",
            Self::EnCours => "En cours",
            Self::Termine => "Termine",
            Self::Anomalie => "Anomalie",
            Self::Paye => "Paye",
            Self::RemisAuClient => "Remis",
        }
    }

    /// Heading used on the detail view.
    pub fn long_label(&self) -> &'static str {
        match self {
            Self::EnAttente => "En attente",
            Self::EnCours => "En cours de reparation",
            Self::Termine => "Reparation terminee",
            Self::Anomalie => "Anomalie detectee",
            Self::Paye => "Paiement effectue",
            Self::RemisAuClient => "Remis au client",
        }
    }

    /// Customer-facing explanation of the status.
    pub fn description(&self) -> &'static str {
        match self {
            Self::EnAttente => {
                "Votre machine est en attente de prise en charge par un technicien."
            },
            Self::EnCours => "Un technicien travaille actuellement sur votre machine.",
            Self::Termine => {
                "La reparation est terminee. Vous pouvez venir recuperer votre machine."
            },
            Self::Anomalie => {
                "Un probleme a ete detecte. Nous vous contacterons pour plus de details."
            },
            Self::Paye => "Le paiement a ete recu. Merci de votre confiance.",
            Self::RemisAuClient => "Votre machine vous a ete remise. Bonne utilisation!",
        }
    }

    /// Position on the repair track, `None` for an anomaly.
    pub fn progress_index(&self) -> Option<usize> {
        Self::PROGRESS.iter().position(|s| s == self)
    }
}

impl fmt::Display for MachineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MachineStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| ValidationError::UnknownStatus(s.to_string()))
    }
}

/// A person attached to a machine (owner or technician).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRef {
    /// Account id.
    #[serde(default)]
    pub id: i64,
    /// Last name.
    #[serde(default)]
    pub nom: String,
    /// First name.
    #[serde(default)]
    pub prenom: String,
}

/// A machine dropped off for repair.
///
/// Dates are kept as the backend's ISO strings; see [`crate::display`] for
/// formatting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    /// Machine id.
    #[serde(default)]
    pub id: i64,
    /// Brand.
    #[serde(default)]
    pub marque: String,
    /// Model.
    #[serde(default)]
    pub modele: String,
    /// Serial number.
    #[serde(default)]
    pub numero_serie: Option<String>,
    /// Reported fault.
    #[serde(default)]
    pub defaut: String,
    /// Photo of the machine at drop-off.
    #[serde(default)]
    pub photo_url: Option<String>,
    /// Drop-off appointment.
    #[serde(default)]
    pub rendez_vous: String,
    /// Current status.
    pub statut: MachineStatus,
    /// Quoted amount, in FCFA.
    #[serde(default)]
    pub montant: Option<f64>,
    /// Whether the repair has been paid.
    #[serde(default)]
    pub paye: bool,
    /// Technician's note to the customer.
    #[serde(default)]
    pub remarque_technicien: Option<String>,
    /// Hand-back date.
    #[serde(default)]
    pub date_remise: Option<String>,
    /// Payment date.
    #[serde(default)]
    pub date_paiement: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
    /// Owner.
    #[serde(default)]
    pub client: PersonRef,
    /// Assigned technician.
    #[serde(default)]
    pub technicien: Option<PersonRef>,
}

impl Machine {
    /// "Marque Modele".
    pub fn title(&self) -> String {
        format!("{} {}", self.marque, self.modele).trim().to_string()
    }

    /// Technician as "Prenom N.", if one is assigned.
    pub fn technician_short_name(&self) -> Option<String> {
        self.technicien.as_ref().map(|t| match t.nom.chars().next() {
            Some(initial) => format!("{} {}.", t.prenom, initial),
            None => t.prenom.clone(),
        })
    }
}
