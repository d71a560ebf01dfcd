//! Customer records as listed on the admin dashboard.

use serde::{Deserialize, Serialize};

/// A registered customer of the shop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientRecord {
    /// Account id.
    pub id: i64,
    /// Login handle (e.g. `CLT-00001`).
    pub identifiant: String,
    /// Last name.
    pub nom: String,
    /// First name.
    pub prenom: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub numero: String,
    /// Postal address.
    pub adresse: String,
    /// Whether the account is enabled.
    pub active: bool,
}

impl ClientRecord {
    /// "Prenom Nom".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom).trim().to_string()
    }
}
