//! Text rendering of the dashboards.
//!
//! Every function returns the text instead of printing it, so commands and
//! the shell share them.

use std::fmt::Write;

use repair_auth::navigation::{Sidebar, PORTAL_ADMIN_PATH};
use repair_model::display::{format_amount, format_date, format_date_long, format_date_time};
use repair_model::{
    AccessRole, AdminStats, ClientRecord, Identity, Machine, MachineStats, MachineStatus,
    PortalRole,
};

/// One-line summary of the signed-in user.
pub fn identity_line<R: AccessRole>(identity: &Identity<R>) -> String {
    let mut line = format!("{} <{}> [{}]", identity.display_name(), identity.email, identity.role);
    if let Some(handle) = &identity.identifiant {
        let _ = write!(line, " ({})", handle);
    }
    line
}

/// Inline, retryable error banner for a failed fetch.
pub fn error_banner(message: &str, retry: &str) -> String {
    format!("Erreur: {}\n  Reessayez avec `{}`.", message, retry)
}

/// Counters above the machine list.
pub fn machine_stats(stats: &MachineStats) -> String {
    format!(
        "Total: {}  |  En attente: {}  |  En cours: {}  |  Termine: {}  |  Anomalie: {}",
        stats.total, stats.en_attente, stats.en_cours, stats.termine, stats.anomalie
    )
}

/// Machine list, one line per machine.
pub fn machine_list(machines: &[&Machine], filtered: bool) -> String {
    if machines.is_empty() {
        return if filtered {
            "Aucune machine ne correspond a votre recherche.".to_string()
        } else {
            "Aucune machine enregistree pour le moment.".to_string()
        };
    }

    let mut out = String::new();
    for m in machines {
        let _ = write!(
            out,
            "#{:<5} {:<28} {:<12} {}",
            m.id,
            m.title(),
            m.statut.label(),
            format_date(&m.rendez_vous)
        );
        if let Some(serial) = &m.numero_serie {
            let _ = write!(out, "  S/N: {}", serial);
        }
        if let Some(tech) = m.technician_short_name() {
            let _ = write!(out, "  Tech: {}", tech);
        }
        if let Some(amount) = m.montant {
            let _ = write!(out, "  {}", format_amount(amount));
        }
        out.push('\n');
    }

    let n = machines.len();
    let plural = if n > 1 { "s" } else { "" };
    let _ = write!(out, "{} machine{} affichee{}", n, plural, plural);
    out
}

/// Detail view with the repair progress track.
pub fn machine_detail(machine: &Machine) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", machine.title());
    if let Some(serial) = &machine.numero_serie {
        let _ = writeln!(out, "S/N: {}", serial);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", machine.statut.long_label());
    let _ = writeln!(out, "  {}", machine.statut.description());
    let _ = writeln!(out);

    if machine.statut == MachineStatus::Anomalie {
        let _ = writeln!(out, "  [!] Suivi interrompu: anomalie en cours de traitement");
    } else {
        let current = machine.statut.progress_index().unwrap_or(0);
        for (i, step) in MachineStatus::PROGRESS.iter().enumerate() {
            let mark = if i < current {
                "[x]"
            } else if i == current {
                "[>]"
            } else {
                "[ ]"
            };
            let _ = writeln!(out, "  {} {}", mark, step.long_label());
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Defaut:          {}", machine.defaut);
    let _ = writeln!(
        out,
        "Rendez-vous:     {}",
        format_date_time(Some(machine.rendez_vous.as_str()).filter(|s| !s.is_empty()))
    );
    let _ = writeln!(
        out,
        "Technicien:      {}",
        machine
            .technicien
            .as_ref()
            .map(|t| format!("{} {}", t.prenom, t.nom))
            .unwrap_or_else(|| "-".to_string())
    );
    if let Some(note) = &machine.remarque_technicien {
        let _ = writeln!(out, "Remarque:        {}", note);
    }
    let _ = writeln!(
        out,
        "Montant:         {}",
        machine.montant.map(format_amount).unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(
        out,
        "Paiement:        {}",
        if machine.paye {
            format!("Paye le {}", format_date_long(machine.date_paiement.as_deref()))
        } else {
            "Non paye".to_string()
        }
    );
    let _ = write!(
        out,
        "Remise:          {}",
        format_date_long(machine.date_remise.as_deref())
    );
    out
}

/// Admin overview: shop counters, revenue and the client list.
pub fn admin_overview(stats: &AdminStats, clients: &[&ClientRecord], machines: &[Machine]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Clients: {} ({} actifs)  |  Machines: {} ({} en cours)",
        stats.total_clients, stats.active_clients, stats.machines.total, stats.machines.en_cours
    );
    let _ = writeln!(
        out,
        "En attente: {}  |  Termine: {}  |  Anomalies: {}",
        stats.machines.en_attente, stats.machines.termine, stats.machines.anomalie
    );
    let _ = writeln!(
        out,
        "Revenus totaux: {} ({} machines payees)",
        format_amount(stats.total_revenue),
        stats.paid_machines
    );
    let _ = writeln!(out);
    out.push_str(&client_list(clients, machines));
    out
}

/// Owner contact block of the staff machine detail.
pub fn owner(client: &ClientRecord) -> String {
    format!(
        "Client:          {} ({})\nContact:         {}  {}",
        client.full_name(),
        client.identifiant,
        client.email,
        client.numero
    )
}

/// Account page of the client portal.
pub fn account(client: &ClientRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Identifiant:  {}", client.identifiant);
    let _ = writeln!(out, "Nom:          {}", client.full_name());
    let _ = writeln!(out, "Email:        {}", client.email);
    let _ = writeln!(out, "Telephone:    {}", client.numero);
    let _ = write!(out, "Adresse:      {}", client.adresse);
    out
}

/// Client list, one line per client.
/// Client table with the number of machines each one dropped off.
pub fn client_list(clients: &[&ClientRecord], machines: &[Machine]) -> String {
    if clients.is_empty() {
        return "Aucun client trouve.".to_string();
    }

    let mut out = String::new();
    for c in clients {
        let owned = machines.iter().filter(|m| m.client.id == c.id).count();
        let _ = writeln!(
            out,
            "{:<10} {:<24} {:<28} {:<14} {:>3} machine(s)  {}",
            c.identifiant,
            c.full_name(),
            c.email,
            c.numero,
            owned,
            if c.active { "actif" } else { "inactif" }
        );
    }
    out.pop();
    out
}

/// Client portal header menu.
pub fn portal_navigation(identity: &Identity<PortalRole>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "RepairTrack - Suivi de vos reparations");
    let _ = writeln!(out, "  {:<14} /dashboard", "Mes machines");
    if identity.is_admin() {
        let _ = writeln!(out, "  {:<14} {}", "Administration", PORTAL_ADMIN_PATH);
    }
    let _ = writeln!(out, "  {:<14} /dashboard/settings", "Parametres");
    let _ = writeln!(out);
    let _ = writeln!(out, "{} - {}", identity.display_name(), identity.role.label());
    let _ = write!(out, "Deconnexion: `logout`");
    out
}

/// Staff sidebar.
pub fn sidebar(sidebar: &Sidebar) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "RepairSys - Gestion de reparation");
    for item in &sidebar.items {
        let _ = writeln!(out, "  {:<14} {}", item.name, item.href);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[{}] {} - {}", sidebar.initials, sidebar.user_name, sidebar.role);
    if let Some(link) = &sidebar.portal_link {
        let _ = writeln!(out, "Portail Client: {}", link);
    }
    let _ = write!(out, "Deconnexion: `logout`");
    out
}
