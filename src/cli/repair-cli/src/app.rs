//! One front-end instance: a session store plus the views behind it.

use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;

use repair_api::{ApiClient, ApiConfig, ApiError};
use repair_auth::{GuardState, GuardedRoute, HttpAuthGateway, Redirect, SessionStore, Transition};
use repair_model::{
    search_clients, AdminStats, Identity, Machine, MachineFilter, MachineStats,
    PasswordChange, StatusFilter,
};

use crate::front::{Front, View};
use crate::views;

/// Session store of the front-end `F`.
pub type Session<F> = SessionStore<HttpAuthGateway<F>>;

/// A running front-end.
pub struct App<F: Front> {
    session: Session<F>,
    portal_url: String,
}

impl<F: Front> App<F> {
    /// Builds the HTTP stack and an unverified session.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api = ApiClient::new(config).context("Failed to create HTTP client")?;
        Ok(Self {
            session: SessionStore::new(HttpAuthGateway::new(api)),
            portal_url: config.portal_url.clone(),
        })
    }

    /// The session store.
    pub fn session(&self) -> &Session<F> {
        &self.session
    }

    fn api(&self) -> &ApiClient {
        self.session.gateway().api()
    }

    /// Navigates `route` to `view` and returns the identity allowed in.
    ///
    /// A guard redirect is carried out on `route`, then reported as an
    /// error naming where the user was sent.
    pub fn enter(&self, route: &mut GuardedRoute<F::Role>, view: View) -> Result<Identity<F::Role>> {
        let path = F::route(view).ok_or_else(|| anyhow!("{} n'a pas cette vue", F::TITLE))?;
        route.navigate(path, F::guard(path));

        let session = self.session.state();
        let transition = route.update(&session);
        debug!(path, state = ?transition.state, "guard evaluated");
        if let Some(redirect) = transition.redirect.clone() {
            self.follow(route, redirect);
        }

        match transition.state {
            GuardState::Authorized => session
                .identity
                .context("session closed while entering the view"),
            GuardState::Checking => bail!("Verification de la session en cours"),
            GuardState::Unauthenticated => bail!(
                "Connexion requise pour {}{}",
                path,
                redirect_note(transition.redirect.as_ref())
            ),
            GuardState::Forbidden => {
                let role = session
                    .identity
                    .map(|i| i.role.to_string())
                    .unwrap_or_default();
                bail!(
                    "Acces refuse a {} pour le role {}{}",
                    path,
                    role,
                    redirect_note(transition.redirect.as_ref())
                )
            },
        }
    }

    /// Carries out `redirect` on `route` against the current session.
    pub fn follow(&self, route: &mut GuardedRoute<F::Role>, redirect: Redirect) -> Transition {
        let transition = route.follow(redirect, &self.session.state(), F::guard);
        debug!(path = route.path(), state = ?transition.state, "redirect followed");
        transition
    }

    async fn machines_of(&self, identity: &Identity<F::Role>) -> Result<Vec<Machine>, ApiError> {
        if F::SHOP_WIDE {
            self.api().all_machines().await
        } else {
            self.api().machines_for(identity).await
        }
    }

    /// Welcome header, counters and (portal) the machine list.
    pub async fn dashboard(&self, identity: &Identity<F::Role>) -> String {
        let machines = match self.machines_of(identity).await {
            Ok(machines) => machines,
            Err(e) => return views::error_banner(&e.to_string(), "dashboard"),
        };

        let mut out = format!(
            "{} - Tableau de bord\nBienvenue, {}\n\n{}",
            F::TITLE,
            views::identity_line(identity),
            views::machine_stats(&MachineStats::from_machines(&machines))
        );
        if !F::SHOP_WIDE {
            let all: Vec<&Machine> = machines.iter().collect();
            out.push_str("\n\n");
            out.push_str(&views::machine_list(&all, false));
        }
        out
    }

    /// Filtered machine list.
    pub async fn machines(
        &self,
        identity: &Identity<F::Role>,
        search: &str,
        status: StatusFilter,
    ) -> String {
        let machines = match self.machines_of(identity).await {
            Ok(machines) => machines,
            Err(e) => return views::error_banner(&e.to_string(), "machines"),
        };

        let filter = MachineFilter {
            search: search.to_string(),
            status,
            include_client_names: F::SHOP_WIDE || identity.is_admin(),
        };
        format!(
            "{}\n\n{}",
            views::machine_stats(&MachineStats::from_machines(&machines)),
            views::machine_list(&filter.apply(&machines), filter.is_active())
        )
    }

    /// Detail of one machine in the viewer's scope.
    pub async fn machine(&self, identity: &Identity<F::Role>, id: i64) -> Result<String> {
        let machines = match self.machines_of(identity).await {
            Ok(machines) => machines,
            Err(e) => return Ok(views::error_banner(&e.to_string(), "machine")),
        };
        let machine = machines
            .into_iter()
            .find(|m| m.id == id)
            .with_context(|| format!("Machine #{} introuvable", id))?;

        let mut out = views::machine_detail(&machine);
        if F::SHOP_WIDE && machine.client.id != 0 {
            match self.api().client(machine.client.id).await {
                Ok(owner) => {
                    out.push_str("\n\n");
                    out.push_str(&views::owner(&owner));
                },
                Err(e) => debug!(client = machine.client.id, error = %e, "owner lookup failed"),
            }
        }
        Ok(out)
    }

    /// Client list with machine counts; the portal shows it inside the
    /// admin overview.
    pub async fn clients(&self, search: &str) -> String {
        match self.api().admin_overview().await {
            Ok((clients, machines)) if F::SHOP_WIDE => {
                views::client_list(&search_clients(&clients, search), &machines)
            },
            Ok((clients, machines)) => views::admin_overview(
                &AdminStats::compute(&clients, &machines),
                &search_clients(&clients, search),
                &machines,
            ),
            Err(e) => views::error_banner(&e.to_string(), "clients"),
        }
    }

    /// Navigation menu.
    pub fn navigation(&self, identity: &Identity<F::Role>) -> String {
        F::navigation(identity, &self.portal_url)
    }

    /// Profile of the signed-in client.
    pub async fn account(&self) -> String {
        match self.api().current_client().await {
            Ok(record) => views::account(&record),
            Err(e) => views::error_banner(&e.to_string(), "account"),
        }
    }

    /// Sends an already-validated password change.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<String> {
        let ack = self.api().change_password(change).await?;
        Ok(if ack.message.is_empty() {
            "Mot de passe modifie avec succes".to_string()
        } else {
            ack.message
        })
    }
}

fn redirect_note(redirect: Option<&Redirect>) -> String {
    redirect
        .map(|r| format!(" (redirection vers {})", r.to))
        .unwrap_or_default()
}
