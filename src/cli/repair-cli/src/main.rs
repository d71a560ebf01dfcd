//! RepairSys CLI - terminal front-end for the client portal and the staff
//! console.

mod app;
mod front;
mod shell;
mod views;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use repair_api::config::{DEFAULT_API_URL, DEFAULT_PORTAL_URL, DEFAULT_TIMEOUT_SECS};
use repair_api::ApiConfig;
use repair_auth::guard::ENTRY_PATH;
use repair_auth::{ClientPortal, GuardedRoute, StaffConsole};
use repair_model::{PasswordChange, StatusFilter};

use crate::app::App;
use crate::front::{Front, View};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "repair")]
#[command(about = "RepairSys CLI - Track repairs and manage the shop")]
#[command(version)]
struct Cli {
    /// Backend API address
    #[arg(long, default_value = DEFAULT_API_URL, env = "REPAIR_API_URL")]
    addr: String,

    /// Client portal address, linked from the staff console
    #[arg(long, default_value = DEFAULT_PORTAL_URL, env = "REPAIR_PORTAL_URL")]
    portal_url: String,

    /// HTTP timeout in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_TIMEOUT_SECS,
        env = "REPAIR_HTTP_TIMEOUT_SECS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Front-end to act as
    #[arg(long, value_enum, default_value = "portal", env = "REPAIR_APP")]
    app: AppKind,

    /// Login handle (client identifier, or email for staff)
    #[arg(long, env = "REPAIR_IDENTIFIANT")]
    identifiant: Option<String>,

    /// Password
    #[arg(long, env = "REPAIR_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum AppKind {
    /// Client portal (RepairTrack)
    Portal,
    /// Staff console (RepairSys)
    Staff,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the identity vouched for by the backend
    Verify,
    /// Sign in and show the identity
    Login,
    /// Dashboard with repair counters
    Dashboard,
    /// List machines
    Machines {
        /// Search brand, model, fault or serial number
        #[arg(long, default_value = "")]
        search: String,
        /// Status filter (all, en_attente, en_cours, termine, anomalie, paye, remis_au_client)
        #[arg(long, default_value = "all")]
        status: StatusFilter,
    },
    /// Show one machine and its repair progress
    Machine {
        /// Machine id
        id: i64,
    },
    /// List clients (admin overview on the portal)
    Clients {
        /// Search name, email or identifier
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Show the navigation menu
    Nav,
    /// Show the signed-in client's account
    Account,
    /// Change the signed-in client's password (--password is the current one)
    ChangePassword {
        /// New password
        new_password: String,
        /// New password again
        confirm: String,
    },
    /// Interactive session
    Shell,
}

impl Commands {
    fn view(&self) -> Option<View> {
        match self {
            Self::Verify | Self::Login | Self::Shell => None,
            Self::Dashboard => Some(View::Dashboard),
            Self::Machines { .. } => Some(View::Machines),
            Self::Machine { .. } => Some(View::Machine),
            Self::Clients { .. } => Some(View::Clients),
            Self::Nav => Some(View::Navigation),
            Self::Account | Self::ChangePassword { .. } => Some(View::Settings),
        }
    }
}

// ============================================================================
// Command Handlers
// ============================================================================

async fn sign_in<F: Front>(app: &App<F>, cli: &Cli) -> Result<()> {
    if app.session().is_authenticated() {
        return Ok(());
    }
    if let (Some(identifiant), Some(password)) = (&cli.identifiant, &cli.password) {
        app.session()
            .login(identifiant, password)
            .await
            .context("Login failed")?;
    }
    Ok(())
}

async fn cmd_verify<F: Front>(app: &App<F>, cli: &Cli) -> Result<()> {
    sign_in(app, cli).await?;

    match app.session().refresh().await {
        Some(identity) => println!("Session active: {}", views::identity_line(&identity)),
        None => println!("Aucune session active"),
    }
    Ok(())
}

async fn cmd_login<F: Front>(app: &App<F>, cli: &Cli) -> Result<()> {
    let identifiant = cli
        .identifiant
        .as_deref()
        .context("Identifier required. Set REPAIR_IDENTIFIANT or use --identifiant")?;
    let password = cli
        .password
        .as_deref()
        .context("Password required. Set REPAIR_PASSWORD or use --password")?;

    let identity = app
        .session()
        .login(identifiant, password)
        .await
        .context("Login failed")?;
    println!("Connecte: {}", views::identity_line(&identity));
    Ok(())
}

async fn cmd_view<F: Front>(app: &App<F>, cli: &Cli, view: View) -> Result<()> {
    sign_in(app, cli).await?;

    let mut route = GuardedRoute::new(F::guard(ENTRY_PATH), ENTRY_PATH);
    let identity = app.enter(&mut route, view)?;

    let output = match &cli.command {
        Commands::Machines { search, status } => app.machines(&identity, search, *status).await,
        Commands::Machine { id } => app.machine(&identity, *id).await?,
        Commands::Clients { search } => app.clients(search).await,
        Commands::Nav => app.navigation(&identity),
        Commands::Account => app.account().await,
        _ => app.dashboard(&identity).await,
    };

    println!("{}", output);
    Ok(())
}

async fn cmd_change_password<F: Front>(
    app: &App<F>,
    cli: &Cli,
    change: &PasswordChange,
) -> Result<()> {
    sign_in(app, cli).await?;

    let mut route = GuardedRoute::new(F::guard(ENTRY_PATH), ENTRY_PATH);
    app.enter(&mut route, View::Settings)?;

    let message = app
        .change_password(change)
        .await
        .context("Password change failed")?;
    println!("{}", message);
    Ok(())
}

async fn run<F: Front>(cli: Cli, config: ApiConfig) -> Result<()> {
    // Rejected forms never reach the network.
    let password_change = match &cli.command {
        Commands::ChangePassword {
            new_password,
            confirm,
        } => {
            let current = cli.password.as_deref().unwrap_or_default();
            Some(PasswordChange::new(current, new_password, confirm)?)
        },
        _ => None,
    };

    let app = App::<F>::new(&config)?;
    app.session().initialize().await;

    let result = match (&cli.command, password_change) {
        (_, Some(change)) => cmd_change_password(&app, &cli, &change).await,
        (Commands::Shell, None) => shell::run(&app).await,
        (Commands::Login, None) => cmd_login(&app, &cli).await,
        (command, None) => match command.view() {
            Some(view) => cmd_view(&app, &cli, view).await,
            None => cmd_verify(&app, &cli).await,
        },
    };

    app.session().teardown();
    result
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = ApiConfig {
        portal_url: cli.portal_url.clone(),
        timeout: Duration::from_secs(cli.timeout),
        ..ApiConfig::default()
    }
    .with_base_url(cli.addr.clone());

    match cli.app {
        AppKind::Portal => run::<ClientPortal>(cli, config).await,
        AppKind::Staff => run::<StaffConsole>(cli, config).await,
    }
}
