//! Interactive session.
//!
//! One session store lives for the whole shell. Views are entered through
//! a single [`GuardedRoute`], and every session change is fed back to it so
//! that signing out while on a protected view redirects right away.

use anyhow::{bail, Context, Result};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use repair_auth::guard::ENTRY_PATH;
use repair_auth::{GuardedRoute, SessionState};
use repair_model::{PasswordChange, StatusFilter};

use crate::app::App;
use crate::front::{Front, View};
use crate::views;

const HELP: &str = "\
Commandes:
  login <identifiant> <mot de passe>   Se connecter
  logout                               Se deconnecter
  whoami                               Utilisateur courant
  refresh                              Reverifier la session
  dashboard                            Tableau de bord
  machines [statut] [recherche]        Liste des machines
  machine <id>                         Detail et suivi d'une machine
  clients [recherche]                  Liste des clients
  nav                                  Menu de navigation
  account                              Mon compte
  passwd <ancien> <nouveau> <confirm>  Changer le mot de passe
  help                                 Cette aide
  quit                                 Quitter";

/// Runs the read-eval-print loop until `quit` or end of input.
pub async fn run<F: Front>(app: &App<F>) -> Result<()> {
    let mut changes = app.session().subscribe();
    changes.mark_unchanged();

    let mut route = GuardedRoute::new(F::guard(ENTRY_PATH), ENTRY_PATH);

    println!("{} - session interactive, tapez `help`", F::TITLE);
    println!("{}", session_line(&app.session().state()));

    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        stdout.write_all(b"repair> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            continue;
        };

        match command {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            _ => {
                if let Err(e) = dispatch(app, &mut route, command, args).await {
                    println!("Erreur: {:#}", e);
                }
            },
        }

        if changes.has_changed().unwrap_or(false) {
            let state = changes.borrow_and_update().clone();
            println!("{}", session_line(&state));

            let transition = route.update(&state);
            if let Some(redirect) = transition.redirect {
                println!("-> {}", redirect.to);
                app.follow(&mut route, redirect);
            }
        }
    }

    Ok(())
}

async fn dispatch<F: Front>(
    app: &App<F>,
    route: &mut GuardedRoute<F::Role>,
    command: &str,
    args: &[&str],
) -> Result<()> {
    match command {
        "login" => {
            let [identifiant, password] = args else {
                bail!("usage: login <identifiant> <mot de passe>");
            };
            let identity = app.session().login(identifiant, password).await?;
            println!("Connecte: {}", views::identity_line(&identity));
        },
        "logout" => app.session().logout().await,
        "whoami" => println!("{}", session_line(&app.session().state())),
        "refresh" => {
            app.session().refresh().await;
        },
        "dashboard" => {
            let identity = app.enter(route, View::Dashboard)?;
            println!("{}", app.dashboard(&identity).await);
        },
        "machines" => {
            let identity = app.enter(route, View::Machines)?;
            let (status, search) = split_status(args);
            println!("{}", app.machines(&identity, &search, status).await);
        },
        "machine" => {
            let id: i64 = args
                .first()
                .context("usage: machine <id>")?
                .trim_start_matches('#')
                .parse()
                .context("identifiant de machine invalide")?;
            let identity = app.enter(route, View::Machine)?;
            println!("{}", app.machine(&identity, id).await?);
        },
        "clients" => {
            app.enter(route, View::Clients)?;
            println!("{}", app.clients(&args.join(" ")).await);
        },
        "nav" => {
            let identity = app.enter(route, View::Navigation)?;
            println!("{}", app.navigation(&identity));
        },
        "account" => {
            app.enter(route, View::Settings)?;
            println!("{}", app.account().await);
        },
        "passwd" => {
            let [old, new, confirm] = args else {
                bail!("usage: passwd <ancien> <nouveau> <confirmation>");
            };
            let change = PasswordChange::new(old, new, confirm)?;
            app.enter(route, View::Settings)?;
            println!("{}", app.change_password(&change).await?);
        },
        other => bail!("commande inconnue `{}`, tapez `help`", other),
    }
    Ok(())
}

/// Leading status keyword, then free-text search.
fn split_status(args: &[&str]) -> (StatusFilter, String) {
    match args.split_first() {
        Some((first, rest)) => match first.parse::<StatusFilter>() {
            Ok(status) => (status, rest.join(" ")),
            Err(_) => (StatusFilter::All, args.join(" ")),
        },
        None => (StatusFilter::All, String::new()),
    }
}

fn session_line<R: repair_model::AccessRole>(state: &SessionState<R>) -> String {
    match &state.identity {
        _ if state.is_loading => "[session] verification...".to_string(),
        Some(identity) => format!("[session] {}", views::identity_line(identity)),
        None => "[session] non connecte".to_string(),
    }
}
