use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;

use finledger_auth::{Capability, Role, authorize};
use finledger_client::guard::LOGIN_PATH;
use finledger_client::{
    ClientConfig, FileStorage, FinLedgerApp, GuardDecision, Navigation, NavigationKind, Navigator,
};
use finledger_core::PaymentId;
use finledger_observability::LogFormat;

#[derive(Parser, Debug)]
#[command(name = "finledger", about = "FinLedger command-line client", long_about = None)]
struct Options {
    /// Backend origin, e.g. http://localhost:8080
    #[arg(long, env = "FINLEDGER_API_ORIGIN", global = true)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and persist the session
    Login { username: String, password: String },
    /// Create an account and sign in as it
    Register {
        username: String,
        password: String,
        #[arg(long, value_parser = parse_role)]
        role: Role,
        #[arg(long)]
        email: Option<String>,
    },
    /// Sign out and forget the persisted session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Show what the route guard decides for a path
    Route { path: String },
    /// Check that the backend is up
    Health,
    Accounts,
    Transactions {
        #[arg(long)]
        pending: bool,
    },
    Entries {
        /// Only entries awaiting review
        #[arg(long)]
        submitted: bool,
    },
    Payments {
        #[arg(long)]
        pending: bool,
    },
    /// Approve a pending payment as the signed-in user
    Approve { id: PaymentId },
    /// Reject a pending payment as the signed-in user
    Reject { id: PaymentId },
    /// Mark an approved payment as paid
    Complete { id: PaymentId },
}

fn parse_role(raw: &str) -> Result<Role, String> {
    raw.parse::<Role>().map_err(|e| e.to_string())
}

/// Reports navigations on the terminal.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, navigation: Navigation) {
        if navigation.kind == NavigationKind::Hard && navigation.to == LOGIN_PATH {
            eprintln!("session expired; run `finledger login` again");
        } else if let Some(notice) = &navigation.notice {
            eprintln!("{notice}");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    finledger_observability::init_with(LogFormat::Pretty);
    let opts = Options::parse();

    let mut config = ClientConfig::from_env().context("invalid FINLEDGER_* configuration")?;
    if let Some(origin) = &opts.origin {
        config.origin = ClientConfig::new(origin)?.origin;
    }

    let storage = match &config.storage_path {
        Some(path) => FileStorage::open(path),
        None => FileStorage::open_default(),
    }
    .context("failed to open session storage")?;

    let app = FinLedgerApp::start(config, Arc::new(storage), Arc::new(TerminalNavigator))?;
    let outcome = run(&app, opts.command).await;
    app.shutdown();
    outcome
}

async fn run(app: &FinLedgerApp, command: Command) -> Result<()> {
    let client = app.client();

    match command {
        Command::Login { username, password } => {
            let user = app.login(&username, &password).await.context("login failed")?;
            println!("signed in as {} ({})", user.username, role_label(user.role));
        }
        Command::Register {
            username,
            password,
            role,
            email,
        } => {
            let user = app
                .register(&username, &password, role, email)
                .await
                .context("registration failed")?;
            println!("registered and signed in as {} ({})", user.username, role_label(user.role));
        }
        Command::Logout => {
            app.logout()?;
            println!("signed out");
        }
        Command::Whoami => match app.session().user() {
            Some(user) => print_json(&user)?,
            None => println!("not signed in"),
        },
        Command::Route { path } => match app.guard().evaluate(&path, &app.current_session()) {
            GuardDecision::Allow => println!("allow {path}"),
            GuardDecision::Redirect(nav) => match nav.notice {
                Some(notice) => println!("redirect {} ({notice})", nav.to),
                None => println!("redirect {}", nav.to),
            },
        },
        Command::Health => {
            let health = client.health().await.context("backend unreachable")?;
            print_json(&health)?;
        }
        Command::Accounts => print_json(&client.accounts().list().await?)?,
        Command::Transactions { pending } => {
            let api = client.transactions();
            let list = if pending { api.pending().await? } else { api.list().await? };
            print_json(&list)?;
        }
        Command::Entries { submitted } => {
            let api = client.entries();
            let list = if submitted { api.submitted().await? } else { api.list().await? };
            print_json(&list)?;
        }
        Command::Payments { pending } => {
            let api = client.payments();
            let list = if pending { api.pending().await? } else { api.list().await? };
            print_json(&list)?;
        }
        Command::Approve { id } => {
            authorize(&app.current_session(), Capability::ApprovePayment)?;
            let approver = signed_in_user(app)?;
            print_json(&client.payments().approve(id, approver).await?)?;
        }
        Command::Reject { id } => {
            authorize(&app.current_session(), Capability::ApprovePayment)?;
            let approver = signed_in_user(app)?;
            print_json(&client.payments().reject(id, approver).await?)?;
        }
        Command::Complete { id } => {
            authorize(&app.current_session(), Capability::CompletePayment)?;
            print_json(&client.payments().complete(id).await?)?;
        }
    }

    Ok(())
}

fn signed_in_user(app: &FinLedgerApp) -> Result<finledger_core::UserId> {
    app.session()
        .user()
        .map(|u| u.id)
        .ok_or_else(|| anyhow!("not signed in; run `finledger login` first"))
}

fn role_label(role: Option<Role>) -> &'static str {
    role.map(|r| r.as_str()).unwrap_or("no role")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
