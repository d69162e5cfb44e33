use std::path::PathBuf;
use std::process::ExitCode;

use authgate::api::{ApiError, AuthClient, Credentials, RegisterInput};
use authgate::auth::Auth;
use authgate::config::{ClientConfig, ConfigError};
use authgate::router::{GuardDecision, Navigator, RouteTable};
use authgate::session::SessionStore;
use authgate::storage::FileStore;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Validation(&'static str),
}

#[derive(Parser, Debug)]
#[command(name = "authgate", about = "Sign in, inspect the session, and check route access")]
struct Cli {
    #[arg(long, env = "AUTHGATE_API_URL")]
    api_url: Option<String>,

    #[arg(long, env = "AUTHGATE_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTHGATE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Location to return to after login (e.g. from a guard redirect).
        #[arg(long)]
        redirect: Option<String>,
    },
    /// Create an account; stores the session if the server logs in directly.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "AUTHGATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show whether a session is stored.
    Status,
    /// Fetch the signed-in user's profile.
    Profile,
    /// Run the navigation guard for a location.
    Navigate { location: String },
    /// List the route table.
    Routes,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("authgate=info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url.as_deref() {
        config = config.with_api_url(url)?;
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }

    let client = AuthClient::new(&config)?;
    let storage = FileStore::open(&config.session_file);
    tracing::debug!(api_url = %client.base_url(), session_file = %storage.path().display(), "client ready");
    let mut auth = Auth::new(client, SessionStore::new(storage));
    auth.initialize();
    let navigator = Navigator::new(RouteTable::app_default());

    match cli.command {
        Command::Login { email, password, redirect } => {
            let credentials = validate_login_input(&email, &password)?;
            auth.login(&credentials).await?;
            println!("signed in as {}", signed_in_name(&auth));
            println!("continue to {}", navigator.post_login_target(redirect.as_deref()));
        }
        Command::Register { name, email, password } => {
            let input = validate_register_input(&name, &email, &password)?;
            auth.register(&input).await?;
            if auth.is_authenticated() {
                println!("registered and signed in as {}", signed_in_name(&auth));
            } else {
                println!("registered; log in to continue");
            }
        }
        Command::Logout => {
            auth.logout();
            println!("signed out");
        }
        Command::Status => match auth.current_user() {
            Some(_) => println!("signed in as {}", signed_in_name(&auth)),
            None if auth.is_authenticated() => println!("signed in (no stored profile)"),
            None => println!("signed out"),
        },
        Command::Profile => {
            let user = auth.refresh_profile().await?;
            match serde_json::to_string_pretty(&user) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::warn!(error = %e, "failed to render profile"),
            }
        }
        Command::Navigate { location } => {
            let res = navigator.navigate(&location, auth.session());
            let route = res.route.map_or("<none>", |r| r.name);
            match res.decision {
                GuardDecision::Proceed => println!("proceed: {route} at {}", res.location),
                GuardDecision::RedirectToLogin { .. } => println!("redirect to login: {}", res.location),
                GuardDecision::RedirectToDashboard => println!("redirect to dashboard: {}", res.location),
            }
        }
        Command::Routes => {
            for route in navigator.table().routes() {
                println!("{:<24} {:<18} {}", route.path, route.name, access_label(route.meta));
            }
        }
    }
    Ok(())
}

fn signed_in_name<S: authgate::storage::KeyValueStore>(auth: &Auth<S>) -> String {
    auth.current_user()
        .and_then(|u| u.display_name().map(str::to_owned).or_else(|| u.id.as_ref().map(ToString::to_string)))
        .unwrap_or_else(|| "<unknown>".to_owned())
}

fn access_label(meta: authgate::router::RouteMeta) -> &'static str {
    if meta.requires_auth {
        "requires auth"
    } else if meta.redirect_if_auth {
        "guests only"
    } else {
        "public"
    }
}

fn validate_login_input(email: &str, password: &str) -> Result<Credentials, CliError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CliError::Validation("email is required"));
    }
    if password.is_empty() {
        return Err(CliError::Validation("password is required"));
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

fn validate_register_input(name: &str, email: &str, password: &str) -> Result<RegisterInput, CliError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::Validation("name is required"));
    }
    let credentials = validate_login_input(email, password)?;
    Ok(RegisterInput { name: name.to_owned(), email: credentials.email, password: credentials.password })
}
