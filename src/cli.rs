//! Termfolio command line
//!
//! With no subcommand the full-screen portfolio opens. `send` transmits a
//! friend request without the UI and `config` prints the effective settings.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use crate::api::{FriendClient, HttpFriendClient};
use crate::config::Config;
use crate::errors::TermfolioError;
use crate::observability::telemetry::{init_tracing, init_tracing_to_file, redact_secrets};
use crate::submission::{Field, SubmissionCoordinator, SubmitOutcome};
use crate::ui::spinner::TransmitSpinner;
use crate::ui::tui;

#[derive(Parser)]
#[command(name = "termfolio")]
#[command(about = "ALPHA FF's portfolio, straight to your terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Friend-request endpoint (overrides config and TERMFOLIO_ENDPOINT)
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Settle every one-shot animation immediately
    #[arg(long)]
    no_animation: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive portfolio (default)
    Tui,

    /// Send a friend request without opening the portfolio
    #[command(alias = "s")]
    Send {
        /// Authorization code
        #[arg(long)]
        code: String,

        /// Server region: asia, europe, na, sa
        #[arg(long)]
        server: String,

        /// Target user id
        #[arg(long)]
        uid: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    }

    let config_path = cli.config.as_deref().map(expand_path);
    let mut config = Config::load(config_path.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.api.endpoint = endpoint;
    }
    if cli.no_animation {
        config.animation.enabled = false;
    }
    config.validate()?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_portfolio(&config).await,
        Commands::Send { code, server, uid } => {
            init_tracing();
            send(&config, code, server, uid).await
        }
        Commands::Config => {
            println!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Expand `~/` and resolve relative paths against the working directory
fn expand_path(path: &str) -> String {
    let expanded = match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest).to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string()),
        None => path.to_string(),
    };

    if std::path::Path::new(&expanded).is_absolute() {
        expanded
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&expanded).to_string_lossy().to_string())
            .unwrap_or(expanded)
    }
}

async fn run_portfolio(config: &Config) -> Result<()> {
    // The TUI owns the terminal, so logs only go to a file.
    let _guard = match &config.ui.log_file {
        Some(path) => init_tracing_to_file(path, &config.ui.log_filter)?,
        None => None,
    };

    let client: Arc<dyn FriendClient> = Arc::new(HttpFriendClient::new(&config.api)?);
    tui::run_tui(config, client).await
}

async fn send(config: &Config, code: String, server: String, uid: String) -> Result<()> {
    let client = HttpFriendClient::new(&config.api)?;
    info!(
        endpoint = %redact_secrets(client.endpoint().as_str()),
        "Sending friend request"
    );

    let coordinator = SubmissionCoordinator::new(Arc::new(client));
    coordinator.update_field(Field::Code, code);
    coordinator.update_field(Field::Server, server);
    coordinator.update_field(Field::Uid, uid);

    let spinner = TransmitSpinner::start(coordinator.subscribe(), config.animation.loading_glyph());
    match coordinator.submit().await {
        SubmitOutcome::Succeeded { message } => {
            spinner.finish_success(&message);
            Ok(())
        }
        SubmitOutcome::Failed(error) => {
            spinner.finish_error(&error.to_string());
            Err(TermfolioError::from(error).into())
        }
        SubmitOutcome::Ignored => Err(anyhow!("A friend request is already in flight")),
    }
}
