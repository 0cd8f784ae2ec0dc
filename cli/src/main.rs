//! Gatehouse CLI
//!
//! Runs the session actions and guarded navigation against a live API.
//! The token persists between invocations like it would in a browser.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gatehouse_core::{App, Config, InvalidationPolicy};

#[derive(Debug, Parser)]
#[command(name = "gatehouse", version, about = "Authentication client and route guard")]
struct Cli {
    /// API base URL (overrides GATEHOUSE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Storage database path (overrides GATEHOUSE_DATABASE)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Which /user failures drop the session: any_failure or rejected_only
    #[arg(long, global = true)]
    invalidation: Option<InvalidationPolicy>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account (does not log in)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "GATEHOUSE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        password_confirmation: Option<String>,
    },
    /// Log in and persist the token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "GATEHOUSE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the token
    Logout,
    /// Fetch the current user
    Whoami,
    /// Navigate to a route through the auth guard
    Navigate { path: String },
}

impl Cli {
    fn config(&self) -> anyhow::Result<Config> {
        let mut config = Config::from_env()?;

        if let Some(url) = &self.api_url {
            config.api_base_url = url.clone();
        }
        if let Some(path) = &self.database {
            config.database_path = path.clone();
        }
        if let Some(policy) = self.invalidation {
            config.invalidation_policy = policy;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    gatehouse_core::init_logging(&cli.log_level);

    let config = cli.config()?;
    tracing::debug!(config = ?config, "Loaded configuration");

    let app = App::new(config)?;
    commands::run(&app, cli.command).await
}
