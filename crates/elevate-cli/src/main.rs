//! Command-line interface for Elevate user settings.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Show the current settings |
//! | `get` / `set` | Read or change one option |
//! | `reset` | Replace all settings with the defaults |
//! | `clear-local-storage` | Flag the extension cache for purge |
//! | `zones` | List, show, edit, reset, export and import zones |
//! | `export` / `import` | Back up or restore the settings document |
//! | `config` | Manage CLI configuration |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! Options are resolved from the command-line flag, then the environment
//! (`ELEVATE_DB`, `ELEVATE_TARGET`), then `~/.config/elevate/config.toml`
//! (or platform equivalent, overridable with `ELEVATE_CONFIG`).

mod cli;
mod commands;
mod config;
mod format;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use elevate_core::{SqliteUserSettingsDao, UserSettingsService};

use cli::{Cli, Commands};
use commands::OutputOptions;
use config::{Config, resolve_database, resolve_target};

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "elevate", &mut io::stdout());
        return Ok(());
    }

    // Logs go to stderr so stdout stays clean for JSON output
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    let output = OutputOptions {
        json: cli.json || config.json,
        quiet: cli.quiet,
        no_color: cli.no_color,
    };

    if let Commands::Config { action } = cli.command {
        return commands::cmd_config(action, output);
    }

    let db_path = resolve_database(cli.db, &config);
    let target = resolve_target(cli.target.map(Into::into), &config);
    tracing::debug!("Using {} settings at {}", target, db_path.display());

    let dao = SqliteUserSettingsDao::open(&db_path, target)
        .with_context(|| format!("Failed to open settings database {}", db_path.display()))?;
    let service = UserSettingsService::new(Arc::new(dao));

    match cli.command {
        Commands::Show => commands::cmd_show(&service, output).await,
        Commands::Get { key } => commands::cmd_get(&service, &key, output).await,
        Commands::Set { key, value } => commands::cmd_set(&service, &key, &value, output).await,
        Commands::Reset { force } => commands::cmd_reset(&service, force, output).await,
        Commands::ClearLocalStorage => commands::cmd_clear_local_storage(&service, output).await,
        Commands::Zones { action } => commands::cmd_zones(&service, action, output).await,
        Commands::Export { file } => commands::cmd_export(&service, file, output).await,
        Commands::Import { file, force } => {
            commands::cmd_import(&service, &file, force, output).await
        }
        Commands::Config { .. } | Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }
}
