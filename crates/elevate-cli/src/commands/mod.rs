//! Command implementations for the CLI.

mod backup;
mod config;
mod settings;
mod zones;

use elevate_core::{SqliteUserSettingsDao, UserSettingsService};

pub use backup::{cmd_export, cmd_import};
pub use config::cmd_config;
pub use settings::{cmd_clear_local_storage, cmd_get, cmd_reset, cmd_set, cmd_show};
pub use zones::cmd_zones;

/// Settings service backed by the local database.
pub type Service = UserSettingsService<SqliteUserSettingsDao>;

/// Output preferences shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
    pub no_color: bool,
}

impl OutputOptions {
    /// Print a confirmation line unless quiet.
    pub fn confirm(&self, message: &str) {
        if !self.quiet {
            println!("{}", crate::format::success(message, self.no_color));
        }
    }
}

/// Pretty-print a value as JSON on stdout.
fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
