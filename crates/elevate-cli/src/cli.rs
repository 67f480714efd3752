//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use elevate_types::EnvTarget;

/// Environment target selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetArg {
    /// Browser extension settings
    Extension,
    /// Desktop application settings
    Desktop,
}

impl From<TargetArg> for EnvTarget {
    fn from(target: TargetArg) -> Self {
        match target {
            TargetArg::Extension => EnvTarget::Extension,
            TargetArg::Desktop => EnvTarget::Desktop,
        }
    }
}

#[derive(Parser)]
#[command(name = "elevate")]
#[command(author, version, about = "Manage Elevate user settings and training zones", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Settings database path
    #[arg(long, global = true, env = "ELEVATE_DB")]
    pub db: Option<PathBuf>,

    /// Environment target whose defaults seed new settings
    #[arg(long, global = true, value_enum, env = "ELEVATE_TARGET")]
    pub target: Option<TargetArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current settings
    Show,

    /// Print a single settings option
    Get {
        /// Option name (e.g. systemUnits)
        key: String,
    },

    /// Change a single settings option
    Set {
        /// Option name (e.g. displayAdvancedHrData)
        key: String,

        /// New value; JSON literals (true, 25, "text") are accepted
        value: String,
    },

    /// Replace all settings with the defaults
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Ask the extension to clear its local storage on next load
    ClearLocalStorage,

    /// Inspect and edit training zones
    Zones {
        #[command(subcommand)]
        action: ZonesAction,
    },

    /// Export the settings document as JSON
    Export {
        /// Write to this file instead of stdout
        file: Option<PathBuf>,
    },

    /// Import a settings document from a JSON file
    Import {
        /// File to read
        file: PathBuf,

        /// Replace the stored settings if present
        #[arg(short, long)]
        force: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Zone subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ZonesAction {
    /// Summarize every zone set
    #[command(alias = "ls")]
    List,

    /// Show the zones of one zone type
    Show {
        /// Zone type (e.g. heartRate, speed, pace)
        zone_type: String,
    },

    /// Replace the zones of one zone type with a boundary list
    Set {
        /// Zone type
        zone_type: String,

        /// Zone boundaries: first zone start, then each zone end
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        boundaries: Vec<f64>,
    },

    /// Append a zone as wide as the last one
    Add {
        /// Zone type
        zone_type: String,
    },

    /// Remove a zone, merging it into the next one
    #[command(alias = "rm")]
    Remove {
        /// Zone type
        zone_type: String,

        /// Zone number to remove (1-based); defaults to the last zone
        #[arg(long)]
        at: Option<usize>,
    },

    /// Move one boundary of a zone set
    Move {
        /// Zone type
        zone_type: String,

        /// Boundary index (0 is the first zone start)
        index: usize,

        /// New boundary value
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Restore every zone set to the defaults
    Reset,

    /// Print the boundary list of one zone type as JSON
    Export {
        /// Zone type
        zone_type: String,
    },

    /// Replace one zone set from JSON text
    Import {
        /// Zone type
        zone_type: String,

        /// Boundary list (`[0, 120, 140]`) or zone objects
        #[arg(id = "zones_json", value_name = "JSON")]
        json: String,
    },

    /// List zone definitions (units, step, bounds)
    Definitions,
}

/// Configuration subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init,
}
