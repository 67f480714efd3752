//! Config command implementation.

use anyhow::{Result, bail};

use super::{OutputOptions, print_json};
use crate::cli::ConfigAction;
use crate::config::Config;

pub fn cmd_config(action: ConfigAction, output: OutputOptions) -> Result<()> {
    let path = Config::path();

    match action {
        ConfigAction::Show => {
            let config = Config::load();
            if output.json {
                return print_json(&config);
            }
            let content = toml::to_string_pretty(&config)?;
            if content.trim().is_empty() {
                println!("(empty configuration)");
            } else {
                print!("{}", content);
            }
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            if path.exists() {
                bail!("Config file already exists: {}", path.display());
            }
            Config::default().save()?;
            output.confirm(&format!("Created {}", path.display()));
        }
    }

    Ok(())
}
