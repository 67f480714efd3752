//! Settings commands: show, get, set, reset, clear-local-storage.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result, bail};
use dialoguer::{Confirm, theme::ColorfulTheme};

use super::{OutputOptions, Service, print_json};
use crate::format::{display_value, format_settings, parse_value};

pub async fn cmd_show(service: &Service, output: OutputOptions) -> Result<()> {
    let settings = service.fetch().await?;

    if output.json {
        return print_json(&settings);
    }
    println!("{}", format_settings(&settings)?);
    Ok(())
}

pub async fn cmd_get(service: &Service, key: &str, output: OutputOptions) -> Result<()> {
    let settings = service.fetch().await?;
    let Some(value) = settings.get_option(key)? else {
        bail!(
            "Unknown settings option '{}'. Run 'elevate show' to list options.",
            key
        );
    };

    if output.json {
        return print_json(&value);
    }
    println!("{}", display_value(&value));
    Ok(())
}

pub async fn cmd_set(service: &Service, key: &str, value: &str, output: OutputOptions) -> Result<()> {
    let value = parse_value(value);
    let updated = service
        .update_option(key, value.clone())
        .await
        .with_context(|| format!("Failed to update '{}'", key))?;

    if output.json {
        return print_json(&updated);
    }
    output.confirm(&format!("Updated {} = {}", key, display_value(&value)));
    Ok(())
}

pub async fn cmd_reset(service: &Service, force: bool, output: OutputOptions) -> Result<()> {
    if !force {
        if !io::stdin().is_terminal() {
            bail!("Refusing to reset settings without confirmation. Use --force.");
        }
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "Replace all settings with the {} defaults?",
                service.env_target()
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            if !output.quiet {
                eprintln!("Reset cancelled.");
            }
            return Ok(());
        }
    }

    let settings = service.reset().await?;

    if output.json {
        return print_json(&settings);
    }
    output.confirm(&format!(
        "Settings reset to {} defaults",
        settings.env_target()
    ));
    Ok(())
}

pub async fn cmd_clear_local_storage(service: &Service, output: OutputOptions) -> Result<()> {
    let updated = service
        .clear_local_storage_on_next_load()
        .await
        .map_err(|e| {
            if e.is_unknown_field() {
                anyhow::anyhow!(
                    "Local storage clearing only applies to extension settings (current target: {})",
                    service.env_target()
                )
            } else {
                e.into()
            }
        })?;

    if output.json {
        return print_json(&updated);
    }
    output.confirm("Local storage will be cleared on next load");
    Ok(())
}
