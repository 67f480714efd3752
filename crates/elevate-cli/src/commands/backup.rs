//! Settings export and import.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{OutputOptions, Service, print_json};

pub async fn cmd_export(service: &Service, file: Option<PathBuf>, output: OutputOptions) -> Result<()> {
    // Make sure there is a document to export.
    service.fetch().await?;
    let json = service.dao().export_json().await?;

    match file {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            output.confirm(&format!("Exported settings to {}", path.display()));
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub async fn cmd_import(service: &Service, file: &Path, force: bool, output: OutputOptions) -> Result<()> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let settings = service
        .dao()
        .import_json(&json, force)
        .await
        .with_context(|| {
            if force {
                format!("Failed to import {}", file.display())
            } else {
                format!(
                    "Failed to import {} (use --force to replace existing settings)",
                    file.display()
                )
            }
        })?;

    if output.json {
        return print_json(&settings);
    }
    output.confirm(&format!(
        "Imported {} settings from {}",
        settings.env_target(),
        file.display()
    ));
    Ok(())
}
