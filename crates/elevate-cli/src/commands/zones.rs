//! Zone commands.

use anyhow::{Context, Result, bail};

use elevate_core::ZoneSetEditor;
use elevate_types::{ZONE_DEFINITIONS, ZoneType, deserialize_zones};

use super::{OutputOptions, Service, print_json};
use crate::cli::ZonesAction;
use crate::format::{format_definitions, format_zone_sets, format_zones};

pub async fn cmd_zones(service: &Service, action: ZonesAction, output: OutputOptions) -> Result<()> {
    match action {
        ZonesAction::List => {
            let settings = service.fetch().await?;
            if output.json {
                return print_json(settings.zones());
            }
            println!("{}", format_zone_sets(settings.zones()));
        }
        ZonesAction::Show { zone_type } => {
            let zone_type = parse_zone_type(&zone_type)?;
            let zones = service.zones(zone_type).await?;
            if output.json {
                return print_json(&zones);
            }
            let def = zone_type.definition();
            if !output.quiet {
                println!("{} zones ({})", def.name, def.units);
            }
            println!("{}", format_zones(def, &zones));
        }
        ZonesAction::Set {
            zone_type,
            boundaries,
        } => {
            let zone_type = parse_zone_type(&zone_type)?;
            let zones = deserialize_zones(&boundaries);
            save(service, zone_type, zones, output).await?;
        }
        ZonesAction::Add { zone_type } => {
            let zone_type = parse_zone_type(&zone_type)?;
            let current = service.zones(zone_type).await?;
            let mut editor = ZoneSetEditor::new(zone_type.definition(), current);
            editor.add_last_zone()?;
            save(service, zone_type, editor.into_zones(), output).await?;
        }
        ZonesAction::Remove { zone_type, at } => {
            let zone_type = parse_zone_type(&zone_type)?;
            let current = service.zones(zone_type).await?;
            let mut editor = ZoneSetEditor::new(zone_type.definition(), current);
            match at {
                Some(0) => bail!("Zone numbers start at 1"),
                Some(number) => {
                    editor.remove_zone_at(number - 1)?;
                }
                None => {
                    editor.remove_last_zone()?;
                }
            }
            save(service, zone_type, editor.into_zones(), output).await?;
        }
        ZonesAction::Move {
            zone_type,
            index,
            value,
        } => {
            let zone_type = parse_zone_type(&zone_type)?;
            let current = service.zones(zone_type).await?;
            let mut editor = ZoneSetEditor::new(zone_type.definition(), current);
            editor.update_boundary(index, value)?;
            save(service, zone_type, editor.into_zones(), output).await?;
        }
        ZonesAction::Reset => {
            let settings = service.reset_zones().await?;
            if output.json {
                return print_json(settings.zones());
            }
            output.confirm(&format!("Zones reset to {} defaults", service.env_target()));
        }
        ZonesAction::Export { zone_type } => {
            let zone_type = parse_zone_type(&zone_type)?;
            let zones = service.zones(zone_type).await?;
            let editor = ZoneSetEditor::new(zone_type.definition(), zones);
            println!("{}", editor.export());
        }
        ZonesAction::Import { zone_type, json } => {
            let zone_type = parse_zone_type(&zone_type)?;
            let current = service.zones(zone_type).await?;
            let mut editor = ZoneSetEditor::new(zone_type.definition(), current);
            editor
                .import(&json)
                .with_context(|| format!("Failed to import {} zones", zone_type))?;
            save(service, zone_type, editor.into_zones(), output).await?;
        }
        ZonesAction::Definitions => {
            if output.json {
                return print_json(&ZONE_DEFINITIONS);
            }
            println!("{}", format_definitions());
        }
    }

    Ok(())
}

fn parse_zone_type(text: &str) -> Result<ZoneType> {
    text.parse::<ZoneType>().with_context(|| {
        let known: Vec<&str> = ZoneType::ALL.iter().map(|t| t.key()).collect();
        format!("Valid zone types: {}", known.join(", "))
    })
}

async fn save(
    service: &Service,
    zone_type: ZoneType,
    zones: Vec<elevate_types::ZoneModel>,
    output: OutputOptions,
) -> Result<()> {
    let def = zone_type.definition();
    let saved = service.update_zones(def, &zones).await?;

    if output.json {
        return print_json(&saved);
    }
    output.confirm(&format!("Saved {} {} zones", saved.len(), zone_type));
    if !output.quiet {
        println!("{}", format_zones(def, &saved));
    }
    Ok(())
}
