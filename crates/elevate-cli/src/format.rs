//! Output formatting for settings and zones.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::Value;
use tabled::{builder::Builder, settings::Style};

use elevate_types::{UserSettings, UserZones, ZONE_DEFINITIONS, ZoneDefinition, ZoneModel, fields};

/// Read a command-line value as a JSON literal, falling back to a string.
///
/// `true`, `25` and `"metric"` parse as JSON; `metric` becomes a string.
pub fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Render a JSON value for a table cell or plain output.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Success line, green unless colors are disabled.
pub fn success(message: &str, no_color: bool) -> String {
    if no_color {
        message.to_string()
    } else {
        format!("{}", message.green())
    }
}

/// Two-column table of every settings option except the zones.
pub fn format_settings(settings: &UserSettings) -> Result<String> {
    let mut builder = Builder::default();
    builder.push_record(["Option", "Value"]);

    for (key, value) in settings.to_json()? {
        if key == fields::ZONES {
            continue;
        }
        builder.push_record([key, display_value(&value)]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    Ok(table.to_string())
}

/// One row per zone type: zone count and covered range.
pub fn format_zone_sets(zones: &UserZones) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Type", "Name", "Zones", "Range", "Units"]);

    for (zone_type, boundaries) in zones.iter() {
        let def = zone_type.definition();
        let range = match (boundaries.first(), boundaries.last()) {
            (Some(first), Some(last)) if boundaries.len() > 1 => format!(
                "{} - {}",
                def.format_value(*first),
                def.format_value(*last)
            ),
            _ => "-".to_string(),
        };
        builder.push_record([
            zone_type.key().to_string(),
            def.name.to_string(),
            boundaries.len().saturating_sub(1).to_string(),
            range,
            def.units.to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Numbered zones of one zone set.
pub fn format_zones(definition: &ZoneDefinition, zones: &[ZoneModel]) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Zone".to_string(),
        format!("From ({})", definition.units),
        format!("To ({})", definition.units),
    ]);

    for (i, zone) in zones.iter().enumerate() {
        builder.push_record([
            format!("Z{}", i + 1),
            definition.format_value(zone.from),
            definition.format_value(zone.to),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Every zone definition.
pub fn format_definitions() -> String {
    let mut builder = Builder::default();
    builder.push_record(["Type", "Name", "Units", "Step", "Min", "Max"]);

    for def in &ZONE_DEFINITIONS {
        builder.push_record([
            def.zone_type.key().to_string(),
            def.name.to_string(),
            def.units.to_string(),
            def.step.to_string(),
            def.format_value(def.min),
            def.format_value(def.max),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevate_types::{EnvTarget, ZoneType};
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("25"), json!(25));
        assert_eq!(parse_value("\"metric\""), json!("metric"));
        assert_eq!(parse_value("imperial"), json!("imperial"));
        assert_eq!(parse_value("[0, 10]"), json!([0, 10]));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("metric")), "metric");
        assert_eq!(display_value(&json!(false)), "false");
        assert_eq!(display_value(&json!(25)), "25");
    }

    #[test]
    fn test_success_without_color() {
        assert_eq!(success("Done", true), "Done");
        assert!(success("Done", false).contains("Done"));
    }

    #[test]
    fn test_format_settings_skips_zones() {
        let settings = UserSettings::defaults(EnvTarget::Desktop);
        let text = format_settings(&settings).unwrap();
        assert!(text.contains("syncOnStartup"));
        assert!(text.contains("envTarget"));
        assert!(!text.contains("heartRate"));
    }

    #[test]
    fn test_format_zones_uses_definition() {
        let def = ZoneType::Pace.definition();
        let zones = [ZoneModel::new(0.0, 240.0), ZoneModel::new(240.0, 300.0)];
        let text = format_zones(def, &zones);
        assert!(text.contains("Z2"));
        assert!(text.contains("4:00"));
        assert!(text.contains("5:00"));
        assert!(text.contains("Seconds"));
    }

    #[test]
    fn test_format_zone_sets_lists_all_types() {
        let text = format_zone_sets(&UserZones::default());
        for zone_type in ZoneType::ALL {
            assert!(text.contains(zone_type.key()));
        }
    }

    #[test]
    fn test_format_definitions() {
        let text = format_definitions();
        assert!(text.contains("Cycling Speed"));
        assert!(text.contains("KPH"));
    }
}
