//! User settings documents.
//!
//! One settings document exists per profile. Its shape depends on the
//! [`EnvTarget`] the application runs as; both shapes share the unit
//! preferences and the [`UserZones`].

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::zones::UserZones;

/// Stored field names, for callers that update one option at a time.
pub mod fields {
    /// Document tag naming the environment target.
    pub const ENV_TARGET: &str = "envTarget";
    pub const SYSTEM_UNITS: &str = "systemUnits";
    pub const TEMPERATURE_UNIT: &str = "temperatureUnit";
    pub const ZONES: &str = "zones";
    pub const DISPLAY_ADVANCED_HR_DATA: &str = "displayAdvancedHrData";
    /// One-shot flag telling the extension to purge its local cache.
    pub const LOCAL_STORAGE_MUST_BE_CLEARED: &str = "localStorageMustBeCleared";
    pub const SYNC_ON_STARTUP: &str = "syncOnStartup";
}

/// Deployment flavor selecting the default settings template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvTarget {
    /// Browser extension.
    #[default]
    Extension,
    /// Desktop application.
    Desktop,
}

impl EnvTarget {
    /// Lowercase name, as stored.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EnvTarget::Extension => "extension",
            EnvTarget::Desktop => "desktop",
        }
    }
}

impl fmt::Display for EnvTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvTarget {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "extension" | "ext" => Ok(EnvTarget::Extension),
            "desktop" | "app" => Ok(EnvTarget::Desktop),
            _ => Err(ModelError::UnknownEnvTarget(s.to_string())),
        }
    }
}

/// Distance and speed units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemUnits {
    #[default]
    Metric,
    Imperial,
}

/// Temperature unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Settings document used by the browser extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtensionUserSettings {
    pub system_units: SystemUnits,
    pub temperature_unit: TemperatureUnit,
    pub zones: UserZones,
    pub display_motivation_score: bool,
    pub display_activity_ratio: bool,
    pub display_advanced_power_data: bool,
    pub display_advanced_speed_data: bool,
    pub display_advanced_hr_data: bool,
    pub display_cadence_data: bool,
    pub display_advanced_grade_data: bool,
    pub display_advanced_elevation_data: bool,
    pub display_bike_odo_in_activity: bool,
    pub display_activity_best_splits: bool,
    pub display_running_performance_index: bool,
    pub display_segment_rank_percentage: bool,
    pub enable_both_legs_cadence: bool,
    pub feed_hide_challenges: bool,
    pub feed_hide_created_routes: bool,
    pub feed_hide_virtual_rides: bool,
    /// Hide ride activities shorter than this many km (0 disables).
    pub feed_hide_ride_activities_under_distance: u32,
    /// Hide run activities shorter than this many km (0 disables).
    pub feed_hide_run_activities_under_distance: u32,
    pub default_leader_board_filter: String,
    pub remote_links: bool,
    pub local_storage_must_be_cleared: bool,
}

impl Default for ExtensionUserSettings {
    fn default() -> Self {
        Self {
            system_units: SystemUnits::Metric,
            temperature_unit: TemperatureUnit::Celsius,
            zones: UserZones::default(),
            display_motivation_score: true,
            display_activity_ratio: true,
            display_advanced_power_data: true,
            display_advanced_speed_data: true,
            display_advanced_hr_data: true,
            display_cadence_data: true,
            display_advanced_grade_data: true,
            display_advanced_elevation_data: true,
            display_bike_odo_in_activity: true,
            display_activity_best_splits: true,
            display_running_performance_index: true,
            display_segment_rank_percentage: true,
            enable_both_legs_cadence: false,
            feed_hide_challenges: false,
            feed_hide_created_routes: false,
            feed_hide_virtual_rides: false,
            feed_hide_ride_activities_under_distance: 0,
            feed_hide_run_activities_under_distance: 0,
            default_leader_board_filter: "overall".to_string(),
            remote_links: true,
            local_storage_must_be_cleared: false,
        }
    }
}

/// Settings document used by the desktop application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesktopUserSettings {
    pub system_units: SystemUnits,
    pub temperature_unit: TemperatureUnit,
    pub zones: UserZones,
    /// Start an activity sync when the application opens.
    pub sync_on_startup: bool,
    /// Activities shown per page in the activity list.
    pub activities_page_size: u32,
}

impl Default for DesktopUserSettings {
    fn default() -> Self {
        Self {
            system_units: SystemUnits::Metric,
            temperature_unit: TemperatureUnit::Celsius,
            zones: UserZones::default(),
            sync_on_startup: true,
            activities_page_size: 25,
        }
    }
}

/// A user settings document, tagged with its environment target.
///
/// Serialized as a flat JSON object carrying an `envTarget` field.
///
/// ```
/// use elevate_types::{EnvTarget, UserSettings};
///
/// let settings = UserSettings::defaults(EnvTarget::Extension);
/// let json = serde_json::to_value(&settings).unwrap();
/// assert_eq!(json["envTarget"], "extension");
/// assert_eq!(json["localStorageMustBeCleared"], false);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "envTarget", rename_all = "lowercase")]
pub enum UserSettings {
    Extension(ExtensionUserSettings),
    Desktop(DesktopUserSettings),
}

impl UserSettings {
    /// Default document for an environment target.
    #[must_use]
    pub fn defaults(target: EnvTarget) -> Self {
        match target {
            EnvTarget::Extension => UserSettings::Extension(ExtensionUserSettings::default()),
            EnvTarget::Desktop => UserSettings::Desktop(DesktopUserSettings::default()),
        }
    }

    /// Environment target this document belongs to.
    #[must_use]
    pub fn env_target(&self) -> EnvTarget {
        match self {
            UserSettings::Extension(_) => EnvTarget::Extension,
            UserSettings::Desktop(_) => EnvTarget::Desktop,
        }
    }

    #[must_use]
    pub fn system_units(&self) -> SystemUnits {
        match self {
            UserSettings::Extension(s) => s.system_units,
            UserSettings::Desktop(s) => s.system_units,
        }
    }

    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        match self {
            UserSettings::Extension(s) => s.temperature_unit,
            UserSettings::Desktop(s) => s.temperature_unit,
        }
    }

    /// Zone sets of this document.
    #[must_use]
    pub fn zones(&self) -> &UserZones {
        match self {
            UserSettings::Extension(s) => &s.zones,
            UserSettings::Desktop(s) => &s.zones,
        }
    }

    /// Mutable zone sets of this document.
    pub fn zones_mut(&mut self) -> &mut UserZones {
        match self {
            UserSettings::Extension(s) => &mut s.zones,
            UserSettings::Desktop(s) => &mut s.zones,
        }
    }

    /// Whether the extension must purge its local cache on next load.
    ///
    /// Always `false` for desktop documents.
    #[must_use]
    pub fn local_storage_must_be_cleared(&self) -> bool {
        match self {
            UserSettings::Extension(s) => s.local_storage_must_be_cleared,
            UserSettings::Desktop(_) => false,
        }
    }

    /// Document as a JSON object.
    pub fn to_json(&self) -> Result<serde_json::Map<String, serde_json::Value>, ModelError> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(ModelError::invalid_value(
                fields::ENV_TARGET,
                format!("settings serialized to a non-object value: {other}"),
            )),
        }
    }

    /// Value of a single top-level field, if the document has it.
    pub fn get_option(&self, key: &str) -> Result<Option<serde_json::Value>, ModelError> {
        Ok(self.to_json()?.remove(key))
    }

    /// Names of every top-level field, tag included.
    pub fn field_names(&self) -> Result<Vec<String>, ModelError> {
        Ok(self.to_json()?.into_iter().map(|(key, _)| key).collect())
    }
}
