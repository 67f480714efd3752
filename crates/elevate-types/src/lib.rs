//! Platform-agnostic models for the Elevate fitness companion.
//!
//! This crate provides the data shared by the store, the settings service
//! and the command-line front end.
//!
//! # Features
//!
//! - User settings documents for each environment target (browser extension
//!   and desktop) with their default templates
//! - Training zone models, the static zone definition table and the compact
//!   boundary-list form zones are stored in
//! - Field patches that update a settings document one key at a time
//!
//! # Example
//!
//! ```
//! use elevate_types::{EnvTarget, UserSettings, ZoneType};
//!
//! let settings = UserSettings::defaults(EnvTarget::Desktop);
//! let speed_zones = settings.zones().zones(ZoneType::Speed);
//! assert!(!speed_zones.is_empty());
//! ```

pub mod error;
pub mod patch;
pub mod settings;
pub mod zones;

pub use error::{ModelError, ModelResult};
pub use patch::SettingsPatch;
pub use settings::{
    DesktopUserSettings, EnvTarget, ExtensionUserSettings, SystemUnits, TemperatureUnit,
    UserSettings, fields,
};
pub use zones::{
    CustomDisplay, MAX_ZONES_COUNT, MIN_ZONES_COUNT, UserZones, ZONE_DEFINITIONS, ZoneDefinition,
    ZoneModel, ZoneType, deserialize_zones, serialize_zones,
};
