//! Partial updates of a settings document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, ModelResult};
use crate::settings::{UserSettings, fields};
use crate::zones::UserZones;

/// A set of top-level field replacements for a [`UserSettings`] document.
///
/// ```
/// use elevate_types::{EnvTarget, SettingsPatch, UserSettings};
///
/// let settings = UserSettings::defaults(EnvTarget::Extension);
/// let patched = SettingsPatch::field("displayAdvancedHrData", false)
///     .apply_to(&settings)
///     .unwrap();
///
/// assert_eq!(
///     patched.get_option("displayAdvancedHrData").unwrap(),
///     Some(serde_json::json!(false))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsPatch(Map<String, Value>);

impl SettingsPatch {
    /// Create an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a patch replacing a single field.
    #[must_use]
    pub fn field(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().set(key, value)
    }

    /// Create a patch replacing the whole zones map.
    pub fn zones(zones: &UserZones) -> ModelResult<Self> {
        Ok(Self::field(fields::ZONES, serde_json::to_value(zones)?))
    }

    /// Add a field replacement.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Value this patch assigns to `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Field names touched by this patch.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Apply this patch to a document, returning the patched copy.
    ///
    /// Fails without touching anything if a key is unknown to the document,
    /// names the `envTarget` tag, or carries a value of the wrong type.
    pub fn apply_to(&self, settings: &UserSettings) -> ModelResult<UserSettings> {
        let mut document = settings.to_json()?;

        for (key, value) in &self.0 {
            if key == fields::ENV_TARGET {
                return Err(ModelError::ReadOnlyField(key.clone()));
            }
            let Some(slot) = document.get_mut(key) else {
                return Err(ModelError::UnknownField(key.clone()));
            };
            *slot = value.clone();
        }

        serde_json::from_value(Value::Object(document)).map_err(|e| {
            let field = match self.0.keys().next() {
                Some(key) if self.0.len() == 1 => key.clone(),
                _ => "settings".to_string(),
            };
            ModelError::invalid_value(field, e.to_string())
        })
    }
}

impl From<Map<String, Value>> for SettingsPatch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
