//! Data models for stored data.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use elevate_types::{EnvTarget, UserSettings};

/// The settings document as stored, with bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    /// The document itself.
    pub settings: UserSettings,
    /// When the document was first inserted (reset on overwrite).
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the document was last written.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl StoredSettings {
    /// Environment target of the stored document.
    pub fn env_target(&self) -> EnvTarget {
        self.settings.env_target()
    }

    /// Consume the record, keeping only the document.
    pub fn into_settings(self) -> UserSettings {
        self.settings
    }
}
