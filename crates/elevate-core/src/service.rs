//! User settings service.
//!
//! [`UserSettingsService`] is the business-level entry point for reading and
//! changing settings. It never talks to storage directly; every read and
//! write goes through a [`UserSettingsDao`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use elevate_types::{
    EnvTarget, SettingsPatch, UserSettings, ZoneDefinition, ZoneModel, ZoneType, fields,
};

use crate::error::{Error, Result};
use crate::traits::UserSettingsDao;
use crate::validation::validate_zones;

/// Settings operations over a shared DAO.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use elevate_core::{MockUserSettingsDao, UserSettingsService};
/// use elevate_types::{EnvTarget, SystemUnits};
///
/// #[tokio::main]
/// async fn main() -> elevate_core::Result<()> {
///     let service = UserSettingsService::new(Arc::new(MockUserSettingsDao::new(EnvTarget::Desktop)));
///     let updated = service.update_option("systemUnits", "imperial").await?;
///     assert_eq!(updated.system_units(), SystemUnits::Imperial);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct UserSettingsService<D: UserSettingsDao + ?Sized> {
    dao: Arc<D>,
}

impl<D: UserSettingsDao + ?Sized> Clone for UserSettingsService<D> {
    fn clone(&self) -> Self {
        Self {
            dao: Arc::clone(&self.dao),
        }
    }
}

impl<D: UserSettingsDao + ?Sized> UserSettingsService<D> {
    pub fn new(dao: Arc<D>) -> Self {
        Self { dao }
    }

    /// The underlying DAO.
    pub fn dao(&self) -> &Arc<D> {
        &self.dao
    }

    /// Environment target of the underlying DAO.
    pub fn env_target(&self) -> EnvTarget {
        self.dao.env_target()
    }

    /// Current settings, created from the environment defaults on first use.
    pub async fn fetch(&self) -> Result<UserSettings> {
        self.dao.find_one().await
    }

    /// Replace one top-level field and return the updated document.
    ///
    /// Fails with a store error when the document has no field `key`, and
    /// with [`Error::ZoneField`] for the zones map, which only changes through
    /// [`update_zones`](Self::update_zones) and [`reset_zones`](Self::reset_zones).
    pub async fn update_option(
        &self,
        key: &str,
        value: impl Into<Value>,
    ) -> Result<UserSettings> {
        if key == fields::ZONES {
            return Err(Error::ZoneField(key.to_string()));
        }
        debug!("Updating settings option {}", key);
        self.dao.update(&SettingsPatch::field(key, value)).await
    }

    /// Restore every zone set to the environment defaults.
    pub async fn reset_zones(&self) -> Result<UserSettings> {
        // Read first so a missing document is created before the update.
        self.fetch().await?;

        let defaults = UserSettings::defaults(self.env_target());
        let patch = SettingsPatch::zones(defaults.zones())?;
        let updated = self.dao.update(&patch).await?;

        info!("Zones reset to {} defaults", self.env_target());
        Ok(updated)
    }

    /// Validate and store one zone set, returning it as read back.
    ///
    /// Invalid input is rejected with [`Error::InvalidZones`] before the
    /// DAO is touched.
    pub async fn update_zones(
        &self,
        definition: &ZoneDefinition,
        zones: &[ZoneModel],
    ) -> Result<Vec<ZoneModel>> {
        let zone_type = definition.zone_type;
        validate_zones(definition, zones).map_err(|e| Error::invalid_zones(zone_type, e))?;

        let current = self.fetch().await?;
        let mut user_zones = current.zones().clone();
        user_zones.set_zones(zone_type, zones);

        let updated = self.dao.update(&SettingsPatch::zones(&user_zones)?).await?;

        info!("Saved {} {} zones", zones.len(), zone_type);
        Ok(updated.zones().zones(zone_type))
    }

    /// Deserialized zone set for one zone type.
    pub async fn zones(&self, zone_type: ZoneType) -> Result<Vec<ZoneModel>> {
        Ok(self.fetch().await?.zones().zones(zone_type))
    }

    /// Replace the whole document with the environment defaults.
    pub async fn reset(&self) -> Result<UserSettings> {
        let defaults = UserSettings::defaults(self.env_target());
        let inserted = self.dao.insert(&defaults, true).await?;
        info!("Settings reset to {} defaults", self.env_target());
        Ok(inserted)
    }

    /// Ask the extension to purge its local cache the next time it loads.
    pub async fn clear_local_storage_on_next_load(&self) -> Result<UserSettings> {
        self.update_option(fields::LOCAL_STORAGE_MUST_BE_CLEARED, true)
            .await
    }

    /// Consume a pending local cache purge request.
    ///
    /// Returns `true` and lowers the flag when one was pending. Desktop
    /// documents never carry the flag and always return `false`.
    pub async fn take_local_storage_clear_request(&self) -> Result<bool> {
        let current = self.fetch().await?;
        if !current.local_storage_must_be_cleared() {
            return Ok(false);
        }

        self.update_option(fields::LOCAL_STORAGE_MUST_BE_CLEARED, false)
            .await?;
        info!("Local storage clear request consumed");
        Ok(true)
    }
}
