//! SQLite-backed settings DAO.

use std::path::Path;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use elevate_store::Store;
use elevate_types::{EnvTarget, SettingsPatch, UserSettings};

use crate::error::Result;
use crate::traits::UserSettingsDao;

/// [`UserSettingsDao`] over an [`elevate_store::Store`].
///
/// The store connection is shared behind a [`tokio::sync::Mutex`], so each
/// DAO call runs as one store transaction.
#[derive(Debug)]
pub struct SqliteUserSettingsDao {
    store: Mutex<Store>,
    env_target: EnvTarget,
}

impl SqliteUserSettingsDao {
    /// Wrap an open store.
    pub fn new(store: Store, env_target: EnvTarget) -> Self {
        Self {
            store: Mutex::new(store),
            env_target,
        }
    }

    /// Open or create the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P, env_target: EnvTarget) -> Result<Self> {
        Ok(Self::new(Store::open(path)?, env_target))
    }

    /// Open the database at the platform default location.
    pub fn open_default(env_target: EnvTarget) -> Result<Self> {
        Ok(Self::new(Store::open_default()?, env_target))
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory(env_target: EnvTarget) -> Result<Self> {
        Ok(Self::new(Store::open_in_memory()?, env_target))
    }

    /// Remove the stored document. Returns whether one existed.
    pub async fn clear(&self) -> Result<bool> {
        Ok(self.store.lock().await.delete_settings()?)
    }

    /// Stored document as pretty-printed JSON.
    pub async fn export_json(&self) -> Result<String> {
        Ok(self.store.lock().await.export_json()?)
    }

    /// Import a document from JSON.
    pub async fn import_json(&self, json: &str, overwrite: bool) -> Result<UserSettings> {
        let stored = self.store.lock().await.import_json(json, overwrite)?;
        Ok(stored.into_settings())
    }

    /// Load the stored document, inserting the defaults when none exists.
    fn materialize(&self, store: &Store) -> Result<UserSettings> {
        if let Some(stored) = store.load_settings()? {
            if stored.env_target() != self.env_target {
                warn!(
                    "Stored settings target {} but running as {}",
                    stored.env_target(),
                    self.env_target
                );
            }
            return Ok(stored.into_settings());
        }

        info!("No settings stored, creating {} defaults", self.env_target);
        let stored = store.insert_settings(&UserSettings::defaults(self.env_target), false)?;
        Ok(stored.into_settings())
    }
}

#[async_trait]
impl UserSettingsDao for SqliteUserSettingsDao {
    fn env_target(&self) -> EnvTarget {
        self.env_target
    }

    async fn find_one(&self) -> Result<UserSettings> {
        let store = self.store.lock().await;
        self.materialize(&store)
    }

    async fn insert(&self, settings: &UserSettings, overwrite: bool) -> Result<UserSettings> {
        let store = self.store.lock().await;
        let stored = store.insert_settings(settings, overwrite)?;
        Ok(stored.into_settings())
    }

    async fn update(&self, patch: &SettingsPatch) -> Result<UserSettings> {
        let store = self.store.lock().await;
        self.materialize(&store)?;
        debug!("Applying settings patch with {} field(s)", patch.len());
        let stored = store.update_settings(patch)?;
        Ok(stored.into_settings())
    }
}
