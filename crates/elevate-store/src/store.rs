//! Main store implementation.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};
use time::OffsetDateTime;
use tracing::{debug, info};

use elevate_types::{SettingsPatch, UserSettings};

use crate::error::{Error, Result};
use crate::models::StoredSettings;
use crate::schema;

/// SQLite-based store for the user settings document.
pub struct Store {
    conn: Connection,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        info!("Opening settings database at {}", path.display());
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;

        schema::initialize(&conn)?;

        Ok(Self { conn })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn })
    }

    /// Load the stored settings document, if any.
    pub fn load_settings(&self) -> Result<Option<StoredSettings>> {
        load(&self.conn)
    }

    /// Insert a settings document.
    ///
    /// Without `overwrite`, fails with [`Error::AlreadyExists`] when a
    /// document is already stored. With it, the stored document is replaced
    /// and its creation time reset.
    pub fn insert_settings(
        &self,
        settings: &UserSettings,
        overwrite: bool,
    ) -> Result<StoredSettings> {
        let tx = self.conn.unchecked_transaction()?;

        if !overwrite {
            if let Some(existing) = load(&tx)? {
                return Err(Error::AlreadyExists(existing.env_target()));
            }
        }

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let document = serde_json::to_string(settings)?;

        tx.execute(
            "INSERT OR REPLACE INTO user_settings (id, env_target, document, created_at, updated_at)
             VALUES (1, ?1, ?2, ?3, ?3)",
            rusqlite::params![settings.env_target().as_str(), document, now],
        )?;

        let stored = load(&tx)?.ok_or(Error::NotFound)?;
        tx.commit()?;

        info!(
            "Inserted {} settings (overwrite: {})",
            settings.env_target(),
            overwrite
        );
        Ok(stored)
    }

    /// Apply a patch to the stored document and persist the result.
    ///
    /// Fails with [`Error::NotFound`] when nothing is stored and with
    /// [`Error::Patch`] when the patch does not fit the document; the stored
    /// document is unchanged in both cases. An empty patch writes nothing.
    pub fn update_settings(&self, patch: &SettingsPatch) -> Result<StoredSettings> {
        let tx = self.conn.unchecked_transaction()?;

        let current = load(&tx)?.ok_or(Error::NotFound)?;
        if patch.is_empty() {
            return Ok(current);
        }
        let updated = patch.apply_to(&current.settings)?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        tx.execute(
            "UPDATE user_settings SET document = ?1, updated_at = ?2 WHERE id = 1",
            rusqlite::params![serde_json::to_string(&updated)?, now],
        )?;

        let stored = load(&tx)?.ok_or(Error::NotFound)?;
        tx.commit()?;

        debug!(
            "Updated settings fields: {}",
            patch.keys().collect::<Vec<_>>().join(", ")
        );
        Ok(stored)
    }

    /// Delete the stored document. Returns whether one existed.
    pub fn delete_settings(&self) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM user_settings", [])?;
        if deleted > 0 {
            info!("Deleted stored settings");
        }
        Ok(deleted > 0)
    }

    /// Export the stored document as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        let stored = self.load_settings()?.ok_or(Error::NotFound)?;
        Ok(serde_json::to_string_pretty(&stored.settings)?)
    }

    /// Import a document from JSON, as [`Store::insert_settings`] would.
    pub fn import_json(&self, json: &str, overwrite: bool) -> Result<StoredSettings> {
        let settings: UserSettings = serde_json::from_str(json)?;
        self.insert_settings(&settings, overwrite)
    }
}

fn load(conn: &Connection) -> Result<Option<StoredSettings>> {
    let row = conn
        .query_row(
            "SELECT document, created_at, updated_at FROM user_settings WHERE id = 1",
            [],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )
        .optional()?;

    let Some((document, created_at, updated_at)) = row else {
        return Ok(None);
    };

    Ok(Some(StoredSettings {
        settings: serde_json::from_str(&document)?,
        created_at: parse_timestamp(created_at)?,
        updated_at: parse_timestamp(updated_at)?,
    }))
}

fn parse_timestamp(ts: i64) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(ts).map_err(|_| Error::InvalidTimestamp(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevate_types::{EnvTarget, ModelError, SystemUnits, ZoneType};

    #[test]
    fn test_open_in_memory() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.load_settings().unwrap().is_none());
    }

    #[test]
    fn test_insert_and_load() {
        let store = Store::open_in_memory().unwrap();
        let defaults = UserSettings::defaults(EnvTarget::Desktop);

        let stored = store.insert_settings(&defaults, false).unwrap();
        assert_eq!(stored.settings, defaults);
        assert_eq!(stored.env_target(), EnvTarget::Desktop);
        assert_eq!(stored.created_at, stored.updated_at);

        let loaded = store.load_settings().unwrap().unwrap();
        assert_eq!(loaded, stored);
    }

    #[test]
    fn test_insert_without_overwrite_fails_when_present() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_settings(&UserSettings::defaults(EnvTarget::Extension), false)
            .unwrap();

        let err = store
            .insert_settings(&UserSettings::defaults(EnvTarget::Desktop), false)
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(EnvTarget::Extension)));

        // Stored document untouched
        let loaded = store.load_settings().unwrap().unwrap();
        assert_eq!(loaded.env_target(), EnvTarget::Extension);
    }

    #[test]
    fn test_insert_with_overwrite_replaces() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_settings(&UserSettings::defaults(EnvTarget::Extension), false)
            .unwrap();
        store
            .update_settings(&SettingsPatch::field("systemUnits", "imperial"))
            .unwrap();

        let defaults = UserSettings::defaults(EnvTarget::Extension);
        let stored = store.insert_settings(&defaults, true).unwrap();
        assert_eq!(stored.settings, defaults);
        assert_eq!(stored.settings.system_units(), SystemUnits::Metric);
    }

    #[test]
    fn test_update_settings() {
        let store = Store::open_in_memory().unwrap();
        store
            .insert_settings(&UserSettings::defaults(EnvTarget::Extension), false)
            .unwrap();

        let stored = store
            .update_settings(&SettingsPatch::field("localStorageMustBeCleared", true))
            .unwrap();
        assert!(stored.settings.local_storage_must_be_cleared());
        assert!(stored.updated_at >= stored.created_at);

        let loaded = store.load_settings().unwrap().unwrap();
        assert!(loaded.settings.local_storage_must_be_cleared());
    }

    #[test]
    fn test_empty_patch_writes_nothing() {
        let store = Store::open_in_memory().unwrap();
        let inserted = store
            .insert_settings(&UserSettings::defaults(EnvTarget::Desktop), false)
            .unwrap();

        let stored = store.update_settings(&SettingsPatch::new()).unwrap();
        assert_eq!(stored, inserted);
    }

    #[test]
    fn test_zone_boundaries_persist_bit_exact() {
        let store = Store::open_in_memory().unwrap();
        let boundaries = vec![0.0, 0.999_999_999_999_999_9, 1.400_000_000_000_000_1, 5.0];
        let mut settings = UserSettings::defaults(EnvTarget::Extension);
        settings
            .zones_mut()
            .set(ZoneType::Speed, boundaries.clone());
        store.insert_settings(&settings, false).unwrap();

        let loaded = store.load_settings().unwrap().unwrap();
        let read: Vec<u64> = loaded
            .settings
            .zones()
            .get(ZoneType::Speed)
            .iter()
            .map(|v| v.to_bits())
            .collect();
        let written: Vec<u64> = boundaries.iter().map(|v| v.to_bits()).collect();
        assert_eq!(read, written);
    }

    #[test]
    fn test_update_missing_document() {
        let store = Store::open_in_memory().unwrap();
        let err = store
            .update_settings(&SettingsPatch::field("systemUnits", "imperial"))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound));
    }

    #[test]
    fn test_update_unknown_field_leaves_document_unchanged() {
        let store = Store::open_in_memory().unwrap();
        let defaults = UserSettings::defaults(EnvTarget::Desktop);
        store.insert_settings(&defaults, false).unwrap();

        let err = store
            .update_settings(&SettingsPatch::field("displayNothing", true))
            .unwrap_err();
        assert!(matches!(err, Error::Patch(ModelError::UnknownField(_))));

        let loaded = store.load_settings().unwrap().unwrap();
        assert_eq!(loaded.settings, defaults);
    }

    #[test]
    fn test_delete_settings() {
        let store = Store::open_in_memory().unwrap();
        assert!(!store.delete_settings().unwrap());

        store
            .insert_settings(&UserSettings::defaults(EnvTarget::Desktop), false)
            .unwrap();
        assert!(store.delete_settings().unwrap());
        assert!(store.load_settings().unwrap().is_none());
    }

    #[test]
    fn test_export_import() {
        let source = Store::open_in_memory().unwrap();
        let mut settings = UserSettings::defaults(EnvTarget::Desktop);
        settings
            .zones_mut()
            .set(ZoneType::Speed, vec![0.0, 12.5, 25.0, 37.5]);
        source.insert_settings(&settings, false).unwrap();

        let json = source.export_json().unwrap();

        let target = Store::open_in_memory().unwrap();
        let imported = target.import_json(&json, false).unwrap();
        assert_eq!(imported.settings, settings);
    }

    #[test]
    fn test_export_without_document() {
        let store = Store::open_in_memory().unwrap();
        assert!(matches!(store.export_json(), Err(Error::NotFound)));
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.db");

        {
            let store = Store::open(&path).unwrap();
            store
                .insert_settings(&UserSettings::defaults(EnvTarget::Extension), false)
                .unwrap();
            store
                .update_settings(&SettingsPatch::field("displayAdvancedHrData", false))
                .unwrap();
        }

        let store = Store::open(&path).unwrap();
        let loaded = store.load_settings().unwrap().unwrap();
        assert_eq!(
            loaded.settings.get_option("displayAdvancedHrData").unwrap(),
            Some(serde_json::json!(false))
        );
    }
}
