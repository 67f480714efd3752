//! In-memory settings DAO for testing.
//!
//! [`MockUserSettingsDao`] implements [`UserSettingsDao`] over a document
//! held in memory, so service logic can be exercised without SQLite.
//!
//! # Features
//!
//! - **Call counting**: how many times each DAO operation ran
//! - **Argument capture**: the last inserted document and the last patch
//! - **Failure injection**: make every operation fail with a store error

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use elevate_types::{EnvTarget, SettingsPatch, UserSettings};

use crate::error::{Error, Result};
use crate::traits::UserSettingsDao;

/// A mock settings DAO for testing.
///
/// # Example
///
/// ```
/// use elevate_core::{MockUserSettingsDao, UserSettingsDao};
/// use elevate_types::{EnvTarget, UserSettings};
///
/// #[tokio::main]
/// async fn main() {
///     let dao = MockUserSettingsDao::new(EnvTarget::Desktop);
///     let settings = dao.find_one().await.unwrap();
///     assert_eq!(settings, UserSettings::defaults(EnvTarget::Desktop));
///     assert_eq!(dao.find_one_count(), 1);
/// }
/// ```
pub struct MockUserSettingsDao {
    env_target: EnvTarget,
    document: RwLock<Option<UserSettings>>,
    last_insert: RwLock<Option<(UserSettings, bool)>>,
    last_patch: RwLock<Option<SettingsPatch>>,
    find_one_count: AtomicU32,
    insert_count: AtomicU32,
    update_count: AtomicU32,
    should_fail: AtomicBool,
    fail_message: RwLock<String>,
}

impl std::fmt::Debug for MockUserSettingsDao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockUserSettingsDao")
            .field("env_target", &self.env_target)
            .field("should_fail", &self.should_fail.load(Ordering::Relaxed))
            .finish()
    }
}

impl MockUserSettingsDao {
    /// Create an empty mock bound to `env_target`.
    pub fn new(env_target: EnvTarget) -> Self {
        Self {
            env_target,
            document: RwLock::new(None),
            last_insert: RwLock::new(None),
            last_patch: RwLock::new(None),
            find_one_count: AtomicU32::new(0),
            insert_count: AtomicU32::new(0),
            update_count: AtomicU32::new(0),
            should_fail: AtomicBool::new(false),
            fail_message: RwLock::new("Mock failure".to_string()),
        }
    }

    /// Create a mock that already holds `settings`.
    pub fn with_settings(env_target: EnvTarget, settings: UserSettings) -> Self {
        let mut dao = Self::new(env_target);
        *dao.document.get_mut() = Some(settings);
        dao
    }

    /// Make every subsequent operation fail (or succeed again).
    pub async fn set_should_fail(&self, fail: bool, message: Option<&str>) {
        self.should_fail.store(fail, Ordering::Relaxed);
        if let Some(msg) = message {
            *self.fail_message.write().await = msg.to_string();
        }
    }

    /// Currently held document, without counting a call.
    pub async fn stored(&self) -> Option<UserSettings> {
        self.document.read().await.clone()
    }

    /// Arguments of the last `insert` call.
    pub async fn last_insert(&self) -> Option<(UserSettings, bool)> {
        self.last_insert.read().await.clone()
    }

    /// Patch passed to the last `update` call.
    pub async fn last_patch(&self) -> Option<SettingsPatch> {
        self.last_patch.read().await.clone()
    }

    pub fn find_one_count(&self) -> u32 {
        self.find_one_count.load(Ordering::Relaxed)
    }

    pub fn insert_count(&self) -> u32 {
        self.insert_count.load(Ordering::Relaxed)
    }

    pub fn update_count(&self) -> u32 {
        self.update_count.load(Ordering::Relaxed)
    }

    /// Total number of DAO calls of any kind.
    pub fn call_count(&self) -> u32 {
        self.find_one_count() + self.insert_count() + self.update_count()
    }

    async fn check_should_fail(&self) -> Result<()> {
        if self.should_fail.load(Ordering::Relaxed) {
            let msg = self.fail_message.read().await.clone();
            return Err(Error::Store(elevate_store::Error::Io(
                std::io::Error::other(msg),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl UserSettingsDao for MockUserSettingsDao {
    fn env_target(&self) -> EnvTarget {
        self.env_target
    }

    async fn find_one(&self) -> Result<UserSettings> {
        self.find_one_count.fetch_add(1, Ordering::Relaxed);
        self.check_should_fail().await?;

        let mut document = self.document.write().await;
        Ok(document
            .get_or_insert_with(|| UserSettings::defaults(self.env_target))
            .clone())
    }

    async fn insert(&self, settings: &UserSettings, overwrite: bool) -> Result<UserSettings> {
        self.insert_count.fetch_add(1, Ordering::Relaxed);
        *self.last_insert.write().await = Some((settings.clone(), overwrite));
        self.check_should_fail().await?;

        let mut document = self.document.write().await;
        if let Some(existing) = document.as_ref()
            && !overwrite
        {
            return Err(elevate_store::Error::AlreadyExists(existing.env_target()).into());
        }
        *document = Some(settings.clone());
        Ok(settings.clone())
    }

    async fn update(&self, patch: &SettingsPatch) -> Result<UserSettings> {
        self.update_count.fetch_add(1, Ordering::Relaxed);
        *self.last_patch.write().await = Some(patch.clone());
        self.check_should_fail().await?;

        let mut document = self.document.write().await;
        let current = document.get_or_insert_with(|| UserSettings::defaults(self.env_target));
        let updated = patch
            .apply_to(current)
            .map_err(elevate_store::Error::Patch)?;
        *current = updated.clone();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_one_materializes_defaults() {
        let dao = MockUserSettingsDao::new(EnvTarget::Extension);
        assert!(dao.stored().await.is_none());

        let settings = dao.find_one().await.unwrap();
        assert_eq!(settings, UserSettings::defaults(EnvTarget::Extension));
        assert_eq!(dao.stored().await, Some(settings));
        assert_eq!(dao.find_one_count(), 1);
    }

    #[tokio::test]
    async fn test_insert_without_overwrite_conflicts() {
        let dao = MockUserSettingsDao::with_settings(
            EnvTarget::Desktop,
            UserSettings::defaults(EnvTarget::Desktop),
        );
        let err = dao
            .insert(&UserSettings::defaults(EnvTarget::Desktop), false)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Store(elevate_store::Error::AlreadyExists(EnvTarget::Desktop))
        ));
        assert_eq!(dao.insert_count(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_field() {
        let dao = MockUserSettingsDao::new(EnvTarget::Desktop);
        let err = dao
            .update(&SettingsPatch::field("localStorageMustBeCleared", true))
            .await
            .unwrap_err();
        assert!(err.is_unknown_field());
        assert_eq!(
            dao.last_patch().await,
            Some(SettingsPatch::field("localStorageMustBeCleared", true))
        );
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let dao = MockUserSettingsDao::new(EnvTarget::Extension);
        dao.set_should_fail(true, Some("disk full")).await;

        let err = dao.find_one().await.unwrap_err();
        assert!(err.to_string().contains("disk full"));
        assert!(dao.stored().await.is_none());

        dao.set_should_fail(false, None).await;
        assert!(dao.find_one().await.is_ok());
        assert_eq!(dao.find_one_count(), 2);
    }
}
