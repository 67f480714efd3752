//! Trait abstractions for settings persistence.
//!
//! This module provides the [`UserSettingsDao`] trait that abstracts over
//! the SQLite-backed store and the in-memory mock used in tests.

use async_trait::async_trait;

use elevate_types::{EnvTarget, SettingsPatch, UserSettings};

use crate::error::Result;

/// Persistence boundary for the user settings document.
///
/// Implementations are bound to one [`EnvTarget`], which selects the default
/// document materialized when nothing is stored yet. They serialize their
/// own access; callers get no protection against overlapping writes.
///
/// # Example
///
/// ```ignore
/// use elevate_core::{Result, UserSettingsDao};
///
/// async fn print_units<D: UserSettingsDao>(dao: &D) -> Result<()> {
///     let settings = dao.find_one().await?;
///     println!("Units: {:?}", settings.system_units());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait UserSettingsDao: Send + Sync {
    /// Environment target whose defaults seed a new document.
    fn env_target(&self) -> EnvTarget;

    /// Return the stored document, creating it from the environment
    /// defaults when none exists.
    async fn find_one(&self) -> Result<UserSettings>;

    /// Insert a document. Without `overwrite`, fails when one is stored.
    async fn insert(&self, settings: &UserSettings, overwrite: bool) -> Result<UserSettings>;

    /// Apply a field patch to the stored document and return the result.
    async fn update(&self, patch: &SettingsPatch) -> Result<UserSettings>;
}
