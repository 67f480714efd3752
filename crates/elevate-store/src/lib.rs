//! Local persistence for Elevate user settings.
//!
//! This crate provides SQLite-based storage for the single user settings
//! document of a profile.
//!
//! # Features
//!
//! - Insert a document, optionally overwriting the stored one
//! - Patch individual fields of the stored document
//! - Track creation and update times
//! - Export/import the document as JSON
//!
//! # Example
//!
//! ```no_run
//! use elevate_store::Store;
//! use elevate_types::{EnvTarget, SettingsPatch, UserSettings};
//!
//! let store = Store::open_default()?;
//!
//! if store.load_settings()?.is_none() {
//!     store.insert_settings(&UserSettings::defaults(EnvTarget::Desktop), false)?;
//! }
//! let stored = store.update_settings(&SettingsPatch::field("systemUnits", "imperial"))?;
//! println!("updated at {}", stored.updated_at);
//! # Ok::<(), elevate_store::Error>(())
//! ```

mod error;
mod models;
mod schema;
mod store;

pub use error::{Error, Result};
pub use models::StoredSettings;
pub use store::Store;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/elevate/settings.db`
/// - macOS: `~/Library/Application Support/elevate/settings.db`
/// - Windows: `C:\Users\<user>\AppData\Local\elevate\settings.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("elevate")
        .join("settings.db")
}
