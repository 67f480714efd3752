//! User settings and training zone management for Elevate.
//!
//! This crate holds the business rules around the single user settings
//! document: reading it (with defaults on first use), changing single
//! options, resetting, and editing the training zone sets it carries.
//!
//! # Features
//!
//! - **Settings service**: fetch, update one option, reset all or only zones
//! - **Zone validation**: bounds, step, ordering and contiguity checks
//! - **Zone editing**: add, remove, and resize zones while staying contiguous
//! - **Pluggable storage**: any [`UserSettingsDao`]; SQLite and in-memory
//!   implementations are included
//!
//! # Environment targets
//!
//! | Target | Extra fields | Local storage flag |
//! |--------|--------------|--------------------|
//! | `extension` | display and feed options | yes |
//! | `desktop` | `syncOnStartup`, `activitiesPageSize` | no |
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use elevate_core::{SqliteUserSettingsDao, UserSettingsService};
//! use elevate_types::{EnvTarget, ZoneModel, ZoneType};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dao = SqliteUserSettingsDao::open_default(EnvTarget::Desktop)?;
//!     let service = UserSettingsService::new(Arc::new(dao));
//!
//!     let settings = service.fetch().await?;
//!     println!("Units: {:?}", settings.system_units());
//!
//!     let zones = [
//!         ZoneModel::new(0.0, 20.0),
//!         ZoneModel::new(20.0, 30.0),
//!         ZoneModel::new(30.0, 45.0),
//!     ];
//!     service.update_zones(ZoneType::Speed.definition(), &zones).await?;
//!     Ok(())
//! }
//! ```

pub mod dao;
pub mod editor;
pub mod error;
pub mod mock;
pub mod service;
pub mod traits;
pub mod validation;

pub use dao::SqliteUserSettingsDao;
pub use editor::{ZoneEditError, ZoneSetEditor};
pub use error::{Error, Result};
pub use mock::MockUserSettingsDao;
pub use service::UserSettingsService;
pub use traits::UserSettingsDao;
pub use validation::{ZoneValidationError, validate_zones, zone_issues};
