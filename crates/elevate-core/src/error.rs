//! Error types for elevate-core.
//!
//! Store failures are never retried or recovered from here: they are wrapped
//! in [`Error::Store`] and handed back to the caller as-is. Zone input is
//! checked before anything reaches the store, so [`Error::InvalidZones`]
//! always means nothing was written.
//!
//! | Error | Origin | Written? |
//! |-------|--------|----------|
//! | [`Error::Store`] | SQLite, missing document, bad field patch | No |
//! | [`Error::InvalidZones`] | Zone list rejected by its definition | No |
//! | [`Error::ZoneField`] | Zones map passed as a plain option | No |
//! | [`Error::Model`] | Document could not be converted to JSON | No |

use thiserror::Error;

use elevate_types::{ModelError, ZoneType};

use crate::validation::ZoneValidationError;

/// Errors returned by the settings service and DAOs.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Error raised by the underlying settings store.
    #[error(transparent)]
    Store(#[from] elevate_store::Error),

    /// Zone input rejected before persistence.
    #[error("Invalid {zone_type} zones: {source}")]
    InvalidZones {
        /// Zone type the input was meant for.
        zone_type: ZoneType,
        /// What was wrong with it.
        #[source]
        source: ZoneValidationError,
    },

    /// The field holds zone sets, which only change through the zone operations.
    #[error("Field '{0}' cannot be set directly; edit zones with the zone operations")]
    ZoneField(String),

    /// Settings document conversion error.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl Error {
    /// Create an invalid zones error.
    pub fn invalid_zones(zone_type: ZoneType, source: ZoneValidationError) -> Self {
        Self::InvalidZones { zone_type, source }
    }

    /// Whether the store rejected an update naming a field the document lacks.
    pub fn is_unknown_field(&self) -> bool {
        matches!(
            self,
            Error::Store(elevate_store::Error::Patch(ModelError::UnknownField(_)))
        )
    }
}

/// Result type alias using elevate-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_is_transparent() {
        let err: Error = elevate_store::Error::NotFound.into();
        assert_eq!(err.to_string(), "No user settings stored");
    }

    #[test]
    fn test_invalid_zones_display() {
        let err = Error::invalid_zones(
            ZoneType::Speed,
            ZoneValidationError::TooFewZones { count: 1, min: 3 },
        );
        let text = err.to_string();
        assert!(text.contains("speed"));
        assert!(text.contains("at least 3"));
    }

    #[test]
    fn test_zone_field_display() {
        let err = Error::ZoneField("zones".to_string());
        assert!(err.to_string().contains("'zones'"));
        assert!(!err.is_unknown_field());
    }

    #[test]
    fn test_is_unknown_field() {
        let err: Error = elevate_store::Error::Patch(ModelError::UnknownField(
            "displayNothing".to_string(),
        ))
        .into();
        assert!(err.is_unknown_field());
        assert!(!Error::from(elevate_store::Error::NotFound).is_unknown_field());
    }
}
