//! Zone set validation against a [`ZoneDefinition`].
//!
//! A zone set is accepted when it has between [`MIN_ZONES_COUNT`] and
//! [`MAX_ZONES_COUNT`] zones, every boundary is a finite value inside the
//! definition's bounds and on its step, each zone is strictly increasing,
//! and each zone starts exactly where the previous one ends.
//!
//! # Example
//!
//! ```
//! use elevate_core::validation::validate_zones;
//! use elevate_types::{ZoneModel, ZoneType};
//!
//! let zones = [
//!     ZoneModel::new(0.0, 120.0),
//!     ZoneModel::new(120.0, 150.0),
//!     ZoneModel::new(150.0, 190.0),
//! ];
//! assert!(validate_zones(ZoneType::HeartRate.definition(), &zones).is_ok());
//!
//! let gap = [
//!     ZoneModel::new(0.0, 120.0),
//!     ZoneModel::new(125.0, 150.0),
//!     ZoneModel::new(150.0, 190.0),
//! ];
//! assert!(validate_zones(ZoneType::HeartRate.definition(), &gap).is_err());
//! ```

use thiserror::Error;

use elevate_types::{MAX_ZONES_COUNT, MIN_ZONES_COUNT, ZoneDefinition, ZoneModel};

/// Reason a zone set was rejected.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new rules
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ZoneValidationError {
    #[error("at least {min} zones are required, got {count}")]
    TooFewZones { count: usize, min: usize },

    #[error("at most {max} zones are allowed, got {count}")]
    TooManyZones { count: usize, max: usize },

    #[error("zone {index}: {value} is not a finite number")]
    NonFinite { index: usize, value: f64 },

    #[error("zone {index}: {value} is outside [{min}, {max}]")]
    OutOfBounds {
        index: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("zone {index}: {value} is not a multiple of {step}")]
    OffStep { index: usize, value: f64, step: f64 },

    #[error("zone {index}: 'from' ({from}) must be lower than 'to' ({to})")]
    NotIncreasing { index: usize, from: f64, to: f64 },

    #[error("zone {index} starts at {from} but the previous zone ends at {previous_to}")]
    NotContiguous {
        index: usize,
        from: f64,
        previous_to: f64,
    },
}

/// Check a zone set, stopping at the first problem.
pub fn validate_zones(
    definition: &ZoneDefinition,
    zones: &[ZoneModel],
) -> Result<(), ZoneValidationError> {
    match zone_issues(definition, zones).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}

/// Collect every problem in a zone set, in zone order.
pub fn zone_issues(definition: &ZoneDefinition, zones: &[ZoneModel]) -> Vec<ZoneValidationError> {
    let mut issues = Vec::new();

    if zones.len() < MIN_ZONES_COUNT {
        issues.push(ZoneValidationError::TooFewZones {
            count: zones.len(),
            min: MIN_ZONES_COUNT,
        });
    } else if zones.len() > MAX_ZONES_COUNT {
        issues.push(ZoneValidationError::TooManyZones {
            count: zones.len(),
            max: MAX_ZONES_COUNT,
        });
    }

    for (index, zone) in zones.iter().enumerate() {
        let mut values_ok = true;
        for value in [zone.from, zone.to] {
            if let Some(issue) = check_value(definition, index, value) {
                issues.push(issue);
                values_ok = false;
            }
        }
        if !values_ok {
            continue;
        }

        if zone.from >= zone.to {
            issues.push(ZoneValidationError::NotIncreasing {
                index,
                from: zone.from,
                to: zone.to,
            });
        }

        if let Some(previous) = index.checked_sub(1).and_then(|i| zones.get(i)) {
            // Exact equality: the stored boundary list keeps a single value
            // per edge.
            if zone.from != previous.to {
                issues.push(ZoneValidationError::NotContiguous {
                    index,
                    from: zone.from,
                    previous_to: previous.to,
                });
            }
        }
    }

    issues
}

fn check_value(
    definition: &ZoneDefinition,
    index: usize,
    value: f64,
) -> Option<ZoneValidationError> {
    if !value.is_finite() {
        return Some(ZoneValidationError::NonFinite { index, value });
    }
    if !definition.in_bounds(value) {
        return Some(ZoneValidationError::OutOfBounds {
            index,
            value,
            min: definition.min,
            max: definition.max,
        });
    }
    if !definition.is_on_step(value) {
        return Some(ZoneValidationError::OffStep {
            index,
            value,
            step: definition.step,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevate_types::{UserZones, ZoneType, deserialize_zones};

    fn speed_definition() -> ZoneDefinition {
        ZoneDefinition {
            name: "Cycling Speed",
            zone_type: ZoneType::Speed,
            units: "KPH",
            step: 0.1,
            min: 0.0,
            max: 9999.0,
            custom_display: None,
        }
    }

    fn zones_from(boundaries: &[f64]) -> Vec<ZoneModel> {
        deserialize_zones(boundaries)
    }

    #[test]
    fn test_valid_speed_zones() {
        let zones = zones_from(&[0.0, 50.0, 100.0, 150.0, 200.0, 250.0, 300.0, 400.0, 500.0]);
        assert_eq!(validate_zones(&speed_definition(), &zones), Ok(()));
    }

    #[test]
    fn test_default_zones_are_valid() {
        let defaults = UserZones::default();
        for (zone_type, boundaries) in defaults.iter() {
            let zones = deserialize_zones(boundaries);
            assert_eq!(
                validate_zones(zone_type.definition(), &zones),
                Ok(()),
                "default {zone_type} zones must validate"
            );
        }
    }

    #[test]
    fn test_too_few_and_too_many() {
        let def = speed_definition();
        let few = zones_from(&[0.0, 10.0, 20.0]);
        assert_eq!(
            validate_zones(&def, &few),
            Err(ZoneValidationError::TooFewZones { count: 2, min: 3 })
        );

        let boundaries: Vec<f64> = (0..=21).map(|i| f64::from(i) * 10.0).collect();
        let many = zones_from(&boundaries);
        assert_eq!(
            validate_zones(&def, &many),
            Err(ZoneValidationError::TooManyZones { count: 21, max: 20 })
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let zones = zones_from(&[0.0, 10.0, 20.0, 10_000.0]);
        assert_eq!(
            validate_zones(&speed_definition(), &zones),
            Err(ZoneValidationError::OutOfBounds {
                index: 2,
                value: 10_000.0,
                min: 0.0,
                max: 9999.0,
            })
        );

        let negative = zones_from(&[-1.0, 10.0, 20.0, 30.0]);
        assert!(matches!(
            validate_zones(&speed_definition(), &negative),
            Err(ZoneValidationError::OutOfBounds { index: 0, .. })
        ));
    }

    #[test]
    fn test_off_step() {
        let zones = zones_from(&[0.0, 10.05, 20.0, 30.0]);
        assert!(matches!(
            validate_zones(&speed_definition(), &zones),
            Err(ZoneValidationError::OffStep { index: 0, .. })
        ));
    }

    #[test]
    fn test_not_increasing() {
        let zones = zones_from(&[0.0, 30.0, 20.0, 40.0]);
        assert_eq!(
            validate_zones(&speed_definition(), &zones),
            Err(ZoneValidationError::NotIncreasing {
                index: 1,
                from: 30.0,
                to: 20.0,
            })
        );
    }

    #[test]
    fn test_not_contiguous() {
        let zones = vec![
            ZoneModel::new(0.0, 10.0),
            ZoneModel::new(10.0, 20.0),
            ZoneModel::new(25.0, 30.0),
        ];
        assert_eq!(
            validate_zones(&speed_definition(), &zones),
            Err(ZoneValidationError::NotContiguous {
                index: 2,
                from: 25.0,
                previous_to: 20.0,
            })
        );
    }

    #[test]
    fn test_non_finite() {
        let zones = vec![
            ZoneModel::new(0.0, 10.0),
            ZoneModel::new(10.0, f64::NAN),
            ZoneModel::new(f64::NAN, 30.0),
        ];
        assert!(matches!(
            validate_zones(&speed_definition(), &zones),
            Err(ZoneValidationError::NonFinite { index: 1, .. })
        ));
    }

    #[test]
    fn test_zone_issues_reports_everything() {
        let zones = vec![
            ZoneModel::new(0.0, 10.0),
            ZoneModel::new(12.0, 11.0),
            ZoneModel::new(11.0, 10_500.0),
        ];
        let issues = zone_issues(&speed_definition(), &zones);
        assert_eq!(issues.len(), 3);
        assert!(matches!(issues[0], ZoneValidationError::NotIncreasing { index: 1, .. }));
        assert!(matches!(issues[1], ZoneValidationError::NotContiguous { index: 1, .. }));
        assert!(matches!(issues[2], ZoneValidationError::OutOfBounds { index: 2, .. }));
    }
}
