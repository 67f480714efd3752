//! In-memory editing of a zone set.
//!
//! [`ZoneSetEditor`] keeps a zone list contiguous while zones are added,
//! removed, or resized. Nothing is persisted here: once the list is final,
//! hand it to [`UserSettingsService::update_zones`](crate::UserSettingsService::update_zones).

use thiserror::Error;

use elevate_types::{
    MAX_ZONES_COUNT, MIN_ZONES_COUNT, ZoneDefinition, ZoneModel, deserialize_zones,
    serialize_zones,
};

use crate::validation::{ZoneValidationError, validate_zones};

/// Errors raised while editing a zone set.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum ZoneEditError {
    /// Adding a zone would exceed the zone limit.
    #[error("cannot add a zone: already at the maximum of {0} zones")]
    TooManyZones(usize),

    /// Removing a zone would drop below the zone floor.
    #[error("cannot remove a zone: at least {0} zones are required")]
    TooFewZones(usize),

    /// The last zone already ends at the highest allowed value.
    #[error("cannot add a zone: last zone ends at {last}, the maximum is {max}")]
    NoRoom { last: f64, max: f64 },

    /// Zone or boundary index outside the zone set.
    #[error("index {index} is out of range for {count} entries")]
    IndexOutOfRange { index: usize, count: usize },

    /// A moved boundary would overlap one of its neighbours.
    #[error("boundary {value} must lie between {lower} and {upper}")]
    BoundaryOutOfOrder { value: f64, lower: f64, upper: f64 },

    /// The resulting zone set breaks a zone rule.
    #[error(transparent)]
    Invalid(#[from] ZoneValidationError),

    /// Imported text could not be read as zones.
    #[error("cannot import zones: {0}")]
    Import(String),
}

/// Editor over one zone set and its definition.
#[derive(Debug, Clone)]
pub struct ZoneSetEditor<'a> {
    definition: &'a ZoneDefinition,
    zones: Vec<ZoneModel>,
}

impl<'a> ZoneSetEditor<'a> {
    /// Start editing `zones` under `definition`.
    pub fn new(definition: &'a ZoneDefinition, zones: Vec<ZoneModel>) -> Self {
        Self { definition, zones }
    }

    /// Start editing a serialized boundary list.
    pub fn from_boundaries(definition: &'a ZoneDefinition, boundaries: &[f64]) -> Self {
        Self::new(definition, deserialize_zones(boundaries))
    }

    pub fn definition(&self) -> &'a ZoneDefinition {
        self.definition
    }

    pub fn zones(&self) -> &[ZoneModel] {
        &self.zones
    }

    pub fn into_zones(self) -> Vec<ZoneModel> {
        self.zones
    }

    /// Append a zone after the last one, as wide as the last one.
    ///
    /// The new zone is clamped to the definition's maximum.
    pub fn add_last_zone(&mut self) -> Result<&ZoneModel, ZoneEditError> {
        if self.zones.len() >= MAX_ZONES_COUNT {
            return Err(ZoneEditError::TooManyZones(MAX_ZONES_COUNT));
        }

        let (from, width) = match self.zones.last() {
            Some(last) => (last.to, last.width()),
            None => (self.definition.min, self.definition.step),
        };
        if from >= self.definition.max {
            return Err(ZoneEditError::NoRoom {
                last: from,
                max: self.definition.max,
            });
        }

        let to = self.snap((from + width.max(self.definition.step)).min(self.definition.max));
        self.zones.push(ZoneModel::new(from, to));

        // len >= 1 after push
        Ok(&self.zones[self.zones.len() - 1])
    }

    /// Remove the last zone.
    pub fn remove_last_zone(&mut self) -> Result<ZoneModel, ZoneEditError> {
        self.ensure_removable()?;
        self.zones
            .pop()
            .ok_or(ZoneEditError::TooFewZones(MIN_ZONES_COUNT))
    }

    /// Remove the zone at `index`. The following zone grows to cover it.
    pub fn remove_zone_at(&mut self, index: usize) -> Result<ZoneModel, ZoneEditError> {
        if index >= self.zones.len() {
            return Err(ZoneEditError::IndexOutOfRange {
                index,
                count: self.zones.len(),
            });
        }
        self.ensure_removable()?;

        let removed = self.zones.remove(index);
        if let Some(next) = self.zones.get_mut(index) {
            next.from = removed.from;
        }
        Ok(removed)
    }

    /// Move boundary `index` of the serialized form to `value`.
    ///
    /// Boundary `0` is the first zone's start, boundary `len` the last
    /// zone's end, and boundary `i` in between is shared by zones `i - 1`
    /// and `i`.
    pub fn update_boundary(&mut self, index: usize, value: f64) -> Result<(), ZoneEditError> {
        let mut boundaries = serialize_zones(&self.zones);
        if index >= boundaries.len() {
            return Err(ZoneEditError::IndexOutOfRange {
                index,
                count: boundaries.len(),
            });
        }

        let lower = index
            .checked_sub(1)
            .and_then(|i| boundaries.get(i))
            .copied();
        let upper = boundaries.get(index + 1).copied();
        let in_order = lower.is_none_or(|lower| value > lower)
            && upper.is_none_or(|upper| value < upper)
            && self.definition.in_bounds(value);
        if !in_order {
            return Err(ZoneEditError::BoundaryOutOfOrder {
                value,
                lower: lower.unwrap_or(self.definition.min),
                upper: upper.unwrap_or(self.definition.max),
            });
        }

        boundaries[index] = value;
        self.zones = deserialize_zones(&boundaries);
        Ok(())
    }

    /// Zone set as JSON text of its serialized boundary list.
    pub fn export(&self) -> String {
        let boundaries = serialize_zones(&self.zones);
        // A Vec<f64> always serializes; non-finite values become null.
        serde_json::to_string(&boundaries).unwrap_or_else(|_| String::from("[]"))
    }

    /// Replace the zone set with imported JSON text.
    ///
    /// Accepts a boundary list (`[0, 10, 20]`) or a list of zone objects
    /// (`[{"from": 0, "to": 10}, ...]`). The imported set must satisfy the
    /// definition, otherwise the current zones are kept.
    pub fn import(&mut self, text: &str) -> Result<(), ZoneEditError> {
        let zones = match serde_json::from_str::<Vec<f64>>(text) {
            Ok(boundaries) => deserialize_zones(&boundaries),
            Err(_) => serde_json::from_str::<Vec<ZoneModel>>(text)
                .map_err(|e| ZoneEditError::Import(e.to_string()))?,
        };

        validate_zones(self.definition, &zones)?;
        self.zones = zones;
        Ok(())
    }

    /// Whether the current zone set satisfies its definition.
    pub fn is_compliant(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate the current zone set against its definition.
    pub fn validate(&self) -> Result<(), ZoneValidationError> {
        validate_zones(self.definition, &self.zones)
    }

    fn ensure_removable(&self) -> Result<(), ZoneEditError> {
        if self.zones.len() <= MIN_ZONES_COUNT {
            return Err(ZoneEditError::TooFewZones(MIN_ZONES_COUNT));
        }
        Ok(())
    }

    fn snap(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.definition.decimals() as i32);
        (value * factor).round() / factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevate_types::ZoneType;

    fn editor(zone_type: ZoneType, boundaries: &[f64]) -> ZoneSetEditor<'static> {
        ZoneSetEditor::from_boundaries(zone_type.definition(), boundaries)
    }

    #[test]
    fn test_add_last_zone_keeps_width() {
        let mut ed = editor(ZoneType::Speed, &[0.0, 10.0, 20.0, 32.5]);
        let added = *ed.add_last_zone().unwrap();
        assert_eq!(added, ZoneModel::new(32.5, 45.0));
        assert_eq!(ed.zones().len(), 4);
        assert!(ed.is_compliant());
    }

    #[test]
    fn test_add_last_zone_clamps_to_max() {
        let mut ed = editor(ZoneType::Pace, &[0.0, 1000.0, 2000.0, 3000.0]);
        let added = *ed.add_last_zone().unwrap();
        assert_eq!(added, ZoneModel::new(3000.0, 3599.0));

        let err = ed.add_last_zone().unwrap_err();
        assert_eq!(
            err,
            ZoneEditError::NoRoom {
                last: 3599.0,
                max: 3599.0
            }
        );
    }

    #[test]
    fn test_add_last_zone_respects_limit() {
        let boundaries: Vec<f64> = (0..=MAX_ZONES_COUNT).map(|i| i as f64 * 10.0).collect();
        let mut ed = editor(ZoneType::HeartRate, &boundaries);
        assert_eq!(
            ed.add_last_zone().unwrap_err(),
            ZoneEditError::TooManyZones(MAX_ZONES_COUNT)
        );
    }

    #[test]
    fn test_remove_last_zone() {
        let mut ed = editor(ZoneType::HeartRate, &[0.0, 100.0, 120.0, 140.0, 160.0]);
        let removed = ed.remove_last_zone().unwrap();
        assert_eq!(removed, ZoneModel::new(140.0, 160.0));
        assert_eq!(ed.zones().len(), 3);

        assert_eq!(
            ed.remove_last_zone().unwrap_err(),
            ZoneEditError::TooFewZones(MIN_ZONES_COUNT)
        );
    }

    #[test]
    fn test_remove_inner_zone_merges_into_next() {
        let mut ed = editor(ZoneType::HeartRate, &[0.0, 100.0, 120.0, 140.0, 160.0]);
        let removed = ed.remove_zone_at(1).unwrap();
        assert_eq!(removed, ZoneModel::new(100.0, 120.0));
        assert_eq!(serialize_zones(ed.zones()), vec![0.0, 100.0, 140.0, 160.0]);
        assert!(ed.is_compliant());
    }

    #[test]
    fn test_remove_first_zone() {
        let mut ed = editor(ZoneType::HeartRate, &[0.0, 100.0, 120.0, 140.0, 160.0]);
        ed.remove_zone_at(0).unwrap();
        assert_eq!(serialize_zones(ed.zones()), vec![0.0, 120.0, 140.0, 160.0]);
    }

    #[test]
    fn test_remove_zone_out_of_range() {
        let mut ed = editor(ZoneType::HeartRate, &[0.0, 100.0, 120.0, 140.0, 160.0]);
        assert_eq!(
            ed.remove_zone_at(9).unwrap_err(),
            ZoneEditError::IndexOutOfRange { index: 9, count: 4 }
        );
    }

    #[test]
    fn test_update_boundary_moves_shared_edge() {
        let mut ed = editor(ZoneType::HeartRate, &[0.0, 100.0, 120.0, 140.0]);
        ed.update_boundary(1, 110.0).unwrap();
        assert_eq!(ed.zones()[0], ZoneModel::new(0.0, 110.0));
        assert_eq!(ed.zones()[1], ZoneModel::new(110.0, 120.0));

        ed.update_boundary(3, 150.0).unwrap();
        assert_eq!(ed.zones()[2].to, 150.0);
    }

    #[test]
    fn test_update_boundary_rejects_overlap() {
        let mut ed = editor(ZoneType::HeartRate, &[0.0, 100.0, 120.0, 140.0]);
        assert_eq!(
            ed.update_boundary(1, 130.0).unwrap_err(),
            ZoneEditError::BoundaryOutOfOrder {
                value: 130.0,
                lower: 0.0,
                upper: 120.0
            }
        );
        assert!(ed.update_boundary(3, 10_000.0).is_err());
        assert!(ed.update_boundary(4, 150.0).is_err());
        // Unchanged after failures
        assert_eq!(serialize_zones(ed.zones()), vec![0.0, 100.0, 120.0, 140.0]);
    }

    #[test]
    fn test_export_import() {
        let ed = editor(ZoneType::Speed, &[0.0, 12.5, 25.0, 40.0]);
        let text = ed.export();
        assert_eq!(text, "[0.0,12.5,25.0,40.0]");

        let mut other = editor(ZoneType::Speed, &[0.0, 10.0, 20.0, 30.0]);
        other.import(&text).unwrap();
        assert_eq!(other.zones(), ed.zones());
    }

    #[test]
    fn test_import_zone_objects() {
        let mut ed = editor(ZoneType::Power, &[]);
        ed.import(r#"[{"from":0,"to":100},{"from":100,"to":200},{"from":200,"to":300}]"#)
            .unwrap();
        assert_eq!(ed.zones().len(), 3);
    }

    #[test]
    fn test_import_rejects_invalid_zones() {
        let mut ed = editor(ZoneType::HeartRate, &[0.0, 100.0, 120.0, 140.0]);
        let err = ed.import("[0, 10]").unwrap_err();
        assert!(matches!(
            err,
            ZoneEditError::Invalid(ZoneValidationError::TooFewZones { .. })
        ));
        assert!(matches!(ed.import("not json"), Err(ZoneEditError::Import(_))));
        assert_eq!(ed.zones().len(), 3);
    }
}
