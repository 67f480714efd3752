//! Training zones and their definitions.
//!
//! A zone set is an ordered, contiguous list of [`ZoneModel`] ranges. It is
//! stored in the compact boundary form produced by [`serialize_zones`]:
//! `[z0.from, z0.to, z1.to, ..., zn.to]`.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Fewest zones a zone set may contain.
pub const MIN_ZONES_COUNT: usize = 3;

/// Most zones a zone set may contain.
pub const MAX_ZONES_COUNT: usize = 20;

/// A single zone range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneModel {
    /// Lower boundary.
    pub from: f64,
    /// Upper boundary.
    pub to: f64,
}

impl ZoneModel {
    /// Create a zone from its boundaries.
    #[must_use]
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    /// Width of the zone.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.to - self.from
    }
}

/// Serialize a zone set into its boundary list.
///
/// Only the first zone's `from` is kept; every following zone is assumed to
/// start where the previous one ends. Validate the zones before calling this.
///
/// ```
/// use elevate_types::{ZoneModel, serialize_zones};
///
/// let zones = [ZoneModel::new(0.0, 50.0), ZoneModel::new(50.0, 100.0)];
/// assert_eq!(serialize_zones(&zones), vec![0.0, 50.0, 100.0]);
/// ```
#[must_use]
pub fn serialize_zones(zones: &[ZoneModel]) -> Vec<f64> {
    let Some(first) = zones.first() else {
        return Vec::new();
    };
    let mut boundaries = Vec::with_capacity(zones.len() + 1);
    boundaries.push(first.from);
    boundaries.extend(zones.iter().map(|zone| zone.to));
    boundaries
}

/// Deserialize a boundary list into a zone set.
///
/// Fewer than two boundaries yield an empty zone set.
#[must_use]
pub fn deserialize_zones(boundaries: &[f64]) -> Vec<ZoneModel> {
    boundaries
        .windows(2)
        .map(|pair| ZoneModel::new(pair[0], pair[1]))
        .collect()
}

/// Kind of metric a zone set categorizes.
///
/// The discriminants index into [`ZONE_DEFINITIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoneType {
    /// Heart rate in beats per minute.
    HeartRate,
    /// Cycling power in watts.
    Power,
    /// Running power in watts.
    RunningPower,
    /// Cycling cadence in revolutions per minute.
    CyclingCadence,
    /// Running cadence in steps per minute.
    RunningCadence,
    /// Grade in percent.
    Grade,
    /// Elevation in meters.
    Elevation,
    /// Ascent speed in vertical meters per hour.
    Ascent,
    /// Cycling speed in km/h.
    Speed,
    /// Running pace in seconds per km.
    Pace,
    /// Grade adjusted running pace in seconds per km.
    GradeAdjustedPace,
}

impl ZoneType {
    /// Every zone type, in definition table order.
    pub const ALL: [ZoneType; 11] = [
        ZoneType::HeartRate,
        ZoneType::Power,
        ZoneType::RunningPower,
        ZoneType::CyclingCadence,
        ZoneType::RunningCadence,
        ZoneType::Grade,
        ZoneType::Elevation,
        ZoneType::Ascent,
        ZoneType::Speed,
        ZoneType::Pace,
        ZoneType::GradeAdjustedPace,
    ];

    /// Key under which this zone set is stored.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            ZoneType::HeartRate => "heartRate",
            ZoneType::Power => "power",
            ZoneType::RunningPower => "runningPower",
            ZoneType::CyclingCadence => "cyclingCadence",
            ZoneType::RunningCadence => "runningCadence",
            ZoneType::Grade => "grade",
            ZoneType::Elevation => "elevation",
            ZoneType::Ascent => "ascent",
            ZoneType::Speed => "speed",
            ZoneType::Pace => "pace",
            ZoneType::GradeAdjustedPace => "gradeAdjustedPace",
        }
    }

    /// Static definition for this zone type.
    #[must_use]
    pub fn definition(self) -> &'static ZoneDefinition {
        &ZONE_DEFINITIONS[self as usize]
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ZoneType {
    type Err = ModelError;

    /// Parse a zone key. Matching ignores case, `-` and `_`, so
    /// `heartRate`, `heart-rate` and `HEART_RATE` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        ZoneType::ALL
            .into_iter()
            .find(|zone_type| zone_type.key().to_lowercase() == wanted)
            .ok_or_else(|| ModelError::UnknownZoneType(s.to_string()))
    }
}

/// Alternative rendering for zone values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomDisplay {
    /// Seconds rendered as `m:ss`.
    Pace,
}

/// Static metadata for a zone type. Used to validate and format input,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneDefinition {
    /// Human-readable name.
    pub name: &'static str,
    /// Zone type this definition describes.
    pub zone_type: ZoneType,
    /// Display unit.
    pub units: &'static str,
    /// Granularity boundaries must respect.
    pub step: f64,
    /// Lowest allowed boundary.
    pub min: f64,
    /// Highest allowed boundary.
    pub max: f64,
    /// Alternative rendering, if any.
    pub custom_display: Option<CustomDisplay>,
}

impl ZoneDefinition {
    /// Number of decimals implied by the step.
    #[must_use]
    pub fn decimals(&self) -> usize {
        if self.step >= 1.0 || self.step <= 0.0 {
            return 0;
        }
        let mut decimals = 0;
        let mut scaled = self.step;
        while decimals < 6 && (scaled - scaled.round()).abs() > 1e-9 {
            scaled *= 10.0;
            decimals += 1;
        }
        decimals
    }

    /// Whether `value` lies within `[min, max]`.
    #[must_use]
    pub fn in_bounds(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether `value` is a multiple of the step, within float tolerance.
    #[must_use]
    pub fn is_on_step(&self, value: f64) -> bool {
        if self.step <= 0.0 {
            return true;
        }
        let ratio = value / self.step;
        (ratio - ratio.round()).abs() < 1e-6
    }

    /// Render a value for display.
    ///
    /// ```
    /// use elevate_types::ZoneType;
    ///
    /// assert_eq!(ZoneType::Pace.definition().format_value(305.0), "5:05");
    /// assert_eq!(ZoneType::Speed.definition().format_value(32.5), "32.5");
    /// ```
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        match self.custom_display {
            Some(CustomDisplay::Pace) => {
                // Pace values are whole seconds well within i64.
                let total = value.round() as i64;
                format!("{}:{:02}", total / 60, total % 60)
            }
            None => format!("{:.*}", self.decimals(), value),
        }
    }
}

/// Definition table, indexed by [`ZoneType`] discriminant.
pub static ZONE_DEFINITIONS: [ZoneDefinition; 11] = [
    ZoneDefinition {
        name: "Heart Rate",
        zone_type: ZoneType::HeartRate,
        units: "BPM",
        step: 1.0,
        min: 0.0,
        max: 9999.0,
        custom_display: None,
    },
    ZoneDefinition {
        name: "Cycling Power",
        zone_type: ZoneType::Power,
        units: "Watts",
        step: 1.0,
        min: 0.0,
        max: 9999.0,
        custom_display: None,
    },
    ZoneDefinition {
        name: "Running Power",
        zone_type: ZoneType::RunningPower,
        units: "Watts",
        step: 1.0,
        min: 0.0,
        max: 9999.0,
        custom_display: None,
    },
    ZoneDefinition {
        name: "Cycling Cadence",
        zone_type: ZoneType::CyclingCadence,
        units: "RPM",
        step: 1.0,
        min: 0.0,
        max: 9999.0,
        custom_display: None,
    },
    ZoneDefinition {
        name: "Running Cadence",
        zone_type: ZoneType::RunningCadence,
        units: "SPM",
        step: 0.1,
        min: 0.0,
        max: 9999.0,
        custom_display: None,
    },
    ZoneDefinition {
        name: "Grade",
        zone_type: ZoneType::Grade,
        units: "%",
        step: 0.1,
        min: -9999.0,
        max: 9999.0,
        custom_display: None,
    },
    ZoneDefinition {
        name: "Elevation",
        zone_type: ZoneType::Elevation,
        units: "m",
        step: 5.0,
        min: 0.0,
        max: 9999.0,
        custom_display: None,
    },
    ZoneDefinition {
        name: "Ascent speed",
        zone_type: ZoneType::Ascent,
        units: "Vm/h",
        step: 5.0,
        min: 0.0,
        max: 9999.0,
        custom_display: None,
    },
    ZoneDefinition {
        name: "Cycling Speed",
        zone_type: ZoneType::Speed,
        units: "KPH",
        step: 0.1,
        min: 0.0,
        max: 9999.0,
        custom_display: None,
    },
    ZoneDefinition {
        name: "Running Pace",
        zone_type: ZoneType::Pace,
        units: "Seconds",
        step: 1.0,
        min: 0.0,
        max: 3599.0,
        custom_display: Some(CustomDisplay::Pace),
    },
    ZoneDefinition {
        name: "Running Grade Adjusted Pace",
        zone_type: ZoneType::GradeAdjustedPace,
        units: "Seconds",
        step: 1.0,
        min: 0.0,
        max: 3599.0,
        custom_display: Some(CustomDisplay::Pace),
    },
];

const DEFAULT_HEART_RATE: [f64; 7] = [0.0, 120.0, 140.0, 155.0, 170.0, 185.0, 240.0];
const DEFAULT_POWER: [f64; 9] = [0.0, 110.0, 150.0, 180.0, 210.0, 240.0, 300.0, 400.0, 2000.0];
const DEFAULT_RUNNING_POWER: [f64; 8] = [0.0, 150.0, 200.0, 250.0, 300.0, 350.0, 400.0, 2000.0];
const DEFAULT_CYCLING_CADENCE: [f64; 9] = [0.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 130.0, 250.0];
const DEFAULT_RUNNING_CADENCE: [f64; 8] = [0.0, 140.0, 150.0, 160.0, 170.0, 180.0, 190.0, 250.0];
const DEFAULT_GRADE: [f64; 10] = [-100.0, -10.0, -5.0, -2.0, -1.0, 1.0, 2.0, 5.0, 10.0, 100.0];
const DEFAULT_ELEVATION: [f64; 9] = [0.0, 250.0, 500.0, 750.0, 1000.0, 1500.0, 2000.0, 3000.0, 5000.0];
const DEFAULT_ASCENT: [f64; 9] = [0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 750.0, 1000.0, 2000.0];
const DEFAULT_SPEED: [f64; 10] = [0.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 50.0, 100.0];
const DEFAULT_PACE: [f64; 11] = [
    0.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0, 360.0, 420.0, 600.0, 3599.0,
];

/// Serialized zone sets for every zone type.
///
/// Missing keys in a stored document fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserZones {
    pub heart_rate: Vec<f64>,
    pub power: Vec<f64>,
    pub running_power: Vec<f64>,
    pub cycling_cadence: Vec<f64>,
    pub running_cadence: Vec<f64>,
    pub grade: Vec<f64>,
    pub elevation: Vec<f64>,
    pub ascent: Vec<f64>,
    pub speed: Vec<f64>,
    pub pace: Vec<f64>,
    pub grade_adjusted_pace: Vec<f64>,
}

impl Default for UserZones {
    fn default() -> Self {
        Self {
            heart_rate: DEFAULT_HEART_RATE.to_vec(),
            power: DEFAULT_POWER.to_vec(),
            running_power: DEFAULT_RUNNING_POWER.to_vec(),
            cycling_cadence: DEFAULT_CYCLING_CADENCE.to_vec(),
            running_cadence: DEFAULT_RUNNING_CADENCE.to_vec(),
            grade: DEFAULT_GRADE.to_vec(),
            elevation: DEFAULT_ELEVATION.to_vec(),
            ascent: DEFAULT_ASCENT.to_vec(),
            speed: DEFAULT_SPEED.to_vec(),
            pace: DEFAULT_PACE.to_vec(),
            grade_adjusted_pace: DEFAULT_PACE.to_vec(),
        }
    }
}

impl UserZones {
    /// Serialized boundaries for a zone type.
    #[must_use]
    pub fn get(&self, zone_type: ZoneType) -> &[f64] {
        match zone_type {
            ZoneType::HeartRate => &self.heart_rate,
            ZoneType::Power => &self.power,
            ZoneType::RunningPower => &self.running_power,
            ZoneType::CyclingCadence => &self.cycling_cadence,
            ZoneType::RunningCadence => &self.running_cadence,
            ZoneType::Grade => &self.grade,
            ZoneType::Elevation => &self.elevation,
            ZoneType::Ascent => &self.ascent,
            ZoneType::Speed => &self.speed,
            ZoneType::Pace => &self.pace,
            ZoneType::GradeAdjustedPace => &self.grade_adjusted_pace,
        }
    }

    /// Replace the serialized boundaries for a zone type.
    pub fn set(&mut self, zone_type: ZoneType, boundaries: Vec<f64>) {
        let slot = match zone_type {
            ZoneType::HeartRate => &mut self.heart_rate,
            ZoneType::Power => &mut self.power,
            ZoneType::RunningPower => &mut self.running_power,
            ZoneType::CyclingCadence => &mut self.cycling_cadence,
            ZoneType::RunningCadence => &mut self.running_cadence,
            ZoneType::Grade => &mut self.grade,
            ZoneType::Elevation => &mut self.elevation,
            ZoneType::Ascent => &mut self.ascent,
            ZoneType::Speed => &mut self.speed,
            ZoneType::Pace => &mut self.pace,
            ZoneType::GradeAdjustedPace => &mut self.grade_adjusted_pace,
        };
        *slot = boundaries;
    }

    /// Deserialized zone set for a zone type.
    #[must_use]
    pub fn zones(&self, zone_type: ZoneType) -> Vec<ZoneModel> {
        deserialize_zones(self.get(zone_type))
    }

    /// Serialize and store a zone set.
    pub fn set_zones(&mut self, zone_type: ZoneType, zones: &[ZoneModel]) {
        self.set(zone_type, serialize_zones(zones));
    }

    /// Iterate over every zone type with its serialized boundaries.
    pub fn iter(&self) -> impl Iterator<Item = (ZoneType, &[f64])> {
        ZoneType::ALL
            .into_iter()
            .map(move |zone_type| (zone_type, self.get(zone_type)))
    }
}
