// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record model.
//!
//! A workout is either a run or a ride. Both share identity, date, the two
//! base measurements and a geographic path; each variant carries one extra
//! measurement and the metric derived from distance and duration.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::services::validator::{KindMeasurement, Measurements};

/// Number of trailing clock digits kept in a generated id.
const ID_DIGITS: usize = 10;

/// Opaque, unique workout identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derive an id from a Unix millisecond timestamp, keeping the last ten digits.
    pub fn from_millis(millis: i64) -> Self {
        let digits = millis.unsigned_abs().to_string();
        let start = digits.len().saturating_sub(ID_DIGITS);
        Self(digits[start..].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkoutId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Discriminant selecting the workout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    /// Storage/wire name (`"running"` or `"cycling"`).
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkoutKind::Running => f.write_str("Running"),
            WorkoutKind::Cycling => f.write_str("Cycling"),
        }
    }
}

/// A single (latitude, longitude) point in degrees.
///
/// Serialized as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
#[validate(schema(function = "validate_coordinate"))]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

fn validate_coordinate(c: &Coordinate) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&c.lat) {
        return Err(ValidationError::new("latitude_range"));
    }
    if !(-180.0..=180.0).contains(&c.lng) {
        return Err(ValidationError::new("longitude_range"));
    }
    Ok(())
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lat, c.lng]
    }
}

/// Non-empty ordered trace of a workout. The first point is the marker location.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeoPath(Vec<Coordinate>);

impl GeoPath {
    /// Returns `None` for an empty point list.
    pub fn new(points: Vec<Coordinate>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self(points))
        }
    }

    pub fn single(point: Coordinate) -> Self {
        Self(vec![point])
    }

    pub fn start(&self) -> Coordinate {
        self.0[0]
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Path as a `geo` line string (x = longitude, y = latitude).
    pub fn to_line_string(&self) -> geo::LineString<f64> {
        self.0
            .iter()
            .map(|c| geo::coord! { x: c.lng, y: c.lat })
            .collect()
    }
}

/// Variant-specific measurement and its derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetails {
    Running {
        /// steps/min
        cadence: f64,
        /// min/km, 3 decimals
        pace: f64,
    },
    Cycling {
        /// meters, any sign
        elevation_gain: f64,
        /// km/h, 2 decimals
        speed: f64,
    },
}

/// One logged activity session.
///
/// Fields are private so the derived metric can never drift from distance
/// and duration: the only way to change a measurement is to build a new
/// workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    date: DateTime<Utc>,
    /// km
    distance: f64,
    /// min
    duration: f64,
    path: GeoPath,
    details: WorkoutDetails,
}

impl Workout {
    /// Build a workout from validated measurements.
    ///
    /// `date` defaults to `now` and `id` to a token derived from `now`.
    /// Dates are kept at millisecond precision so they survive storage unchanged.
    pub fn new(
        measurements: Measurements,
        path: GeoPath,
        date: Option<DateTime<Utc>>,
        id: Option<WorkoutId>,
        now: DateTime<Utc>,
    ) -> Self {
        let Measurements {
            distance,
            duration,
            extra,
        } = measurements;
        let details = match extra {
            KindMeasurement::Running { cadence } => WorkoutDetails::Running {
                cadence,
                pace: calc_pace(distance, duration),
            },
            KindMeasurement::Cycling { elevation_gain } => WorkoutDetails::Cycling {
                elevation_gain,
                speed: calc_speed(distance, duration),
            },
        };

        Self {
            id: id.unwrap_or_else(|| WorkoutId::from_millis(now.timestamp_millis())),
            date: date.unwrap_or(now).trunc_subsecs(3),
            distance,
            duration,
            path,
            details,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn path(&self) -> &GeoPath {
        &self.path
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.details {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    /// Pace (min/km) for runs, speed (km/h) for rides.
    pub fn derived_metric(&self) -> f64 {
        match self.details {
            WorkoutDetails::Running { pace, .. } => pace,
            WorkoutDetails::Cycling { speed, .. } => speed,
        }
    }

    pub fn cadence(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { cadence, .. } => Some(cadence),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    pub fn elevation_gain(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { elevation_gain, .. } => Some(elevation_gain),
            WorkoutDetails::Running { .. } => None,
        }
    }

    /// The validated measurements this workout was built from.
    pub fn measurements(&self) -> Measurements {
        let extra = match self.details {
            WorkoutDetails::Running { cadence, .. } => KindMeasurement::Running { cadence },
            WorkoutDetails::Cycling { elevation_gain, .. } => {
                KindMeasurement::Cycling { elevation_gain }
            }
        };
        Measurements {
            distance: self.distance,
            duration: self.duration,
            extra,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// min/km rounded to 3 decimals.
pub fn calc_pace(distance: f64, duration: f64) -> f64 {
    round_to(duration / distance, 3)
}

/// km/h rounded to 2 decimals.
pub fn calc_speed(distance: f64, duration: f64) -> f64 {
    round_to(distance / (duration / 60.0), 2)
}
