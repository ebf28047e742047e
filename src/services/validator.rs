// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Measurement validation.
//!
//! Rules are checked in a fixed order and the first failure wins, so the
//! same bad form always highlights the same field:
//! 1. distance: finite and > 0
//! 2. duration: finite and > 0
//! 3. runs: cadence finite and > 0
//! 4. rides: elevation gain finite (any sign)

use serde::Serialize;
use std::fmt;

use crate::models::{Candidate, WorkoutKind};

/// Form field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Distance => "distance",
            Field::Duration => "duration",
            Field::Cadence => "cadence",
            Field::Elevation => "elevation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-correctable validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{}", message(.field))]
pub struct FieldError {
    pub field: Field,
}

impl FieldError {
    fn new(field: Field) -> Self {
        Self { field }
    }

    pub fn message(&self) -> &'static str {
        message(&self.field)
    }
}

fn message(field: &Field) -> &'static str {
    match field {
        Field::Distance => "Distance should be a positive number",
        Field::Duration => "Duration should be a positive number",
        Field::Cadence => "Cadence should be a positive number",
        Field::Elevation => "Elevation gain should be a number",
    }
}

/// Variant-specific validated measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindMeasurement {
    Running { cadence: f64 },
    Cycling { elevation_gain: f64 },
}

/// Measurements that passed validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub distance: f64,
    pub duration: f64,
    pub extra: KindMeasurement,
}

impl Measurements {
    pub fn kind(&self) -> WorkoutKind {
        match self.extra {
            KindMeasurement::Running { .. } => WorkoutKind::Running,
            KindMeasurement::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

fn positive(value: Option<f64>, field: Field) -> Result<f64, FieldError> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(FieldError::new(field)),
    }
}

fn finite(value: Option<f64>, field: Field) -> Result<f64, FieldError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(FieldError::new(field)),
    }
}

/// Validate a candidate, returning the measurements workouts are built from.
pub fn validate(candidate: &Candidate) -> Result<Measurements, FieldError> {
    let distance = positive(candidate.distance, Field::Distance)?;
    let duration = positive(candidate.duration, Field::Duration)?;
    let extra = match candidate.kind {
        WorkoutKind::Running => KindMeasurement::Running {
            cadence: positive(candidate.cadence, Field::Cadence)?,
        },
        WorkoutKind::Cycling => KindMeasurement::Cycling {
            elevation_gain: finite(candidate.elevation_gain, Field::Elevation)?,
        },
    };

    Ok(Measurements {
        distance,
        duration,
        extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(distance: f64, duration: f64, cadence: Option<f64>) -> Candidate {
        Candidate {
            kind: WorkoutKind::Running,
            distance: Some(distance),
            duration: Some(duration),
            cadence,
            elevation_gain: None,
        }
    }

    fn cycling(distance: f64, duration: f64, elevation_gain: Option<f64>) -> Candidate {
        Candidate {
            kind: WorkoutKind::Cycling,
            distance: Some(distance),
            duration: Some(duration),
            cadence: None,
            elevation_gain,
        }
    }

    fn failed_field(candidate: Candidate) -> Field {
        validate(&candidate).unwrap_err().field
    }

    #[test]
    fn test_zero_distance_rejected() {
        assert_eq!(failed_field(running(0.0, 25.0, Some(180.0))), Field::Distance);
    }

    #[test]
    fn test_negative_duration_rejected() {
        assert_eq!(failed_field(running(5.0, -5.0, Some(180.0))), Field::Duration);
    }

    #[test]
    fn test_missing_cadence_rejected() {
        assert_eq!(failed_field(running(5.0, 25.0, None)), Field::Cadence);
    }

    #[test]
    fn test_nan_elevation_rejected() {
        assert_eq!(failed_field(cycling(5.0, 25.0, Some(f64::NAN))), Field::Elevation);
        assert_eq!(failed_field(cycling(5.0, 25.0, None)), Field::Elevation);
    }

    #[test]
    fn test_negative_elevation_allowed() {
        let measurements = validate(&cycling(5.0, 25.0, Some(-10.0))).unwrap();
        assert_eq!(
            measurements.extra,
            KindMeasurement::Cycling {
                elevation_gain: -10.0
            }
        );
        assert_eq!(measurements.kind(), WorkoutKind::Cycling);
    }

    #[test]
    fn test_first_failure_wins() {
        // every field is bad; distance is reported
        assert_eq!(failed_field(running(f64::NAN, 0.0, None)), Field::Distance);
        assert_eq!(failed_field(cycling(1.0, f64::INFINITY, None)), Field::Duration);
    }

    #[test]
    fn test_inapplicable_field_ignored() {
        let mut candidate = running(5.0, 25.0, Some(180.0));
        candidate.elevation_gain = Some(f64::NAN);
        assert!(validate(&candidate).is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FieldError::new(Field::Cadence).to_string(),
            "Cadence should be a positive number"
        );
        assert_eq!(
            FieldError::new(Field::Elevation).message(),
            "Elevation gain should be a number"
        );
        for field in [Field::Distance, Field::Duration, Field::Cadence, Field::Elevation] {
            let err = FieldError::new(field);
            assert_eq!(err.to_string(), err.message());
        }
        let boxed: Box<dyn std::error::Error> = Box::new(FieldError::new(Field::Distance));
        assert_eq!(boxed.to_string(), "Distance should be a positive number");
    }
}
