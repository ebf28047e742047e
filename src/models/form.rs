// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Raw form input as captured by the UI, and the numeric candidate
//! extracted from it for validation.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::workout::{Workout, WorkoutKind};

/// Form field contents exactly as typed by the user.
///
/// The last field is cadence for runs and elevation gain for rides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FormInput {
    pub kind: WorkoutKind,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub cadence_or_elevation: String,
}

impl FormInput {
    /// Empty form of the given kind.
    pub fn blank(kind: WorkoutKind) -> Self {
        Self {
            kind,
            distance: String::new(),
            duration: String::new(),
            cadence_or_elevation: String::new(),
        }
    }

    /// Pre-populated edit form for an existing workout.
    pub fn from_workout(workout: &Workout) -> Self {
        let extra = workout
            .cadence()
            .or(workout.elevation_gain())
            .map(|v| v.to_string())
            .unwrap_or_default();
        Self {
            kind: workout.kind(),
            distance: workout.distance().to_string(),
            duration: workout.duration().to_string(),
            cadence_or_elevation: extra,
        }
    }

    /// Convert text fields to numbers.
    ///
    /// Blank text is absent. Text that does not parse becomes NaN so the
    /// validator reports it against the right field.
    pub fn to_candidate(&self) -> Candidate {
        let extra = parse_field(&self.cadence_or_elevation);
        let (cadence, elevation_gain) = match self.kind {
            WorkoutKind::Running => (extra, None),
            WorkoutKind::Cycling => (None, extra),
        };
        Candidate {
            kind: self.kind,
            distance: parse_field(&self.distance),
            duration: parse_field(&self.duration),
            cadence,
            elevation_gain,
        }
    }
}

fn parse_field(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.parse::<f64>().unwrap_or(f64::NAN))
}

/// Numeric view of a form, prior to validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub kind: WorkoutKind,
    pub distance: Option<f64>,
    pub duration: Option<f64>,
    pub cadence: Option<f64>,
    pub elevation_gain: Option<f64>,
}
