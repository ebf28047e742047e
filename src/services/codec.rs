// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Whole-document JSON encoding of the workout list.
//!
//! The stored form is a flat array of entries tagged with `type`. This is the
//! only place where the concrete workout variant is chosen from data.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use ::validator::Validate as _;

use crate::models::{Candidate, GeoPath, Workout, WorkoutId, WorkoutKind};
use crate::services::validator;
use crate::time_utils::{format_utc_rfc3339, parse_utc_rfc3339};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Stored workouts are corrupt: {0}")]
    Corrupt(String),

    #[error("Failed to encode workouts: {0}")]
    Encode(String),
}

/// Path as stored: a list of `[lat, lng]` pairs, or a single pair in
/// entries written before paths were recorded.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredPath {
    Points(Vec<[f64; 2]>),
    Single([f64; 2]),
}

/// One flat storage entry.
#[derive(Debug, Serialize, Deserialize)]
struct StoredWorkout {
    #[serde(rename = "type")]
    kind: WorkoutKind,
    id: WorkoutId,
    /// RFC3339, millisecond precision
    date: String,
    distance: f64,
    duration: f64,
    #[serde(alias = "coords")]
    path: StoredPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
}

impl From<&Workout> for StoredWorkout {
    fn from(workout: &Workout) -> Self {
        let (pace, speed) = match workout.kind() {
            WorkoutKind::Running => (Some(workout.derived_metric()), None),
            WorkoutKind::Cycling => (None, Some(workout.derived_metric())),
        };
        Self {
            kind: workout.kind(),
            id: workout.id().clone(),
            date: format_utc_rfc3339(workout.date()),
            distance: workout.distance(),
            duration: workout.duration(),
            path: StoredPath::Points(
                workout
                    .path()
                    .points()
                    .iter()
                    .map(|&c| c.into())
                    .collect(),
            ),
            cadence: workout.cadence(),
            pace,
            elevation: workout.elevation_gain(),
            speed,
        }
    }
}

impl StoredWorkout {
    /// Rebuild the workout. Stored pace/speed are ignored and recomputed.
    fn into_workout(self) -> Result<Workout, String> {
        let candidate = Candidate {
            kind: self.kind,
            distance: Some(self.distance),
            duration: Some(self.duration),
            cadence: self.cadence,
            elevation_gain: self.elevation,
        };
        let measurements = validator::validate(&candidate)
            .map_err(|e| format!("workout {}: {}", self.id, e))?;

        let date = parse_utc_rfc3339(&self.date)
            .ok_or_else(|| format!("workout {}: invalid date {:?}", self.id, self.date))?;

        let points = match self.path {
            StoredPath::Points(points) => points.into_iter().map(Into::into).collect(),
            StoredPath::Single(point) => vec![point.into()],
        };
        let path =
            GeoPath::new(points).ok_or_else(|| format!("workout {}: empty path", self.id))?;
        for point in path.points() {
            point.validate().map_err(|e| {
                format!("workout {}: point {:?} out of range: {}", self.id, point, e)
            })?;
        }

        Ok(Workout::new(measurements, path, Some(date), Some(self.id), date))
    }
}

/// Encode every workout, in order.
pub fn serialize(workouts: &[Workout]) -> Result<String, CodecError> {
    let stored: Vec<StoredWorkout> = workouts.iter().map(StoredWorkout::from).collect();
    serde_json::to_string(&stored).map_err(|e| CodecError::Encode(e.to_string()))
}

/// Decode stored text. Absent, blank or `null` text is an empty list.
///
/// Entries whose `type` is not a known workout kind are skipped so newer
/// data does not break older readers.
pub fn deserialize(text: Option<&str>) -> Result<Vec<Workout>, CodecError> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(Vec::new());
    };

    let entries: Option<Vec<Value>> =
        serde_json::from_str(text).map_err(|e| CodecError::Corrupt(e.to_string()))?;

    let mut workouts = Vec::new();
    let mut seen = HashSet::new();

    for (index, entry) in entries.unwrap_or_default().into_iter().enumerate() {
        let known = entry
            .get("type")
            .cloned()
            .and_then(|kind| serde_json::from_value::<WorkoutKind>(kind).ok())
            .is_some();
        if !known {
            tracing::debug!(index, "Skipping stored entry of unknown type");
            continue;
        }

        let stored: StoredWorkout = serde_json::from_value(entry)
            .map_err(|e| CodecError::Corrupt(format!("entry {}: {}", index, e)))?;
        let workout = stored.into_workout().map_err(CodecError::Corrupt)?;

        if !seen.insert(workout.id().clone()) {
            return Err(CodecError::Corrupt(format!(
                "duplicate workout id {}",
                workout.id()
            )));
        }
        workouts.push(workout);
    }

    Ok(workouts)
}
