// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! List entry handed to the workout list renderer.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use super::workout::{Workout, WorkoutDetails, WorkoutKind};
use crate::time_utils::{format_utc_rfc3339, month_day_label};

/// A workout as shown in the list, derived metric included so the renderer
/// never recomputes it.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutSummary {
    pub id: String,
    pub kind: WorkoutKind,
    /// e.g. "Running on March 5"
    pub title: String,
    pub date: String,
    pub distance: f64,
    pub duration: f64,
    pub metric: f64,
    pub metric_unit: &'static str,
    pub extra: f64,
    pub extra_unit: &'static str,
}

impl From<&Workout> for WorkoutSummary {
    fn from(workout: &Workout) -> Self {
        let (metric_unit, extra, extra_unit) = match *workout.details() {
            WorkoutDetails::Running { cadence, .. } => ("min/km", cadence, "spm"),
            WorkoutDetails::Cycling { elevation_gain, .. } => ("km/h", elevation_gain, "m"),
        };

        Self {
            id: workout.id().to_string(),
            kind: workout.kind(),
            title: format!("{} on {}", workout.kind(), month_day_label(workout.date())),
            date: format_utc_rfc3339(workout.date()),
            distance: workout.distance(),
            duration: workout.duration(),
            metric: workout.derived_metric(),
            metric_unit,
            extra,
            extra_unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, GeoPath};
    use crate::services::validator::{KindMeasurement, Measurements};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_summary_for_ride() {
        let date = Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap();
        let workout = Workout::new(
            Measurements {
                distance: 30.0,
                duration: 60.0,
                extra: KindMeasurement::Cycling {
                    elevation_gain: 250.0,
                },
            },
            GeoPath::single(Coordinate::new(37.0, -122.0)),
            Some(date),
            Some("42".into()),
            date,
        );

        let summary = WorkoutSummary::from(&workout);
        assert_eq!(summary.id, "42");
        assert_eq!(summary.title, "Cycling on March 5");
        assert_eq!(summary.date, "2024-03-05T08:30:00.000Z");
        assert_eq!(summary.metric, 30.0);
        assert_eq!(summary.metric_unit, "km/h");
        assert_eq!(summary.extra, 250.0);
        assert_eq!(summary.extra_unit, "m");
    }
}
