// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display ordering for the workout list.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{Workout, WorkoutKind};

/// Key the list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Distance,
    Duration,
    #[default]
    Date,
    Type,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Distance => "distance",
            SortKey::Duration => "duration",
            SortKey::Date => "date",
            SortKey::Type => "type",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "distance" => Ok(SortKey::Distance),
            "duration" => Ok(SortKey::Duration),
            "date" => Ok(SortKey::Date),
            "type" => Ok(SortKey::Type),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

fn kind_rank(kind: WorkoutKind) -> u8 {
    match kind {
        WorkoutKind::Running => 0,
        WorkoutKind::Cycling => 1,
    }
}

/// Total order for `key`. `type` orders runs before rides, then by date.
pub fn compare(a: &Workout, b: &Workout, key: SortKey) -> Ordering {
    match key {
        SortKey::Distance => a.distance().total_cmp(&b.distance()),
        SortKey::Duration => a.duration().total_cmp(&b.duration()),
        SortKey::Date => a.date().cmp(&b.date()),
        SortKey::Type => kind_rank(a.kind())
            .cmp(&kind_rank(b.kind()))
            .then_with(|| a.date().cmp(&b.date())),
    }
}

/// Sorted view over `workouts`. The input slice is left untouched.
///
/// The sort is stable, so re-sorting by the same key is the identity.
pub fn sort(workouts: &[Workout], key: SortKey) -> Vec<&Workout> {
    let mut sorted: Vec<&Workout> = workouts.iter().collect();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}
