// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod form;
pub mod summary;
pub mod workout;

pub use form::{Candidate, FormInput};
pub use summary::WorkoutSummary;
pub use workout::{Coordinate, GeoPath, Workout, WorkoutDetails, WorkoutId, WorkoutKind};
