// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory workout collection, kept in insertion order.

use crate::models::{Workout, WorkoutId};

/// Store contract violations. A well-behaved caller never sees these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Workout not found: {0}")]
    NotFound(WorkoutId),

    #[error("Duplicate workout id: {0}")]
    DuplicateId(WorkoutId),

    #[error("Replacement id {found} does not match {expected}")]
    IdMismatch { expected: WorkoutId, found: WorkoutId },
}

/// The authoritative workout collection.
///
/// Ids are unique at all times. Order is insertion order and is never
/// affected by sorting for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from decoded workouts, rejecting duplicate ids.
    pub fn from_workouts(workouts: Vec<Workout>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for workout in workouts {
            store.add(workout)?;
        }
        Ok(store)
    }

    /// Append a workout.
    pub fn add(&mut self, workout: Workout) -> Result<(), StoreError> {
        if self.contains(workout.id()) {
            return Err(StoreError::DuplicateId(workout.id().clone()));
        }
        self.workouts.push(workout);
        Ok(())
    }

    /// Remove and return the workout with `id`.
    pub fn remove(&mut self, id: &WorkoutId) -> Result<Workout, StoreError> {
        let index = self.position(id)?;
        Ok(self.workouts.remove(index))
    }

    /// Swap the workout with `id` for `replacement`, which moves to the end.
    ///
    /// Checks happen before anything is touched, so a failed replace leaves
    /// the store as it was.
    pub fn replace(&mut self, id: &WorkoutId, replacement: Workout) -> Result<Workout, StoreError> {
        let index = self.position(id)?;
        if replacement.id() != id {
            return Err(StoreError::IdMismatch {
                expected: id.clone(),
                found: replacement.id().clone(),
            });
        }
        let old = self.workouts.remove(index);
        self.workouts.push(replacement);
        Ok(old)
    }

    pub fn get(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn contains(&self, id: &WorkoutId) -> bool {
        self.get(id).is_some()
    }

    /// All workouts in insertion order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
    }

    fn position(&self, id: &WorkoutId) -> Result<usize, StoreError> {
        self.workouts
            .iter()
            .position(|w| w.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, GeoPath};
    use crate::services::validator::{KindMeasurement, Measurements};
    use chrono::{TimeZone, Utc};

    fn workout(id: &str, distance: f64) -> Workout {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 8, 0, 0).unwrap();
        Workout::new(
            Measurements {
                distance,
                duration: 30.0,
                extra: KindMeasurement::Running { cadence: 170.0 },
            },
            GeoPath::single(Coordinate::new(37.0, -122.0)),
            None,
            Some(id.into()),
            now,
        )
    }

    fn ids(store: &WorkoutStore) -> Vec<&str> {
        store.all().iter().map(|w| w.id().as_str()).collect()
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut store = WorkoutStore::new();
        store.add(workout("b", 1.0)).unwrap();
        store.add(workout("a", 2.0)).unwrap();
        assert_eq!(ids(&store), vec!["b", "a"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut store = WorkoutStore::new();
        store.add(workout("a", 1.0)).unwrap();
        let err = store.add(workout("a", 2.0)).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("a".into()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&"a".into()).unwrap().distance(), 1.0);
    }

    #[test]
    fn test_remove_missing_leaves_store_unchanged() {
        let mut store = WorkoutStore::new();
        store.add(workout("a", 1.0)).unwrap();
        let before = store.clone();

        let err = store.remove(&"zzz".into()).unwrap_err();
        assert_eq!(err, StoreError::NotFound("zzz".into()));
        assert_eq!(store, before);
    }

    #[test]
    fn test_replace_moves_entry_to_end() {
        let mut store = WorkoutStore::new();
        store.add(workout("a", 1.0)).unwrap();
        store.add(workout("b", 2.0)).unwrap();

        let old = store.replace(&"a".into(), workout("a", 9.0)).unwrap();
        assert_eq!(old.distance(), 1.0);
        assert_eq!(ids(&store), vec!["b", "a"]);
        assert_eq!(store.get(&"a".into()).unwrap().distance(), 9.0);
    }

    #[test]
    fn test_replace_rejects_mismatched_id() {
        let mut store = WorkoutStore::new();
        store.add(workout("a", 1.0)).unwrap();
        store.add(workout("b", 2.0)).unwrap();
        let before = store.clone();

        let err = store.replace(&"a".into(), workout("b", 9.0)).unwrap_err();
        assert!(matches!(err, StoreError::IdMismatch { .. }));
        assert_eq!(store, before);

        let err = store.replace(&"c".into(), workout("c", 9.0)).unwrap_err();
        assert_eq!(err, StoreError::NotFound("c".into()));
    }

    #[test]
    fn test_from_workouts_rejects_duplicates() {
        let err = WorkoutStore::from_workouts(vec![workout("a", 1.0), workout("a", 2.0)])
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("a".into()));
    }
}
