// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Add/edit/delete lifecycle.
//!
//! At most one form is open at a time. Every change goes through the
//! validator, is staged on a copy of the store, written to storage, and only
//! then becomes the live store. A failed write therefore leaves the session
//! exactly as it was.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::db::{LocalStorage, StorageError};
use crate::models::{FormInput, GeoPath, Workout, WorkoutId, WorkoutKind};
use crate::services::codec::{self, CodecError};
use crate::services::sorter::{self, SortKey};
use crate::services::store::{StoreError, WorkoutStore};
use crate::services::validator::{self, FieldError};

/// Source of "now" for new workouts.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Which form, if any, is open.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormState {
    Closed,
    /// New workout at the captured path.
    AddOpen { path: GeoPath, draft: FormInput },
    /// Editing an existing workout.
    EditOpen { id: WorkoutId, draft: FormInput },
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("Submit your previous form first")]
    FormConflict,

    #[error("No form is open")]
    NoOpenForm,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// The workout log as driven by UI events.
pub struct WorkoutSession {
    store: WorkoutStore,
    storage: LocalStorage,
    form: FormState,
    clock: Clock,
}

impl WorkoutSession {
    /// Load the session from storage using the system clock.
    pub fn open(storage: LocalStorage) -> Self {
        Self::with_clock(storage, Arc::new(Utc::now))
    }

    /// Load the session from storage. Unreadable or corrupt data starts an
    /// empty log instead of failing.
    pub fn with_clock(storage: LocalStorage, clock: Clock) -> Self {
        let store = match load_store(&storage) {
            Ok(store) => {
                tracing::info!(count = store.len(), "Loaded workouts");
                store
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored workouts unreadable, starting empty");
                WorkoutStore::new()
            }
        };

        Self {
            store,
            storage,
            form: FormState::Closed,
            clock,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    /// Workouts in insertion order.
    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    /// Workouts ordered for display.
    pub fn sorted(&self, key: SortKey) -> Vec<&Workout> {
        sorter::sort(self.store.all(), key)
    }

    /// Open the add form for a freshly captured path.
    ///
    /// If the add form is already open it is moved to the new path and keeps
    /// what has been typed so far.
    pub fn request_add(&mut self, path: GeoPath) -> Result<(), SessionError> {
        if let FormState::AddOpen { path: current, .. } = &mut self.form {
            *current = path;
            tracing::debug!("Add form moved to new location");
            return Ok(());
        }

        self.close_open_form()?;
        self.form = FormState::AddOpen {
            path,
            draft: FormInput::blank(WorkoutKind::Running),
        };
        tracing::debug!("Add form opened");
        Ok(())
    }

    /// Open the edit form for `id`, returning its pre-populated contents.
    pub fn request_edit(&mut self, id: &WorkoutId) -> Result<FormInput, SessionError> {
        if !self.store.contains(id) {
            return Err(StoreError::NotFound(id.clone()).into());
        }
        if let FormState::EditOpen { id: open, draft } = &self.form {
            if open == id {
                return Ok(draft.clone());
            }
        }

        self.close_open_form()?;

        let workout = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let draft = FormInput::from_workout(workout);
        self.form = FormState::EditOpen {
            id: id.clone(),
            draft: draft.clone(),
        };
        tracing::debug!(id = %id, "Edit form opened");
        Ok(draft)
    }

    /// Record the live contents of the open form.
    pub fn update_draft(&mut self, input: FormInput) -> Result<(), SessionError> {
        match &mut self.form {
            FormState::Closed => Err(SessionError::NoOpenForm),
            FormState::AddOpen { draft, .. } | FormState::EditOpen { draft, .. } => {
                *draft = input;
                Ok(())
            }
        }
    }

    /// Submit the open form.
    ///
    /// On a validation failure the form stays open holding `input`. On
    /// success the workout is stored and the form closes.
    pub fn submit(&mut self, input: FormInput) -> Result<WorkoutId, SessionError> {
        let measurements = match &mut self.form {
            FormState::Closed => return Err(SessionError::NoOpenForm),
            FormState::AddOpen { draft, .. } | FormState::EditOpen { draft, .. } => {
                match validator::validate(&input.to_candidate()) {
                    Ok(measurements) => measurements,
                    Err(err) => {
                        *draft = input;
                        return Err(err.into());
                    }
                }
            }
        };

        let now = (self.clock)();
        let mut next = self.store.clone();

        let id = match &self.form {
            FormState::Closed => return Err(SessionError::NoOpenForm),
            FormState::AddOpen { path, .. } => {
                let id = self.fresh_id(now);
                let workout =
                    Workout::new(measurements, path.clone(), Some(now), Some(id.clone()), now);
                next.add(workout).map_err(invariant)?;
                tracing::info!(id = %id, kind = %measurements.kind(), "Workout added");
                id
            }
            FormState::EditOpen { id, .. } => {
                let original = self
                    .store
                    .get(id)
                    .ok_or_else(|| invariant(StoreError::NotFound(id.clone())))?;
                let replacement = Workout::new(
                    measurements,
                    original.path().clone(),
                    Some(original.date()),
                    Some(id.clone()),
                    now,
                );
                next.replace(id, replacement).map_err(invariant)?;
                tracing::info!(id = %id, kind = %measurements.kind(), "Workout edited");
                id.clone()
            }
        };

        self.commit(next)?;
        self.form = FormState::Closed;
        Ok(id)
    }

    /// Delete a workout. Only allowed while no form is open.
    ///
    /// The id comes from the caller, so an unknown id is a `NotFound` for the
    /// caller to report rather than a broken store invariant.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<(), SessionError> {
        self.require_closed()?;

        let mut next = self.store.clone();
        next.remove(id).inspect_err(|e| {
            tracing::warn!(error = %e, "Delete of unknown workout");
        })?;

        self.commit(next)?;
        tracing::info!(id = %id, "Workout deleted");
        Ok(())
    }

    /// Delete every workout and the stored document.
    pub fn clear_all(&mut self) -> Result<(), SessionError> {
        self.require_closed()?;

        self.storage.clear()?;
        let count = self.store.len();
        self.store.clear();
        tracing::info!(count, "All workouts deleted");
        Ok(())
    }

    fn require_closed(&self) -> Result<(), SessionError> {
        match self.form {
            FormState::Closed => Ok(()),
            _ => Err(SessionError::FormConflict),
        }
    }

    /// Close the open form by submitting its draft. A draft that does not
    /// validate blocks the caller with `FormConflict` and stays open.
    fn close_open_form(&mut self) -> Result<(), SessionError> {
        let draft = match &self.form {
            FormState::Closed => return Ok(()),
            FormState::AddOpen { draft, .. } | FormState::EditOpen { draft, .. } => draft.clone(),
        };

        match self.submit(draft) {
            Ok(_) => Ok(()),
            Err(SessionError::Field(err)) => {
                tracing::warn!(field = %err.field, "Open form has invalid input, not switching");
                Err(SessionError::FormConflict)
            }
            Err(e) => Err(e),
        }
    }

    /// Clock-derived id not yet used in the store.
    fn fresh_id(&self, now: DateTime<Utc>) -> WorkoutId {
        let mut millis = now.timestamp_millis();
        loop {
            let id = WorkoutId::from_millis(millis);
            if !self.store.contains(&id) {
                return id;
            }
            millis += 1;
        }
    }

    /// Persist `next`, then make it the live store.
    fn commit(&mut self, next: WorkoutStore) -> Result<(), SessionError> {
        let text = codec::serialize(next.all())?;
        self.storage.save(&text).inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist workouts");
        })?;
        self.store = next;
        Ok(())
    }
}

fn invariant(err: StoreError) -> SessionError {
    tracing::error!(error = %err, "Workout store invariant violated");
    SessionError::Store(err)
}

fn load_store(storage: &LocalStorage) -> Result<WorkoutStore, SessionError> {
    let text = storage.load()?;
    let workouts = codec::deserialize(text.as_deref())?;
    Ok(WorkoutStore::from_workouts(workouts)?)
}
