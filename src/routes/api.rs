// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log API used by the form, list and map UI.
//!
//! Every handler takes the session lock for its whole duration, so UI events
//! are applied one at a time.

use crate::error::{AppError, Result};
use crate::models::{Coordinate, FormInput, GeoPath, WorkoutId, WorkoutSummary};
use crate::services::{map, FormState, SortKey};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/workouts",
            get(list_workouts).delete(delete_all_workouts),
        )
        .route("/api/workouts/{id}", delete(delete_workout))
        .route("/api/map", get(get_map))
        .route("/api/form", get(get_form))
        .route("/api/form/add", post(open_add_form))
        .route("/api/form/edit/{id}", post(open_edit_form))
        .route("/api/form/draft", put(update_draft))
        .route("/api/form/submit", post(submit_form))
}

// ─── Workout List ────────────────────────────────────────────

#[derive(Deserialize)]
struct WorkoutsQuery {
    /// One of distance, duration, date, type
    sort: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutsResponse {
    pub sort: SortKey,
    pub workouts: Vec<WorkoutSummary>,
}

fn parse_sort(raw: Option<&str>, default: SortKey) -> Result<SortKey> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => s
            .parse::<SortKey>()
            .map_err(|e| AppError::BadRequest(e.to_string())),
        None => Ok(default),
    }
}

/// List workouts in display order.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WorkoutsQuery>,
) -> Result<Json<WorkoutsResponse>> {
    let sort = parse_sort(params.sort.as_deref(), state.config.default_sort)?;

    let session = state.session.lock().await;
    let workouts = session
        .sorted(sort)
        .into_iter()
        .map(WorkoutSummary::from)
        .collect::<Vec<_>>();
    tracing::debug!(sort = %sort, count = workouts.len(), "Listing workouts");

    Ok(Json(WorkoutsResponse { sort, workouts }))
}

/// Delete one workout.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let mut session = state.session.lock().await;
    session.delete(&WorkoutId::new(id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete every workout.
async fn delete_all_workouts(State(state): State<Arc<AppState>>) -> Result<StatusCode> {
    let mut session = state.session.lock().await;
    session.clear_all()?;
    Ok(StatusCode::NO_CONTENT)
}

// ─── Map ─────────────────────────────────────────────────────

/// All workouts as GeoJSON features, in insertion order.
async fn get_map(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    let session = state.session.lock().await;
    Json(map::feature_collection(session.workouts()))
}

// ─── Form ────────────────────────────────────────────────────

/// Current form state.
async fn get_form(State(state): State<Arc<AppState>>) -> Json<FormState> {
    let session = state.session.lock().await;
    Json(session.form().clone())
}

/// Captured map location for a new workout.
#[derive(Deserialize, Validate)]
pub struct AddFormRequest {
    #[validate(length(min = 1), nested)]
    pub path: Vec<Coordinate>,
}

/// Open the add form at a captured location.
async fn open_add_form(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddFormRequest>,
) -> Result<Json<FormState>> {
    request
        .validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid path: {}", e)))?;
    let path = GeoPath::new(request.path)
        .ok_or_else(|| AppError::BadRequest("Path must have at least one point".to_string()))?;

    let mut session = state.session.lock().await;
    session.request_add(path)?;
    Ok(Json(session.form().clone()))
}

/// Open the edit form for an existing workout.
async fn open_edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FormState>> {
    let mut session = state.session.lock().await;
    session.request_edit(&WorkoutId::new(id))?;
    Ok(Json(session.form().clone()))
}

/// Save what has been typed into the open form.
async fn update_draft(
    State(state): State<Arc<AppState>>,
    Json(input): Json<FormInput>,
) -> Result<StatusCode> {
    let mut session = state.session.lock().await;
    session.update_draft(input)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubmitResponse {
    pub id: String,
    pub workout: WorkoutSummary,
}

/// Submit the open form.
async fn submit_form(
    State(state): State<Arc<AppState>>,
    Json(input): Json<FormInput>,
) -> Result<Json<SubmitResponse>> {
    let mut session = state.session.lock().await;
    let id = session.submit(input)?;
    let workout = session
        .store()
        .get(&id)
        .map(WorkoutSummary::from)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("submitted workout {} missing", id)))?;

    Ok(Json(SubmitResponse {
        id: id.to_string(),
        workout,
    }))
}
