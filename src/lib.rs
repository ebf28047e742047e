// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Log: record runs and rides against the place they happened.
//!
//! This crate provides the backend for a map-driven workout log. Workouts
//! are validated, kept in insertion order, persisted as a single JSON
//! document and served to the list, form and map UI over a local HTTP API.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::WorkoutSession;
use tokio::sync::Mutex;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The single workout session. Holding the lock makes each UI event atomic.
    pub session: Mutex<WorkoutSession>,
}

impl AppState {
    pub fn new(config: Config, session: WorkoutSession) -> Self {
        Self {
            config,
            session: Mutex::new(session),
        }
    }
}
