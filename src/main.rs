// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout Log API Server
//!
//! Serves the workout list, form and map layers to the browser UI and keeps
//! the log in a local JSON document.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_log::{config::Config, db::LocalStorage, services::WorkoutSession, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Workout Log API");

    // Load stored workouts
    let storage = LocalStorage::new(config.workouts_file.clone());
    let session = WorkoutSession::open(storage);
    tracing::info!(
        count = session.workouts().len(),
        default_sort = %config.default_sort,
        "Workout log ready"
    );

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), session));

    // Build router
    let app = workout_log::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("workout_log=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
