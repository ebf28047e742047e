// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map layer export.
//!
//! Each workout becomes one GeoJSON feature carrying its path and kind. How
//! markers and lines are drawn is up to the map UI.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::models::{Workout, WorkoutKind};
use crate::time_utils::month_day_label;

/// Polyline precision used for the encoded path property.
const POLYLINE_PRECISION: u32 = 5;

/// Popup text such as "🏃‍♀️ Running on March 5".
pub fn popup_message(workout: &Workout) -> String {
    let icon = match workout.kind() {
        WorkoutKind::Running => "🏃‍♀️",
        WorkoutKind::Cycling => "🚴",
    };
    format!(
        "{} {} on {}",
        icon,
        workout.kind(),
        month_day_label(workout.date())
    )
}

/// Encode the workout path as a Google polyline, `None` if a point is out of range.
pub fn encode_path(workout: &Workout) -> Option<String> {
    polyline::encode_coordinates(workout.path().to_line_string(), POLYLINE_PRECISION).ok()
}

/// Map feature for one workout. A one-point path is a Point, longer paths a LineString.
pub fn workout_feature(workout: &Workout) -> Feature {
    let line = workout.path().to_line_string();
    let value = if line.0.len() == 1 {
        Value::Point(vec![line.0[0].x, line.0[0].y])
    } else {
        Value::LineString(line.0.iter().map(|c| vec![c.x, c.y]).collect())
    };

    let start = workout.path().start();
    let mut properties = JsonObject::new();
    properties.insert("id".to_string(), json!(workout.id()));
    properties.insert("kind".to_string(), json!(workout.kind()));
    properties.insert("popup".to_string(), json!(popup_message(workout)));
    properties.insert("marker".to_string(), json!([start.lat, start.lng]));
    properties.insert("polyline".to_string(), json!(encode_path(workout)));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: Some(geojson::feature::Id::String(workout.id().to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// All workouts as one feature collection, in the given order.
pub fn feature_collection<'a>(workouts: impl IntoIterator<Item = &'a Workout>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: workouts.into_iter().map(workout_feature).collect(),
        foreign_members: None,
    }
}
