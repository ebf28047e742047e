// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use workout_log::models::{Coordinate, GeoPath, Workout, WorkoutId};
use workout_log::services::codec;
use workout_log::services::sorter::{self, SortKey};
use workout_log::services::validator::{KindMeasurement, Measurements};

/// A season of alternating runs and rides with short GPS traces.
fn season(count: usize) -> Vec<Workout> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 7, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let date = start + Duration::hours(i as i64 * 13);
            let extra = if i % 2 == 0 {
                KindMeasurement::Running {
                    cadence: 160.0 + (i % 30) as f64,
                }
            } else {
                KindMeasurement::Cycling {
                    elevation_gain: (i % 700) as f64,
                }
            };
            let points = (0..20)
                .map(|p| Coordinate::new(37.3 + p as f64 * 0.001, -122.0 - (i % 50) as f64 * 0.01))
                .collect();
            Workout::new(
                Measurements {
                    distance: 1.0 + ((i * 7) % 40) as f64,
                    duration: 10.0 + ((i * 11) % 180) as f64,
                    extra,
                },
                GeoPath::new(points).expect("non-empty path"),
                Some(date),
                Some(WorkoutId::new(format!("{:010}", i))),
                date,
            )
        })
        .collect()
}

fn benchmark_sort(c: &mut Criterion) {
    let workouts = season(1_000);
    let mut group = c.benchmark_group("sort");

    for key in [SortKey::Distance, SortKey::Date, SortKey::Type] {
        group.bench_function(key.as_str(), |b| {
            b.iter(|| sorter::sort(black_box(&workouts), key).len())
        });
    }

    group.finish();
}

fn benchmark_codec(c: &mut Criterion) {
    let workouts = season(1_000);
    let text = codec::serialize(&workouts).expect("Failed to serialize");
    let mut group = c.benchmark_group("codec");

    group.bench_function("serialize", |b| {
        b.iter(|| codec::serialize(black_box(&workouts)))
    });

    group.bench_function("deserialize", |b| {
        b.iter(|| codec::deserialize(black_box(Some(text.as_str()))))
    });

    group.finish();
}

criterion_group!(benches, benchmark_sort, benchmark_codec);
criterion_main!(benches);
