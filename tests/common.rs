// ABOUTME: Shared fixtures for integration tests: activities, telemetry, configs, and failing stores
// ABOUTME: Provides a three-year activity history with known expected statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    missing_docs,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `athlete_yearbook`

use std::sync::Arc;

use async_trait::async_trait;
use athlete_yearbook::config::StatsConfig;
use athlete_yearbook::query::{ActivityQuery, TopQuery};
use athlete_yearbook::stores::{ActivityStore, MemoryStore, TelemetryStore};
use chrono::{NaiveDate, NaiveDateTime};
use yearbook_core::errors::{AppError, AppResult};
use yearbook_core::models::{
    Activity, ActivityBuilder, ActivityField, ActivityId, ActivityType, TelemetrySeries,
};

/// "Today" for fixture runs: mid-August of the last fixture year
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 15).unwrap()
}

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(7, 0, 0))
        .unwrap()
}

/// Evenly sampled series: `samples` points, `step_secs` apart, `step_m` per step
pub fn uniform_series(id: i64, samples: i64, step_secs: i64, step_m: i64) -> TelemetrySeries {
    TelemetrySeries::new(
        ActivityId(id),
        (0..samples).map(|i| i * step_secs).collect(),
        (0..samples).map(|i| i * step_m).collect(),
    )
}

/// Raw float streams for the same uniform shape, as stored upstream
pub fn uniform_streams(samples: i64, step_secs: i64, step_m: i64) -> (Vec<f64>, Vec<f64>) {
    (
        (0..samples).map(|i| (i * step_secs) as f64 + 0.4).collect(),
        (0..samples).map(|i| (i * step_m) as f64 + 0.7).collect(),
    )
}

/// Config covering the fixture years 2021..=2023
pub fn fixture_config() -> StatsConfig {
    StatsConfig {
        first_year: 2021,
        last_year: 2023,
        ..StatsConfig::default()
    }
}

#[allow(clippy::too_many_arguments)]
fn activity(
    id: i64,
    activity_type: ActivityType,
    start: NaiveDateTime,
    meters: f64,
    moving_secs: u64,
    elevation: f64,
    kudos: u32,
    athletes: u32,
    speed: f64,
) -> Activity {
    ActivityBuilder::new(ActivityId(id), activity_type, start)
        .distance_meters(meters)
        .moving_time_seconds(moving_secs)
        .elevation_gain(elevation)
        .calories(meters / 10.0)
        .kudos_count(kudos)
        .athlete_count(athletes)
        .average_speed(speed)
        .build()
}

/// Fixture activities
///
/// - 2021: three runs (one long, one without telemetry) and one long group ride
/// - 2022: nothing
/// - 2023 (in progress): a very long group ride in August, an August run whose
///   every 12-minute delta is above the plausibility cap, and a February run
pub fn fixture_activities() -> Vec<Activity> {
    vec![
        activity(101, ActivityType::Run, at(2021, 3, 10), 10_000.0, 3_000, 50.0, 5, 1, 3.3),
        activity(102, ActivityType::Run, at(2021, 6, 1), 21_000.0, 7_200, 120.0, 12, 3, 2.9),
        activity(103, ActivityType::Ride, at(2021, 7, 4), 120_000.0, 14_400, 1_500.0, 20, 4, 8.3),
        activity(104, ActivityType::Run, at(2021, 9, 9), 5_000.0, 1_500, 10.0, 1, 1, 3.0),
        activity(301, ActivityType::Ride, at(2023, 8, 2), 170_000.0, 21_600, 2_000.0, 30, 2, 7.9),
        activity(302, ActivityType::Run, at(2023, 8, 10), 8_000.0, 2_400, 40.0, 3, 1, 3.3),
        activity(303, ActivityType::Run, at(2023, 2, 1), 12_000.0, 3_600, 60.0, 8, 1, 3.3),
    ]
}

/// Fixture telemetry as `(activity, samples, step_secs, step_m)`
///
/// 101 peaks at 2400 m, 102 at 2760 m, 302 is always above 3000 m, 303 peaks
/// at 1800 m. 103 is a ride and 104 has no telemetry.
pub const FIXTURE_TELEMETRY: &[(i64, i64, i64, i64)] = &[
    (101, 21, 60, 200),
    (102, 30, 60, 230),
    (302, 25, 60, 300),
    (303, 21, 60, 150),
];

/// Memory store seeded with the fixture
pub fn fixture_store() -> Arc<MemoryStore> {
    let store = MemoryStore::with_activities(fixture_activities());
    for &(id, samples, step_secs, step_m) in FIXTURE_TELEMETRY {
        store.insert_telemetry(uniform_series(id, samples, step_secs, step_m));
    }
    Arc::new(store)
}

/// Activity and telemetry store whose backend is down
pub struct UnavailableStore;

fn down() -> AppError {
    AppError::unavailable("test store", "connection refused")
}

#[async_trait]
impl ActivityStore for UnavailableStore {
    async fn filter(&self, _query: &ActivityQuery) -> AppResult<Vec<Activity>> {
        Err(down())
    }

    async fn count(&self, _query: &ActivityQuery) -> AppResult<u64> {
        Err(down())
    }

    async fn sum(&self, _query: &ActivityQuery, _field: ActivityField) -> AppResult<f64> {
        Err(down())
    }

    async fn top(&self, _query: &TopQuery) -> AppResult<Vec<ActivityId>> {
        Err(down())
    }
}

#[async_trait]
impl TelemetryStore for UnavailableStore {
    async fn get_series(&self, _activity_id: ActivityId) -> AppResult<Option<TelemetrySeries>> {
        Err(down())
    }
}

pub fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-6
}
