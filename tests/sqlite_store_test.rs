// ABOUTME: Integration tests for the SQLite store adapter against in-memory and file databases
// ABOUTME: Checks query parity with the memory store, telemetry decoding, and report upsert semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![cfg(feature = "sqlite")]

mod common;

use std::sync::Arc;

use athlete_yearbook::config::DatabaseUrl;
use athlete_yearbook::query::{ActivityQuery, DateWindow, TopQuery};
use athlete_yearbook::statistics::StatisticsEngine;
use athlete_yearbook::stores::{
    ActivityStore, MemoryStore, ReportStore, SqliteStore, TelemetryStore,
};
use common::{
    approx, at, fixture_activities, fixture_config, fixture_store, today, uniform_streams,
    FIXTURE_TELEMETRY,
};
use yearbook_core::models::{ActivityBuilder, ActivityField, ActivityId, ActivityType, WholeReport};

async fn fixture_sqlite() -> SqliteStore {
    let store = SqliteStore::connect(&DatabaseUrl::Memory).await.unwrap();
    for activity in fixture_activities() {
        store.insert_activity(&activity).await.unwrap();
    }
    for &(id, samples, step_secs, step_m) in FIXTURE_TELEMETRY {
        let (time, distance) = uniform_streams(samples, step_secs, step_m);
        store
            .insert_telemetry(ActivityId(id), &time, &distance)
            .await
            .unwrap();
    }
    store
}

fn parity_queries() -> Vec<ActivityQuery> {
    let y2021 = DateWindow::year(2021).unwrap();
    vec![
        ActivityQuery::new(),
        ActivityQuery::new().within(y2021),
        ActivityQuery::new().of_type(ActivityType::Run).within(y2021),
        ActivityQuery::new().of_type(ActivityType::Run).min_distance(10_000.0),
        ActivityQuery::new().more_than_athletes(1),
        ActivityQuery::new().within(DateWindow::month(2023, 8).unwrap()),
        ActivityQuery::new().within(DateWindow::year(2022).unwrap()),
    ]
}

#[tokio::test]
async fn test_filter_count_sum_agree_with_memory_store() {
    let sqlite = fixture_sqlite().await;
    let memory = MemoryStore::with_activities(fixture_activities());

    for query in parity_queries() {
        let expected: Vec<ActivityId> = fixture_activities()
            .iter()
            .filter(|a| query.matches(a))
            .map(|a| a.id())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        let from_sql: Vec<ActivityId> = sqlite
            .filter(&query)
            .await
            .unwrap()
            .iter()
            .map(|a| a.id())
            .collect();
        let from_memory: Vec<ActivityId> = memory
            .filter(&query)
            .await
            .unwrap()
            .iter()
            .map(|a| a.id())
            .collect();
        assert_eq!(from_sql, from_memory, "{query:?}");

        let mut sorted = from_sql.clone();
        sorted.sort();
        assert_eq!(sorted, expected, "{query:?}");

        assert_eq!(
            sqlite.count(&query).await.unwrap(),
            memory.count(&query).await.unwrap()
        );
        for field in [
            ActivityField::Distance,
            ActivityField::MovingTime,
            ActivityField::KudosCount,
            ActivityField::AverageSpeed,
        ] {
            assert!(approx(
                sqlite.sum(&query, field).await.unwrap(),
                memory.sum(&query, field).await.unwrap()
            ));
        }
    }
}

#[tokio::test]
async fn test_filter_orders_by_start_time() {
    let sqlite = fixture_sqlite().await;
    let runs = sqlite
        .filter(&ActivityQuery::new().of_type(ActivityType::Run))
        .await
        .unwrap();
    let ids: Vec<i64> = runs.iter().map(|a| a.id().0).collect();
    assert_eq!(ids, vec![101, 102, 104, 303, 302]);
    assert_eq!(runs[1].athlete_count(), 3);
    assert_eq!(runs[1].moving_time_seconds(), 7_200);
}

#[tokio::test]
async fn test_sum_and_count_of_nothing_are_zero() {
    let sqlite = fixture_sqlite().await;
    let nothing = ActivityQuery::new().within(DateWindow::year(2022).unwrap());
    assert_eq!(sqlite.count(&nothing).await.unwrap(), 0);
    assert!(sqlite
        .sum(&nothing, ActivityField::Distance)
        .await
        .unwrap()
        .abs()
        < f64::EPSILON);
    assert!(sqlite
        .top(&TopQuery::highest(nothing, ActivityField::KudosCount))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_year_window_boundary_is_half_open() {
    let sqlite = SqliteStore::connect(&DatabaseUrl::Memory).await.unwrap();
    let new_year = ActivityBuilder::new(
        ActivityId(1),
        ActivityType::Run,
        at(2022, 1, 1).date().and_hms_opt(0, 0, 0).unwrap(),
    )
    .build();
    let new_years_eve = ActivityBuilder::new(
        ActivityId(2),
        ActivityType::Run,
        at(2021, 12, 31).date().and_hms_opt(23, 59, 59).unwrap(),
    )
    .build();
    sqlite.insert_activity(&new_year).await.unwrap();
    sqlite.insert_activity(&new_years_eve).await.unwrap();

    let in_2021 = sqlite
        .filter(&ActivityQuery::new().within(DateWindow::year(2021).unwrap()))
        .await
        .unwrap();
    let in_2022 = sqlite
        .filter(&ActivityQuery::new().within(DateWindow::year(2022).unwrap()))
        .await
        .unwrap();
    assert_eq!(in_2021.len(), 1);
    assert_eq!(in_2021[0].id(), ActivityId(2));
    assert_eq!(in_2022.len(), 1);
    assert_eq!(in_2022[0].id(), ActivityId(1));
}

#[tokio::test]
async fn test_top_ranks_and_breaks_ties_by_start_time() {
    let sqlite = SqliteStore::connect(&DatabaseUrl::Memory).await.unwrap();
    for (id, day, kudos) in [(10, 5, 7), (11, 3, 7), (12, 4, 2)] {
        let activity = ActivityBuilder::new(ActivityId(id), ActivityType::Ride, at(2020, 4, day))
            .kudos_count(kudos)
            .build();
        sqlite.insert_activity(&activity).await.unwrap();
    }

    let most = TopQuery::highest(ActivityQuery::new(), ActivityField::KudosCount);
    assert_eq!(sqlite.top(&most).await.unwrap(), vec![ActivityId(11)]);
    assert_eq!(
        sqlite.top(&most.clone().limit(3)).await.unwrap(),
        vec![ActivityId(11), ActivityId(10), ActivityId(12)]
    );
    assert_eq!(
        sqlite.top(&most.ascending()).await.unwrap(),
        vec![ActivityId(12)]
    );
}

#[tokio::test]
async fn test_telemetry_is_truncated_on_read() {
    let sqlite = SqliteStore::connect(&DatabaseUrl::Memory).await.unwrap();
    sqlite
        .insert_telemetry(ActivityId(5), &[0.0, 59.9, 120.2], &[0.9, 199.99, 400.5])
        .await
        .unwrap();

    let series = sqlite.get_series(ActivityId(5)).await.unwrap().unwrap();
    assert_eq!(series.time(), &[0, 59, 120]);
    assert_eq!(series.distance(), &[0, 199, 400]);
    assert!(sqlite.get_series(ActivityId(6)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_undecodable_telemetry_reads_as_missing() {
    let sqlite = SqliteStore::connect(&DatabaseUrl::Memory).await.unwrap();
    sqlx::query("INSERT INTO telemetry (activity_id, time, distance) VALUES (7, 'not json', '[]')")
        .execute(sqlite.pool())
        .await
        .unwrap();
    assert!(sqlite.get_series(ActivityId(7)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_out_of_range_telemetry_does_not_abort_run() {
    let sqlite = Arc::new(fixture_sqlite().await);
    sqlite
        .insert_telemetry(ActivityId(102), &[0.0, 800.0], &[-1e300, 1e300])
        .await
        .unwrap();

    let report = StatisticsEngine::new(sqlite.clone(), sqlite.clone(), sqlite, fixture_config())
        .compute(today())
        .await
        .unwrap();
    let year = report.year(2021).unwrap();
    assert_eq!(year.aerobic.source_activity_id, Some(ActivityId(101)));
}

#[tokio::test]
async fn test_upsert_replaces_document() {
    let sqlite = SqliteStore::connect(&DatabaseUrl::Memory).await.unwrap();
    let empty = WholeReport::default();
    let store: Arc<dyn ReportStore> = Arc::new(sqlite.clone());

    assert!(store.get("whole_stats").await.unwrap().is_none());
    store.upsert("whole_stats", &empty).await.unwrap();
    assert_eq!(
        store.get("whole_stats").await.unwrap().unwrap(),
        r#"{"years_of_sports":[]}"#
    );

    let report = fixture_store();
    let engine = StatisticsEngine::new(report.clone(), report.clone(), store.clone(), fixture_config());
    engine.run(today()).await.unwrap();

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
        .fetch_one(sqlite.pool())
        .await
        .unwrap();
    assert_eq!(rows, 1);
    let stored: WholeReport =
        serde_json::from_str(&store.get("whole_stats").await.unwrap().unwrap()).unwrap();
    assert_eq!(stored.years.len(), 3);
}

#[tokio::test]
async fn test_engine_over_sqlite_matches_memory() {
    let sqlite = Arc::new(fixture_sqlite().await);
    let memory = fixture_store();

    let from_sql = StatisticsEngine::new(sqlite.clone(), sqlite.clone(), sqlite, fixture_config())
        .compute(today())
        .await
        .unwrap();
    let from_memory =
        StatisticsEngine::new(memory.clone(), memory.clone(), memory, fixture_config())
            .compute(today())
            .await
            .unwrap();

    for (sql_year, memory_year) in from_sql.years.iter().zip(&from_memory.years) {
        assert_eq!(sql_year.year, memory_year.year);
        assert_eq!(sql_year.most_kudos_activity, memory_year.most_kudos_activity);
        assert_eq!(sql_year.total_kudos, memory_year.total_kudos);
        assert_eq!(sql_year.long_runs, memory_year.long_runs);
        assert_eq!(
            sql_year.aerobic.source_activity_id,
            memory_year.aerobic.source_activity_id
        );
        assert!(approx(sql_year.aerobic.value, memory_year.aerobic.value));
        for (sql_sport, memory_sport) in sql_year.sports.iter().zip(&memory_year.sports) {
            assert_eq!(sql_sport.count, memory_sport.count);
            assert_eq!(sql_sport.longest_activity_id, memory_sport.longest_activity_id);
            assert!(approx(sql_sport.total_km, memory_sport.total_km));
            assert!(approx(sql_sport.avg_speed, memory_sport.avg_speed));
        }
    }
}

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    let dir = tempfile::tempdir().unwrap();
    let url = DatabaseUrl::SQLite {
        path: dir.path().join("data").join("yearbook.db"),
    };

    {
        let store = SqliteStore::connect(&url).await.unwrap();
        store
            .upsert("whole_stats", &WholeReport::default())
            .await
            .unwrap();
        store.pool().close().await;
    }

    let reopened = SqliteStore::connect(&url).await.unwrap();
    assert!(reopened.get("whole_stats").await.unwrap().is_some());
}
