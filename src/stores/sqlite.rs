// ABOUTME: SQLite store adapter for activities, telemetry streams, and the persisted report
// ABOUTME: Builds filters from typed queries with bound parameters and upserts the report by key
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! `SQLite` store
//!
//! Telemetry streams are stored as JSON arrays of raw sensor floats and
//! truncated to whole seconds/meters on read. The report table holds one
//! document per key and every write replaces it.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::{debug, warn};
use yearbook_core::errors::{AppError, AppResult};
use yearbook_core::models::{
    Activity, ActivityBuilder, ActivityField, ActivityId, ActivityType, TelemetrySeries,
    WholeReport,
};

use super::{encode_report, ActivityStore, ReportStore, TelemetryStore};
use crate::config::DatabaseUrl;
use crate::query::{ActivityQuery, TopQuery};

const ACTIVITY_COLUMNS: &str = "id, type, start_date_local, distance, moving_time, \
     total_elevation_gain, calories, kudos_count, athlete_count, average_speed";

/// `SQLite`-backed store for all three store roles
#[derive(Clone)]
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (creating if needed) the database and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created, the
    /// connection fails, or the schema cannot be applied
    pub async fn connect(url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match url {
            // every in-memory connection is its own database, so keep exactly one alive
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect(&url.to_connection_string())
                    .await?
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir).map_err(|e| {
                        AppError::storage(format!("cannot create {}", dir.display())).with_source(e)
                    })?;
                }
                // mode=rwc creates the file if it doesn't exist
                SqlitePool::connect(&format!("{}?mode=rwc", url.to_connection_string())).await?
            }
        };

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be applied
    pub async fn from_pool(pool: SqlitePool) -> AppResult<Self> {
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the database pool
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Create tables if they do not exist
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activities (
                id INTEGER PRIMARY KEY,
                type TEXT NOT NULL,
                start_date_local TEXT NOT NULL,
                distance REAL NOT NULL DEFAULT 0,
                moving_time INTEGER NOT NULL DEFAULT 0,
                total_elevation_gain REAL NOT NULL DEFAULT 0,
                calories REAL NOT NULL DEFAULT 0,
                kudos_count INTEGER NOT NULL DEFAULT 0,
                athlete_count INTEGER NOT NULL DEFAULT 1,
                average_speed REAL NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_activities_type_start ON activities(type, start_date_local)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS telemetry (
                activity_id INTEGER PRIMARY KEY,
                time TEXT NOT NULL,
                distance TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS reports (
                key TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        debug!("SQLite store schema ready");
        Ok(())
    }

    /// Insert or replace an activity
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_activity(&self, activity: &Activity) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO activities (
                id, type, start_date_local, distance, moving_time, total_elevation_gain,
                calories, kudos_count, athlete_count, average_speed
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(activity.id().0)
        .bind(activity.activity_type().as_str())
        .bind(activity.start_date_local())
        .bind(activity.distance_meters())
        .bind(i64::try_from(activity.moving_time_seconds()).unwrap_or(i64::MAX))
        .bind(activity.elevation_gain())
        .bind(activity.calories())
        .bind(i64::from(activity.kudos_count()))
        .bind(i64::from(activity.athlete_count()))
        .bind(activity.average_speed())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert or replace the raw telemetry streams of an activity
    ///
    /// # Errors
    ///
    /// Returns an error if the streams cannot be encoded or the insert fails
    pub async fn insert_telemetry(
        &self,
        activity_id: ActivityId,
        time: &[f64],
        distance: &[f64],
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO telemetry (activity_id, time, distance) VALUES ($1, $2, $3)",
        )
        .bind(activity_id.0)
        .bind(serde_json::to_string(time)?)
        .bind(serde_json::to_string(distance)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// Append the WHERE clause for `query`
fn push_filter(builder: &mut QueryBuilder<'_, Sqlite>, query: &ActivityQuery) {
    builder.push(" WHERE 1 = 1");
    if let Some(activity_type) = query.activity_type() {
        builder
            .push(" AND type = ")
            .push_bind(activity_type.as_str().to_owned());
    }
    if let Some(window) = query.window() {
        builder
            .push(" AND start_date_local >= ")
            .push_bind(window.start_datetime())
            .push(" AND start_date_local < ")
            .push_bind(window.end_datetime());
    }
    if let Some(meters) = query.min_distance_m() {
        builder.push(" AND distance >= ").push_bind(meters);
    }
    if let Some(athletes) = query.athletes_above() {
        builder
            .push(" AND athlete_count > ")
            .push_bind(i64::from(athletes));
    }
}

fn activity_from_row(row: &SqliteRow) -> AppResult<Activity> {
    let activity_type: String = row.try_get("type")?;
    let start: NaiveDateTime = row.try_get("start_date_local")?;
    let moving_time: i64 = row.try_get("moving_time")?;
    let kudos: i64 = row.try_get("kudos_count")?;
    let athletes: i64 = row.try_get("athlete_count")?;

    Ok(ActivityBuilder::new(
        ActivityId(row.try_get("id")?),
        ActivityType::from(activity_type),
        start,
    )
    .distance_meters(row.try_get("distance")?)
    .moving_time_seconds(u64::try_from(moving_time).unwrap_or(0))
    .elevation_gain(row.try_get("total_elevation_gain")?)
    .calories(row.try_get("calories")?)
    .kudos_count(u32::try_from(kudos).unwrap_or(0))
    .athlete_count(u32::try_from(athletes).unwrap_or(1))
    .average_speed(row.try_get("average_speed")?)
    .build())
}

#[async_trait]
impl ActivityStore for SqliteStore {
    async fn filter(&self, query: &ActivityQuery) -> AppResult<Vec<Activity>> {
        let mut builder = QueryBuilder::new(format!("SELECT {ACTIVITY_COLUMNS} FROM activities"));
        push_filter(&mut builder, query);
        builder.push(" ORDER BY start_date_local ASC, id ASC");

        let rows = builder.build().fetch_all(&self.pool).await?;
        rows.iter().map(activity_from_row).collect()
    }

    async fn count(&self, query: &ActivityQuery) -> AppResult<u64> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM activities");
        push_filter(&mut builder, query);

        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn sum(&self, query: &ActivityQuery, field: ActivityField) -> AppResult<f64> {
        let mut builder = QueryBuilder::new(format!(
            "SELECT CAST(COALESCE(SUM({}), 0) AS REAL) FROM activities",
            field.column()
        ));
        push_filter(&mut builder, query);

        let total: f64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn top(&self, query: &TopQuery) -> AppResult<Vec<ActivityId>> {
        let mut builder = QueryBuilder::new("SELECT id FROM activities");
        push_filter(&mut builder, &query.filter);
        builder
            .push(" ORDER BY ")
            .push(query.sort_by.column())
            .push(if query.descending { " DESC" } else { " ASC" })
            .push(", start_date_local ASC, id ASC LIMIT ")
            .push_bind(i64::try_from(query.limit).unwrap_or(i64::MAX));

        let ids: Vec<i64> = builder
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await?;
        Ok(ids.into_iter().map(ActivityId).collect())
    }
}

#[async_trait]
impl TelemetryStore for SqliteStore {
    async fn get_series(&self, activity_id: ActivityId) -> AppResult<Option<TelemetrySeries>> {
        let row = sqlx::query("SELECT time, distance FROM telemetry WHERE activity_id = $1")
            .bind(activity_id.0)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let time: String = row.try_get("time")?;
        let distance: String = row.try_get("distance")?;
        match (
            serde_json::from_str::<Vec<f64>>(&time),
            serde_json::from_str::<Vec<f64>>(&distance),
        ) {
            (Ok(time), Ok(distance)) => Ok(Some(TelemetrySeries::from_raw(
                activity_id,
                &time,
                &distance,
            ))),
            (Err(e), _) | (_, Err(e)) => {
                warn!(activity.id = %activity_id, error = %e, "Undecodable telemetry streams");
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl ReportStore for SqliteStore {
    async fn upsert(&self, key: &str, report: &WholeReport) -> AppResult<()> {
        let document = encode_report(report)?;
        sqlx::query(
            r"
            INSERT INTO reports (key, document, updated_at)
            VALUES ($1, $2, CURRENT_TIMESTAMP)
            ON CONFLICT(key) DO UPDATE SET
                document = excluded.document,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(document)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let document: Option<String> =
            sqlx::query_scalar("SELECT document FROM reports WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(document)
    }
}
