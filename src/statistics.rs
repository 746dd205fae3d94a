// ABOUTME: Yearly statistics orchestrator combining store aggregates with the best-effort scanner
// ABOUTME: Computes every year concurrently, assembles the whole report, and replaces it in one upsert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Statistics Engine
//!
//! For each configured year the engine issues independent aggregate queries
//! (sums, counts, top-by-field) and scans every run's telemetry for the best
//! 12-minute effort. Each year is a pure function of the stores and "today";
//! the [`WholeReport`] is assembled only once every year has succeeded, and
//! only then handed to the report store. Any store error aborts the run
//! before anything is written.

use std::sync::Arc;
use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use futures_util::future::try_join_all;
use tracing::{debug, instrument};
use yearbook_core::constants::{calendar, thresholds};
use yearbook_core::errors::{AppError, AppResult};
use yearbook_core::models::{
    ActivityField, ActivityType, ActivityTypeMonthStats, ActivityTypeYearStats,
    BestEffortResult, WholeReport, YearReport,
};
use yearbook_intelligence::aerobic;

use crate::config::StatsConfig;
use crate::logging::RunLogger;
use crate::query::{ActivityQuery, DateWindow, TopQuery};
use crate::stores::{ActivityStore, ReportStore, TelemetryStore};

/// Yearly statistics orchestrator
pub struct StatisticsEngine {
    activities: Arc<dyn ActivityStore>,
    telemetry: Arc<dyn TelemetryStore>,
    reports: Arc<dyn ReportStore>,
    config: StatsConfig,
}

impl StatisticsEngine {
    /// Create an engine over the given stores
    #[must_use]
    pub fn new(
        activities: Arc<dyn ActivityStore>,
        telemetry: Arc<dyn TelemetryStore>,
        reports: Arc<dyn ReportStore>,
        config: StatsConfig,
    ) -> Self {
        Self {
            activities,
            telemetry,
            reports,
            config,
        }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Compute the report and replace the stored document
    ///
    /// # Errors
    ///
    /// Returns the first store error; nothing is written in that case
    pub async fn run(&self, today: NaiveDate) -> AppResult<WholeReport> {
        let started = Instant::now();
        let report = self.compute(today).await?;
        self.reports.upsert(&self.config.report_key, &report).await?;
        RunLogger::log_run_summary(
            &self.config.report_key,
            report.years.len(),
            true,
            started.elapsed().as_millis() as u64,
        );
        Ok(report)
    }

    /// Compute the report for every configured year without writing it
    ///
    /// `today` decides which year is in progress and which month gets
    /// month-to-date figures.
    ///
    /// # Errors
    ///
    /// Returns the first store error raised by any year
    pub async fn compute(&self, today: NaiveDate) -> AppResult<WholeReport> {
        let years = try_join_all(
            self.config
                .years()
                .map(|year| self.compute_year(year, today)),
        )
        .await?;
        Ok(WholeReport { years })
    }

    /// Statistics for one calendar year
    ///
    /// # Errors
    ///
    /// Returns an error if the year is unrepresentable or a store fails
    #[instrument(skip(self, today))]
    pub async fn compute_year(&self, year: i32, today: NaiveDate) -> AppResult<YearReport> {
        let started = Instant::now();
        let window = DateWindow::year(year)?;
        let in_progress = year == today.year();
        let weeks = if in_progress {
            self.config.partial_year_weeks
        } else {
            calendar::WEEKS_PER_YEAR
        };

        let all = ActivityQuery::new().within(window);
        let with_friends = all
            .clone()
            .more_than_athletes(thresholds::SOLO_ATHLETE_COUNT);
        let runs = all.clone().of_type(ActivityType::Run);
        let rides = all.clone().of_type(ActivityType::Ride);
        let long_runs = runs.clone().min_distance(thresholds::LONG_RUN_M);
        let long_rides = rides.clone().min_distance(thresholds::LONG_RIDE_M);
        let very_long_rides = rides.min_distance(thresholds::VERY_LONG_RIDE_M);
        let most_kudos = TopQuery::highest(all.clone(), ActivityField::KudosCount);

        let (
            sports,
            best,
            activity_count,
            total_kudos,
            most_kudos,
            with_friends,
            long_runs,
            long_rides,
            very_long_rides,
        ) = tokio::try_join!(
            try_join_all(
                self.config
                    .tracked_types
                    .iter()
                    .map(|activity_type| self.type_year_stats(activity_type, window, weeks)),
            ),
            self.best_effort_in(&runs),
            self.activities.count(&all),
            self.activities.sum(&runs, ActivityField::KudosCount),
            self.activities.top(&most_kudos),
            self.activities.count(&with_friends),
            self.activities.count(&long_runs),
            self.activities.count(&long_rides),
            self.activities.count(&very_long_rides),
        )?;

        let current_month = if in_progress {
            self.month_stats(today).await?
        } else {
            Vec::new()
        };

        let aerobic = aerobic::estimate(&best);
        RunLogger::log_year_computed(
            year,
            activity_count,
            aerobic.value,
            started.elapsed().as_millis() as u64,
        );

        Ok(YearReport {
            year,
            sports,
            aerobic,
            total_kudos: total_kudos.round() as u64,
            most_kudos_activity: most_kudos.first().copied(),
            rides_with_friends: with_friends,
            long_runs,
            long_rides,
            very_long_rides,
            current_month,
        })
    }

    /// Per-type totals for one year
    async fn type_year_stats(
        &self,
        activity_type: &ActivityType,
        window: DateWindow,
        weeks: f64,
    ) -> AppResult<ActivityTypeYearStats> {
        let query = ActivityQuery::new()
            .of_type(activity_type.clone())
            .within(window);
        let longest = TopQuery::highest(query.clone(), ActivityField::Distance);
        let hardest = TopQuery::highest(query.clone(), ActivityField::ElevationGain);

        let (count, distance, elevation, moving_time, speed_sum, calories, kudos, longest, hardest) =
            tokio::try_join!(
                self.activities.count(&query),
                self.activities.sum(&query, ActivityField::Distance),
                self.activities.sum(&query, ActivityField::ElevationGain),
                self.activities.sum(&query, ActivityField::MovingTime),
                self.activities.sum(&query, ActivityField::AverageSpeed),
                self.activities.sum(&query, ActivityField::Calories),
                self.activities.sum(&query, ActivityField::KudosCount),
                self.activities.top(&longest),
                self.activities.top(&hardest),
            )?;

        Ok(ActivityTypeYearStats {
            activity_type: activity_type.clone(),
            count,
            total_km: distance / calendar::METERS_PER_KM,
            total_elevation_gain: elevation,
            mins_per_week: minutes_per_week(moving_time, weeks),
            avg_speed: if count == 0 {
                0.0
            } else {
                speed_sum / count as f64
            },
            calories,
            total_kudos: kudos.round() as u64,
            hardest_activity_id: hardest.first().copied(),
            longest_activity_id: longest.first().copied(),
        })
    }

    /// Month-to-date distance and weekly minutes for each tracked type
    ///
    /// Minutes use the same fixed partial-year week count as the year's
    /// per-type figures.
    async fn month_stats(&self, today: NaiveDate) -> AppResult<Vec<ActivityTypeMonthStats>> {
        let window = DateWindow::month_of(today)?;
        let weeks = self.config.partial_year_weeks;

        try_join_all(self.config.tracked_types.iter().map(|activity_type| async move {
            let query = ActivityQuery::new()
                .of_type(activity_type.clone())
                .within(window);
            let (distance, moving_time) = tokio::try_join!(
                self.activities.sum(&query, ActivityField::Distance),
                self.activities.sum(&query, ActivityField::MovingTime),
            )?;
            Ok::<_, AppError>(ActivityTypeMonthStats {
                activity_type: activity_type.clone(),
                total_km: distance / calendar::METERS_PER_KM,
                mins_per_week: minutes_per_week(moving_time, weeks),
            })
        }))
        .await
    }

    /// Best effort over every activity matching `query`
    ///
    /// Telemetry is fetched concurrently; missing series count as no effort.
    /// Scans run on the rayon pool off the async runtime.
    async fn best_effort_in(&self, query: &ActivityQuery) -> AppResult<BestEffortResult> {
        let candidates = self.activities.filter(query).await?;
        let series = try_join_all(candidates.iter().map(|activity| async move {
            let activity_id = activity.id();
            let series = self.telemetry.get_series(activity_id).await?;
            Ok::<_, AppError>((activity_id, series))
        }))
        .await?;

        debug!(candidates = series.len(), "Scanning telemetry for best effort");
        let scanner = self.config.scanner();
        tokio::task::spawn_blocking(move || scanner.scan_all(&series))
            .await
            .map_err(|e| AppError::internal(format!("best-effort scan task failed: {e}")))
    }
}

/// Moving seconds expressed as minutes per week
fn minutes_per_week(moving_seconds: f64, weeks: f64) -> f64 {
    moving_seconds / calendar::SECONDS_PER_MINUTE / weeks
}
