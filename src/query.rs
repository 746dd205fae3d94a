// ABOUTME: Typed activity queries: type filter, half-open date window, distance and athlete thresholds
// ABOUTME: Value objects that store adapters translate without splicing caller strings into queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Typed activity queries
//!
//! [`ActivityQuery::matches`] is the reference semantics: every store adapter
//! must select exactly the activities it accepts.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use yearbook_core::errors::{AppError, AppResult};
use yearbook_core::models::{Activity, ActivityField, ActivityType};

/// Half-open date range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Explicit window
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `end` is not after `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if end <= start {
            return Err(AppError::invalid_input(format!(
                "date window {start}..{end} is empty"
            )));
        }
        Ok(Self { start, end })
    }

    /// `[year-01-01, (year+1)-01-01)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the year is outside the calendar range
    pub fn year(year: i32) -> AppResult<Self> {
        Self::new(first_of_month(year, 1)?, first_of_month(year + 1, 1)?)
    }

    /// `[year-month-01, first day of the next month)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a month outside 1..=12 or an unrepresentable year
    pub fn month(year: i32, month: u32) -> AppResult<Self> {
        let start = first_of_month(year, month)?;
        let end = if month == 12 {
            first_of_month(year + 1, 1)?
        } else {
            first_of_month(year, month + 1)?
        };
        Self::new(start, end)
    }

    /// Month window containing `date`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the following month is unrepresentable
    pub fn month_of(date: NaiveDate) -> AppResult<Self> {
        Self::month(date.year(), date.month())
    }

    /// First day (inclusive)
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Day after the window (exclusive)
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive lower bound as midnight of the first day
    #[must_use]
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Exclusive upper bound as midnight of the day after the window
    #[must_use]
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }

    /// Whether a local timestamp falls inside the window
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let day = at.date();
        self.start <= day && day < self.end
    }
}

fn first_of_month(year: i32, month: u32) -> AppResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::invalid_input(format!("no such month: {year}-{month:02}")))
}

/// Activity filter
///
/// An empty query matches every activity. Criteria combine with AND.
///
/// # Examples
///
/// ```rust
/// use athlete_yearbook::query::{ActivityQuery, DateWindow};
/// use yearbook_core::models::ActivityType;
///
/// # fn main() -> yearbook_core::errors::AppResult<()> {
/// let long_runs_2019 = ActivityQuery::new()
///     .of_type(ActivityType::Run)
///     .within(DateWindow::year(2019)?)
///     .min_distance(16_000.0);
/// assert_eq!(long_runs_2019.activity_type(), Some(&ActivityType::Run));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityQuery {
    activity_type: Option<ActivityType>,
    window: Option<DateWindow>,
    min_distance_m: Option<f64>,
    more_than_athletes: Option<u32>,
}

impl ActivityQuery {
    /// Query matching every activity
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only activities of this type
    #[must_use]
    pub fn of_type(mut self, activity_type: impl Into<ActivityType>) -> Self {
        self.activity_type = Some(activity_type.into());
        self
    }

    /// Only activities starting inside the window
    #[must_use]
    pub const fn within(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Only activities at least this long (meters, inclusive)
    #[must_use]
    pub fn min_distance(mut self, meters: f64) -> Self {
        self.min_distance_m = Some(meters);
        self
    }

    /// Only activities with strictly more athletes than `count`
    #[must_use]
    pub const fn more_than_athletes(mut self, count: u32) -> Self {
        self.more_than_athletes = Some(count);
        self
    }

    /// Type filter, if any
    #[must_use]
    pub const fn activity_type(&self) -> Option<&ActivityType> {
        self.activity_type.as_ref()
    }

    /// Date window, if any
    #[must_use]
    pub const fn window(&self) -> Option<&DateWindow> {
        self.window.as_ref()
    }

    /// Inclusive minimum distance, if any
    #[must_use]
    pub const fn min_distance_m(&self) -> Option<f64> {
        self.min_distance_m
    }

    /// Exclusive athlete-count floor, if any
    #[must_use]
    pub const fn athletes_above(&self) -> Option<u32> {
        self.more_than_athletes
    }

    /// Whether `activity` satisfies every criterion
    #[must_use]
    pub fn matches(&self, activity: &Activity) -> bool {
        self.activity_type
            .as_ref()
            .is_none_or(|t| activity.activity_type() == t)
            && self
                .window
                .is_none_or(|w| w.contains(activity.start_date_local()))
            && self
                .min_distance_m
                .is_none_or(|m| activity.distance_meters() >= m)
            && self
                .more_than_athletes
                .is_none_or(|n| activity.athlete_count() > n)
    }
}

/// Sorted, limited projection of activity identifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopQuery {
    /// Activities to rank
    pub filter: ActivityQuery,
    /// Ranking field
    pub sort_by: ActivityField,
    /// Highest first when true
    pub descending: bool,
    /// Maximum number of identifiers returned
    pub limit: usize,
}

impl TopQuery {
    /// The single activity with the highest `field`
    #[must_use]
    pub const fn highest(filter: ActivityQuery, field: ActivityField) -> Self {
        Self {
            filter,
            sort_by: field,
            descending: true,
            limit: 1,
        }
    }

    /// Rank lowest first
    #[must_use]
    pub const fn ascending(mut self) -> Self {
        self.descending = false;
        self
    }

    /// Return up to `limit` identifiers
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}
