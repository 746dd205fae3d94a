// ABOUTME: Recorded activity model with builder, activity type, and numeric field selectors
// ABOUTME: ActivityField names the summable/sortable columns without string injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::activity_types;

/// Identifier of an activity in the upstream service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub i64);

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ActivityId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Activity type as recorded upstream ("Run", "Ride", ...)
///
/// Only the types the report breaks down are named; everything else is kept
/// verbatim in `Other` so stores can round-trip it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityType {
    /// Running activity
    Run,
    /// Cycling activity
    Ride,
    /// Any other upstream type, stored as-is
    Other(String),
}

impl ActivityType {
    /// Upstream name of this type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Run => activity_types::RUN,
            Self::Ride => activity_types::RIDE,
            Self::Other(name) => name,
        }
    }
}

impl From<String> for ActivityType {
    fn from(value: String) -> Self {
        match value.as_str() {
            activity_types::RUN => Self::Run,
            activity_types::RIDE => Self::Ride,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for ActivityType {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<ActivityType> for String {
    fn from(value: ActivityType) -> Self {
        match value {
            ActivityType::Other(name) => name,
            named => named.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric activity fields that stores can sum or sort on
///
/// Each variant maps to a fixed column name, so adapters never build queries
/// from caller-supplied strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityField {
    /// Distance in meters
    Distance,
    /// Moving time in seconds
    MovingTime,
    /// Elevation gain in meters
    ElevationGain,
    /// Calories burned
    Calories,
    /// Kudos received
    KudosCount,
    /// Average speed in meters per second
    AverageSpeed,
    /// Number of athletes who took part
    AthleteCount,
}

impl ActivityField {
    /// Storage column backing this field
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::MovingTime => "moving_time",
            Self::ElevationGain => "total_elevation_gain",
            Self::Calories => "calories",
            Self::KudosCount => "kudos_count",
            Self::AverageSpeed => "average_speed",
            Self::AthleteCount => "athlete_count",
        }
    }
}

/// A single recorded activity
///
/// Fields are private to keep records immutable once loaded - use the
/// accessors to read and [`ActivityBuilder`] to construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    id: ActivityId,
    #[serde(rename = "type")]
    activity_type: ActivityType,
    /// Local wall-clock start, the basis for year and month windows
    start_date_local: NaiveDateTime,
    distance: f64,
    moving_time: u64,
    total_elevation_gain: f64,
    calories: f64,
    kudos_count: u32,
    athlete_count: u32,
    average_speed: f64,
}

impl Activity {
    /// Activity identifier
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Activity type
    #[must_use]
    pub const fn activity_type(&self) -> &ActivityType {
        &self.activity_type
    }

    /// Local start date and time
    #[must_use]
    pub const fn start_date_local(&self) -> NaiveDateTime {
        self.start_date_local
    }

    /// Distance in meters
    #[must_use]
    pub const fn distance_meters(&self) -> f64 {
        self.distance
    }

    /// Moving time in seconds
    #[must_use]
    pub const fn moving_time_seconds(&self) -> u64 {
        self.moving_time
    }

    /// Elevation gain in meters
    #[must_use]
    pub const fn elevation_gain(&self) -> f64 {
        self.total_elevation_gain
    }

    /// Calories burned
    #[must_use]
    pub const fn calories(&self) -> f64 {
        self.calories
    }

    /// Kudos received
    #[must_use]
    pub const fn kudos_count(&self) -> u32 {
        self.kudos_count
    }

    /// Athletes who took part, including the owner
    #[must_use]
    pub const fn athlete_count(&self) -> u32 {
        self.athlete_count
    }

    /// Average speed in meters per second
    #[must_use]
    pub const fn average_speed(&self) -> f64 {
        self.average_speed
    }

    /// Value of a numeric field as `f64`
    #[must_use]
    pub fn value_of(&self, field: ActivityField) -> f64 {
        match field {
            ActivityField::Distance => self.distance,
            ActivityField::MovingTime => self.moving_time as f64,
            ActivityField::ElevationGain => self.total_elevation_gain,
            ActivityField::Calories => self.calories,
            ActivityField::KudosCount => f64::from(self.kudos_count),
            ActivityField::AverageSpeed => self.average_speed,
            ActivityField::AthleteCount => f64::from(self.athlete_count),
        }
    }
}

/// Builder for [`Activity`]
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use yearbook_core::models::{ActivityBuilder, ActivityId, ActivityType};
///
/// let start = NaiveDate::from_ymd_opt(2021, 6, 12)
///     .and_then(|d| d.and_hms_opt(7, 30, 0))
///     .unwrap_or_default();
/// let activity = ActivityBuilder::new(ActivityId(42), ActivityType::Run, start)
///     .distance_meters(10_000.0)
///     .moving_time_seconds(2_700)
///     .kudos_count(12)
///     .build();
///
/// assert_eq!(activity.id(), ActivityId(42));
/// assert!((activity.distance_meters() - 10_000.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone)]
pub struct ActivityBuilder {
    activity: Activity,
}

impl ActivityBuilder {
    /// Creates a new builder with the required fields; numeric fields start at zero
    /// and the athlete count at one (the owner).
    #[must_use]
    pub fn new(
        id: impl Into<ActivityId>,
        activity_type: impl Into<ActivityType>,
        start_date_local: NaiveDateTime,
    ) -> Self {
        Self {
            activity: Activity {
                id: id.into(),
                activity_type: activity_type.into(),
                start_date_local,
                distance: 0.0,
                moving_time: 0,
                total_elevation_gain: 0.0,
                calories: 0.0,
                kudos_count: 0,
                athlete_count: 1,
                average_speed: 0.0,
            },
        }
    }

    /// Distance in meters
    #[must_use]
    pub fn distance_meters(mut self, meters: f64) -> Self {
        self.activity.distance = meters;
        self
    }

    /// Moving time in seconds
    #[must_use]
    pub fn moving_time_seconds(mut self, seconds: u64) -> Self {
        self.activity.moving_time = seconds;
        self
    }

    /// Elevation gain in meters
    #[must_use]
    pub fn elevation_gain(mut self, meters: f64) -> Self {
        self.activity.total_elevation_gain = meters;
        self
    }

    /// Calories burned
    #[must_use]
    pub fn calories(mut self, calories: f64) -> Self {
        self.activity.calories = calories;
        self
    }

    /// Kudos received
    #[must_use]
    pub fn kudos_count(mut self, kudos: u32) -> Self {
        self.activity.kudos_count = kudos;
        self
    }

    /// Athletes who took part
    #[must_use]
    pub fn athlete_count(mut self, athletes: u32) -> Self {
        self.activity.athlete_count = athletes;
        self
    }

    /// Average speed in meters per second
    #[must_use]
    pub fn average_speed(mut self, meters_per_second: f64) -> Self {
        self.activity.average_speed = meters_per_second;
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> Activity {
        self.activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 3, 1)
            .and_then(|d| d.and_hms_opt(8, 0, 0))
            .unwrap()
    }

    #[test]
    fn test_activity_type_round_trips_unknown_names() {
        assert_eq!(ActivityType::from("Run"), ActivityType::Run);
        assert_eq!(ActivityType::from("Ride"), ActivityType::Ride);
        let swim = ActivityType::from("Swim");
        assert_eq!(swim, ActivityType::Other("Swim".to_owned()));
        assert_eq!(String::from(swim), "Swim");
    }

    #[test]
    fn test_activity_serializes_with_upstream_field_names() {
        let activity = ActivityBuilder::new(ActivityId(7), ActivityType::Ride, start())
            .distance_meters(100_500.0)
            .athlete_count(3)
            .build();
        let json = serde_json::to_value(&activity).unwrap();
        assert_eq!(json["type"], "Ride");
        assert_eq!(json["id"], 7);
        assert_eq!(json["athlete_count"], 3);
    }

    #[test]
    fn test_value_of_matches_accessors() {
        let activity = ActivityBuilder::new(ActivityId(1), ActivityType::Run, start())
            .moving_time_seconds(3_600)
            .kudos_count(9)
            .build();
        assert!((activity.value_of(ActivityField::MovingTime) - 3_600.0).abs() < f64::EPSILON);
        assert!((activity.value_of(ActivityField::KudosCount) - 9.0).abs() < f64::EPSILON);
        assert!((activity.value_of(ActivityField::AthleteCount) - 1.0).abs() < f64::EPSILON);
    }
}
