// ABOUTME: Best-effort, aerobic estimate, and yearly report models
// ABOUTME: Serialized field names match the persisted statistics document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::{ActivityId, ActivityType};

/// Longest qualifying distance found across a set of activities
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BestEffortResult {
    /// Distance covered in the best qualifying window, meters
    pub distance_meters: f64,
    /// Activity that produced it, `None` when nothing qualified
    pub activity_id: Option<ActivityId>,
}

impl BestEffortResult {
    /// No qualifying window
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            distance_meters: 0.0,
            activity_id: None,
        }
    }

    /// Whether nothing qualified
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.activity_id.is_none() || self.distance_meters <= 0.0
    }
}

/// Aerobic capacity estimate derived from a best effort
///
/// Serialized under the document names `vo2max_run` / `best_12min_act_id`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AerobicEstimate {
    /// Estimated `VO2max` in ml/kg/min
    #[serde(rename = "vo2max_run")]
    pub value: f64,
    /// Activity whose best effort produced the estimate
    #[serde(rename = "best_12min_act_id")]
    pub source_activity_id: Option<ActivityId>,
}

/// Per-activity-type totals for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTypeYearStats {
    /// Activity type these totals cover
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Number of activities
    pub count: u64,
    /// Total distance in kilometers
    pub total_km: f64,
    /// Total elevation gain in meters
    pub total_elevation_gain: f64,
    /// Moving minutes per week
    pub mins_per_week: f64,
    /// Mean of per-activity average speeds (m/s), 0 when `count == 0`
    pub avg_speed: f64,
    /// Total calories
    pub calories: f64,
    /// Total kudos received
    pub total_kudos: u64,
    /// Activity with the most elevation gain
    #[serde(rename = "hardest_ride_id")]
    pub hardest_activity_id: Option<ActivityId>,
    /// Activity with the longest distance
    #[serde(rename = "longest_ride_id")]
    pub longest_activity_id: Option<ActivityId>,
}

/// Month-to-date figures for one activity type, current year only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTypeMonthStats {
    /// Activity type these figures cover
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Distance so far this month in kilometers
    pub total_km: f64,
    /// Moving minutes per elapsed week of the month
    pub mins_per_week: f64,
}

/// Derived statistics for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearReport {
    /// Calendar year
    pub year: i32,
    /// Per-type breakdown, in configured type order
    pub sports: Vec<ActivityTypeYearStats>,
    /// Best 12-minute run converted to an aerobic estimate
    #[serde(flatten)]
    pub aerobic: AerobicEstimate,
    /// Kudos received on the year's runs
    pub total_kudos: u64,
    /// Activity with the most kudos
    pub most_kudos_activity: Option<ActivityId>,
    /// Activities with more than one athlete
    pub rides_with_friends: u64,
    /// Runs at or above the long-run threshold
    #[serde(rename = "runs_over_20k")]
    pub long_runs: u64,
    /// Rides at or above the long-ride threshold
    #[serde(rename = "rides_over_100k")]
    pub long_rides: u64,
    /// Rides at or above the very-long-ride threshold
    #[serde(rename = "rides_over_160k")]
    pub very_long_rides: u64,
    /// Month-to-date figures, only filled for the current year
    pub current_month: Vec<ActivityTypeMonthStats>,
}

/// All yearly reports, ascending by year
///
/// This is the only persisted artifact and is replaced wholesale each run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WholeReport {
    /// One report per configured year
    #[serde(rename = "years_of_sports")]
    pub years: Vec<YearReport>,
}

impl WholeReport {
    /// Report for a given year, if it is in range
    #[must_use]
    pub fn year(&self, year: i32) -> Option<&YearReport> {
        self.years.iter().find(|report| report.year == year)
    }
}
