// ABOUTME: Domain constants for best-effort scanning, aerobic estimates, and yearly reports
// ABOUTME: Cooper test parameters, distance thresholds, calendar defaults, and store keys
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Application constants organized by domain

/// Cooper 12-minute run test parameters
pub mod cooper {
    /// Minimum qualifying window length in seconds (12 minutes)
    pub const TEST_DURATION_SECS: i64 = 12 * 60;

    /// Largest 12-minute distance accepted before a delta is treated as a GPS aberration
    pub const MAX_PLAUSIBLE_DISTANCE_M: f64 = 3000.0;

    /// Regression intercept: `VO2max = (distance - 504.9) / 44.73`
    pub const INTERCEPT_M: f64 = 504.9;

    /// Regression slope in meters per ml/kg/min
    pub const SLOPE_M: f64 = 44.73;
}

/// Distance thresholds used for the "long activity" counters
pub mod thresholds {
    /// Runs at or above this distance count toward `runs_over_20k`
    pub const LONG_RUN_M: f64 = 16_000.0;

    /// Rides at or above this distance count toward `rides_over_100k`
    pub const LONG_RIDE_M: f64 = 100_000.0;

    /// Rides at or above this distance count toward `rides_over_160k`
    pub const VERY_LONG_RIDE_M: f64 = 160_000.0;

    /// Activities with more athletes than this were done with friends
    pub const SOLO_ATHLETE_COUNT: u32 = 1;
}

/// Calendar defaults for the yearly report
pub mod calendar {
    /// First year of the default report range
    pub const DEFAULT_FIRST_YEAR: i32 = 2014;

    /// Last year of the default report range (inclusive)
    pub const DEFAULT_LAST_YEAR: i32 = 2023;

    /// Week divisor for completed years
    pub const WEEKS_PER_YEAR: f64 = 52.0;

    /// Week divisor for the year still in progress
    pub const DEFAULT_PARTIAL_YEAR_WEEKS: f64 = 32.0;

    /// Seconds per minute
    pub const SECONDS_PER_MINUTE: f64 = 60.0;

    /// Meters per kilometer
    pub const METERS_PER_KM: f64 = 1000.0;
}

/// Activity type names as recorded by the upstream service
pub mod activity_types {
    /// Running
    pub const RUN: &str = "Run";

    /// Cycling
    pub const RIDE: &str = "Ride";

    /// Types that get a per-sport breakdown by default
    pub const DEFAULT_TRACKED: &[&str] = &[RIDE, RUN];
}

/// Report store keys
pub mod report {
    /// Fixed key under which the whole report is replaced on every run
    pub const DEFAULT_REPORT_KEY: &str = "whole_stats";
}

/// Service names for structured logging
pub mod service_names {
    /// Service name used in startup logs
    pub const ATHLETE_YEARBOOK: &str = "athlete-yearbook";
}
