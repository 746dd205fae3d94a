// ABOUTME: Core data models for activities, telemetry, and the yearly report tree
// ABOUTME: Re-exports the activity, telemetry, and report submodules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Data models shared by the scanner, the stores, and the orchestrator

/// Activity records, activity types, and queryable numeric fields
pub mod activity;

/// Per-activity elapsed time / cumulative distance series
pub mod telemetry;

/// Best efforts, aerobic estimates, and the persisted report tree
pub mod report;

pub use activity::{Activity, ActivityBuilder, ActivityField, ActivityId, ActivityType};
pub use report::{
    ActivityTypeMonthStats, ActivityTypeYearStats, AerobicEstimate, BestEffortResult,
    WholeReport, YearReport,
};
pub use telemetry::{SeriesDefect, TelemetrySeries};
