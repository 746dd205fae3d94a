// ABOUTME: Best-effort window scanning and aerobic capacity estimation for yearly statistics
// ABOUTME: Pure algorithms over telemetry series with a rayon-parallel multi-activity reduction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Yearbook Intelligence
//!
//! The algorithmic core of the yearbook:
//!
//! - **`best_effort`**: finds the longest distance covered in any window of at
//!   least a fixed duration (12 minutes) in one activity's telemetry, and folds
//!   results across many activities in parallel.
//! - **`aerobic`**: converts the best 12-minute distance into a Cooper-style
//!   `VO2max` estimate.
//!
//! Nothing in this crate performs I/O.

/// Best-effort window scanner
pub mod best_effort;

/// Cooper-style aerobic capacity estimator
pub mod aerobic;

pub use aerobic::{cooper_vo2max, estimate};
pub use best_effort::{find_best_effort, EffortScanner};
