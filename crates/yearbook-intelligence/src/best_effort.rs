// ABOUTME: Two-pointer scan for the longest distance covered in any window of a minimum duration
// ABOUTME: Tolerates missing or malformed telemetry and reduces across activities with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Best-effort window scanner
//!
//! Given one activity's elapsed-time / cumulative-distance samples, find the
//! largest distance covered between two samples at least `min_duration_secs`
//! apart. The end pointer visits every sample once and the start pointer only
//! moves forward, so a scan is a single amortized pass.
//!
//! Deltas above `max_plausible_distance_m` are GPS aberrations and are never
//! recorded. A new best must be a strict improvement, so on exact ties the
//! first window (and the first activity) seen wins.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use yearbook_core::constants::cooper;
use yearbook_core::models::{ActivityId, BestEffortResult, TelemetrySeries};

/// Scanner parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortScanner {
    /// Minimum window length in seconds
    pub min_duration_secs: i64,
    /// Largest delta accepted as a real effort, meters (inclusive)
    pub max_plausible_distance_m: f64,
}

impl Default for EffortScanner {
    fn default() -> Self {
        Self {
            min_duration_secs: cooper::TEST_DURATION_SECS,
            max_plausible_distance_m: cooper::MAX_PLAUSIBLE_DISTANCE_M,
        }
    }
}

impl EffortScanner {
    /// Create a scanner with explicit parameters
    #[must_use]
    pub const fn new(min_duration_secs: i64, max_plausible_distance_m: f64) -> Self {
        Self {
            min_duration_secs,
            max_plausible_distance_m,
        }
    }

    /// Best effort within one activity's telemetry
    #[must_use]
    pub fn scan(&self, series: &TelemetrySeries) -> BestEffortResult {
        find_best_effort(series, self.min_duration_secs, self.max_plausible_distance_m)
    }

    /// Best effort across many activities
    ///
    /// `series` is in store order; `None` marks an activity whose telemetry is
    /// missing. Scans run in parallel and the reduction keeps the earliest
    /// activity on exact distance ties, so the result does not depend on
    /// completion order.
    #[must_use]
    pub fn scan_all(&self, series: &[(ActivityId, Option<TelemetrySeries>)]) -> BestEffortResult {
        series
            .par_iter()
            .map(|(activity_id, telemetry)| {
                telemetry.as_ref().map_or_else(
                    || {
                        debug!(activity.id = %activity_id, "No telemetry for activity, skipping");
                        BestEffortResult::zero()
                    },
                    |telemetry| self.scan(telemetry),
                )
            })
            .reduce(BestEffortResult::zero, keep_best)
    }
}

/// Keep `current` unless `candidate` is strictly longer
#[must_use]
pub fn keep_best(current: BestEffortResult, candidate: BestEffortResult) -> BestEffortResult {
    if candidate.distance_meters > current.distance_meters {
        candidate
    } else {
        current
    }
}

/// Longest distance covered in any window of at least `min_duration_secs`
///
/// Returns the zero effort when the series is malformed (logged as a
/// data-quality warning), too short, or when every qualifying delta exceeds
/// `max_plausible_distance_m`.
#[must_use]
pub fn find_best_effort(
    series: &TelemetrySeries,
    min_duration_secs: i64,
    max_plausible_distance_m: f64,
) -> BestEffortResult {
    if let Err(defect) = series.check() {
        warn!(
            activity.id = %series.activity_id(),
            defect = %defect,
            "Skipping malformed telemetry series"
        );
        return BestEffortResult::zero();
    }

    let time = series.time();
    let distance = series.distance();
    let mut best = BestEffortResult::zero();
    let mut start: Option<usize> = None;

    for end in 0..time.len() {
        let mut s = match start {
            Some(s) => s,
            None if time[end] >= min_duration_secs => 0,
            None => continue,
        };

        // Time is non-decreasing, so saturating keeps gaps ordered even when
        // truncated sensor values sit at the ends of the i64 range.
        while s < end && time[end].saturating_sub(time[s]) >= min_duration_secs {
            let gap = time[end].saturating_sub(time[s]);
            // an overflowing distance delta is corrupt and never qualifies
            if let Some(delta) = distance[end].checked_sub(distance[s]).map(|d| d as f64) {
                if delta > best.distance_meters && delta <= max_plausible_distance_m {
                    best = BestEffortResult {
                        distance_meters: delta,
                        activity_id: Some(series.activity_id()),
                    };
                }
            }

            // Skip every start that still leaves at least the minimum window,
            // then step past the last one.
            let owed = gap.saturating_sub(min_duration_secs);
            let anchor = time[s];
            while s + 1 < end && time[s + 1].saturating_sub(anchor) <= owed {
                s += 1;
            }
            s += 1;
        }

        start = Some(s);
    }

    best
}
