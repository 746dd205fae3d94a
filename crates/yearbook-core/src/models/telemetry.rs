// ABOUTME: Telemetry series model: elapsed time and cumulative distance samples per activity
// ABOUTME: Truncates raw sensor floats to integers and reports data-quality defects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ActivityId;

/// Data-quality problems that make a series unusable for scanning
///
/// These are tolerated, logged, and treated as "no effort found" for the
/// activity; they never abort a report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeriesDefect {
    /// No samples at all
    #[error("series has no samples")]
    Empty,
    /// `time` and `distance` have different lengths
    #[error("time has {time} samples but distance has {distance}")]
    LengthMismatch {
        /// Number of time samples
        time: usize,
        /// Number of distance samples
        distance: usize,
    },
    /// Elapsed time goes backwards at `index`
    #[error("time decreases at sample {index}")]
    NonMonotonicTime {
        /// First sample whose time is lower than its predecessor
        index: usize,
    },
}

/// Elapsed time vs. cumulative distance samples for one activity
///
/// Values are whole seconds and whole meters, matching sensor granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetrySeries {
    activity_id: ActivityId,
    time: Vec<i64>,
    distance: Vec<i64>,
}

impl TelemetrySeries {
    /// Create a series from integer samples
    #[must_use]
    pub fn new(activity_id: ActivityId, time: Vec<i64>, distance: Vec<i64>) -> Self {
        Self {
            activity_id,
            time,
            distance,
        }
    }

    /// Create a series from raw stream values, truncating toward zero
    #[must_use]
    pub fn from_raw(activity_id: ActivityId, time: &[f64], distance: &[f64]) -> Self {
        Self {
            activity_id,
            time: time.iter().map(|t| t.trunc() as i64).collect(),
            distance: distance.iter().map(|d| d.trunc() as i64).collect(),
        }
    }

    /// Activity this series belongs to
    #[must_use]
    pub const fn activity_id(&self) -> ActivityId {
        self.activity_id
    }

    /// Elapsed seconds per sample
    #[must_use]
    pub fn time(&self) -> &[i64] {
        &self.time
    }

    /// Cumulative meters per sample
    #[must_use]
    pub fn distance(&self) -> &[i64] {
        &self.distance
    }

    /// Number of samples (time axis)
    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the series has no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Check the series can be scanned
    ///
    /// # Errors
    ///
    /// Returns the first [`SeriesDefect`] found: empty series, mismatched
    /// lengths, or decreasing time. Repeated timestamps are accepted.
    pub fn check(&self) -> Result<(), SeriesDefect> {
        if self.time.len() != self.distance.len() {
            return Err(SeriesDefect::LengthMismatch {
                time: self.time.len(),
                distance: self.distance.len(),
            });
        }
        if self.time.is_empty() {
            return Err(SeriesDefect::Empty);
        }
        if let Some(index) = self
            .time
            .windows(2)
            .position(|pair| pair[1] < pair[0])
            .map(|i| i + 1)
        {
            return Err(SeriesDefect::NonMonotonicTime { index });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_truncates() {
        let series = TelemetrySeries::from_raw(ActivityId(3), &[0.0, 1.9, 2.5], &[0.4, 3.99, 7.0]);
        assert_eq!(series.time(), &[0, 1, 2]);
        assert_eq!(series.distance(), &[0, 3, 7]);
    }

    #[test]
    fn test_check_accepts_repeated_timestamps() {
        let series = TelemetrySeries::new(ActivityId(1), vec![0, 5, 5, 9], vec![0, 10, 12, 30]);
        assert_eq!(series.check(), Ok(()));
    }

    #[test]
    fn test_check_reports_defects() {
        let mismatch = TelemetrySeries::new(ActivityId(1), vec![0, 1], vec![0]);
        assert_eq!(
            mismatch.check(),
            Err(SeriesDefect::LengthMismatch {
                time: 2,
                distance: 1
            })
        );

        let empty = TelemetrySeries::new(ActivityId(1), vec![], vec![]);
        assert_eq!(empty.check(), Err(SeriesDefect::Empty));

        let backwards = TelemetrySeries::new(ActivityId(1), vec![0, 10, 4], vec![0, 1, 2]);
        assert_eq!(
            backwards.check(),
            Err(SeriesDefect::NonMonotonicTime { index: 2 })
        );
    }
}
