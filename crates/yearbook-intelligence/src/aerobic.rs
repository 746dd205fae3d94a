// ABOUTME: Cooper 12-minute test regression converting a best effort into a VO2max estimate
// ABOUTME: Returns a zero estimate when no qualifying effort was found
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use yearbook_core::constants::cooper;
use yearbook_core::models::{AerobicEstimate, BestEffortResult};

/// `VO2max` (ml/kg/min) for a 12-minute distance in meters
///
/// `(distance - 504.9) / 44.73`. Distances below the intercept give negative
/// values; callers decide whether that is meaningful.
#[must_use]
pub fn cooper_vo2max(distance_meters: f64) -> f64 {
    (distance_meters - cooper::INTERCEPT_M) / cooper::SLOPE_M
}

/// Aerobic estimate for the best effort of a year
///
/// No qualifying effort means no estimate: value `0.0` and no source activity.
#[must_use]
pub fn estimate(best: &BestEffortResult) -> AerobicEstimate {
    if best.is_zero() {
        return AerobicEstimate::default();
    }
    AerobicEstimate {
        value: cooper_vo2max(best.distance_meters),
        source_activity_id: best.activity_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yearbook_core::models::ActivityId;

    #[test]
    fn test_cooper_reference_points() {
        assert!((cooper_vo2max(3000.0) - 55.781_355).abs() < 1e-5);
        assert!((cooper_vo2max(2400.0) - 42.367_539).abs() < 1e-5);
    }

    #[test]
    fn test_estimate_carries_source_activity() {
        let best = BestEffortResult {
            distance_meters: 2400.0,
            activity_id: Some(ActivityId(77)),
        };
        let estimate = estimate(&best);
        assert_eq!(estimate.source_activity_id, Some(ActivityId(77)));
        assert!((estimate.value - 42.367_539).abs() < 1e-5);
    }

    #[test]
    fn test_no_effort_no_estimate() {
        let estimate = estimate(&BestEffortResult::zero());
        assert_eq!(estimate, AerobicEstimate::default());
    }
}
