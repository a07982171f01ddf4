//! Speed-ramp resolution: mapping timeline progress to source time.
//!
//! A ramp is a piecewise-linear speed curve over the clip's timeline
//! duration. Source time consumed up to a progress point is the integral
//! of speed over timeline time. Because speed changes linearly within a
//! segment, each fully-traversed segment contributes
//! `segment_duration * average(speed_start, speed_end)` (trapezoid rule,
//! exact for linear speed); using an endpoint speed instead would
//! systematically bias the result.

use reelcore_project_model::RampPoint;

/// Source-media seconds consumed from clip start up to `progress`.
///
/// `progress` is a 0..1 fraction of `timeline_duration`; the caller
/// clamps it before calling. `points` must be sorted by `time` and
/// non-empty. Runs in O(points) with no allocation; called every
/// rendered frame.
pub fn source_time_at_progress(
    progress: f64,
    timeline_duration: f64,
    points: &[RampPoint],
) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    if points.len() == 1 {
        return progress * timeline_duration * first.speed;
    }

    let mut consumed = 0.0;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let time_diff = b.time - a.time;
        if time_diff <= 0.0 {
            continue;
        }

        if progress >= b.time {
            // Fully traversed segment.
            consumed += time_diff * timeline_duration * (a.speed + b.speed) / 2.0;
        } else if progress > a.time {
            // Partial final segment: interpolate the instantaneous speed
            // at `progress`, then average against the segment start.
            let frac = (progress - a.time) / time_diff;
            let speed_here = a.speed + (b.speed - a.speed) * frac;
            consumed += (progress - a.time) * timeline_duration * (a.speed + speed_here) / 2.0;
            return consumed;
        } else {
            return consumed;
        }
    }
    consumed
}

/// Total source-media seconds a ramped clip consumes over its full
/// timeline duration. Identical to `source_time_at_progress(1.0, ..)`.
pub fn ramped_source_duration(timeline_duration: f64, points: &[RampPoint]) -> f64 {
    source_time_at_progress(1.0, timeline_duration, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pt(time: f64, speed: f64) -> RampPoint {
        RampPoint { time, speed }
    }

    #[test]
    fn test_flat_ramp_is_linear() {
        let points = [pt(0.0, 2.0), pt(1.0, 2.0)];
        assert!((source_time_at_progress(0.5, 10.0, &points) - 10.0).abs() < 1e-9);
        assert!((source_time_at_progress(1.0, 10.0, &points) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_trapezoid_integration_matches_spec_scenario() {
        // Ramp 1 -> 2 -> 1 over a 10s clip: at progress 0.5 the source
        // consumed is the trapezoid from speed 1 to 2 over 5 timeline
        // seconds = 5 * (1+2)/2 = 7.5.
        let points = [pt(0.0, 1.0), pt(0.5, 2.0), pt(1.0, 1.0)];
        assert!((source_time_at_progress(0.5, 10.0, &points) - 7.5).abs() < 1e-9);
        // Full traversal is symmetric: 7.5 + 7.5 = 15.
        assert!((ramped_source_duration(10.0, &points) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_progress_at_end_matches_total_duration() {
        let points = [pt(0.0, 0.5), pt(0.3, 3.0), pt(0.8, 1.0), pt(1.0, 2.0)];
        let at_end = source_time_at_progress(1.0, 7.0, &points);
        let total = ramped_source_duration(7.0, &points);
        assert!((at_end - total).abs() < 1e-12);
    }

    #[test]
    fn test_zero_width_segment_does_not_divide_by_zero() {
        let points = [pt(0.0, 1.0), pt(0.5, 1.0), pt(0.5, 4.0), pt(1.0, 4.0)];
        let v = source_time_at_progress(1.0, 10.0, &points);
        assert!(v.is_finite());
        // 5s at speed 1, 5s averaging 4 (the jump contributes nothing).
        assert!((v - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_point_ramp() {
        let points = [pt(0.0, 2.0)];
        assert!((source_time_at_progress(0.5, 10.0, &points) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_points_yield_zero() {
        assert_eq!(source_time_at_progress(0.5, 10.0, &[]), 0.0);
    }

    #[test]
    fn test_progress_zero_consumes_nothing() {
        let points = [pt(0.0, 1.0), pt(1.0, 3.0)];
        assert_eq!(source_time_at_progress(0.0, 10.0, &points), 0.0);
    }

    proptest! {
        /// Consumed source time never decreases as progress grows.
        #[test]
        fn prop_monotonic_in_progress(p1 in 0.0f64..=1.0, p2 in 0.0f64..=1.0) {
            let points = [pt(0.0, 0.5), pt(0.4, 2.5), pt(1.0, 1.0)];
            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let a = source_time_at_progress(lo, 10.0, &points);
            let b = source_time_at_progress(hi, 10.0, &points);
            prop_assert!(b >= a - 1e-9);
        }

        /// Consumption is bounded by the slowest and fastest speeds on
        /// the ramp.
        #[test]
        fn prop_bounded_by_extreme_speeds(p in 0.0f64..=1.0) {
            let points = [pt(0.0, 0.5), pt(0.5, 3.0), pt(1.0, 1.0)];
            let consumed = source_time_at_progress(p, 10.0, &points);
            prop_assert!(consumed >= p * 10.0 * 0.5 - 1e-9);
            prop_assert!(consumed <= p * 10.0 * 3.0 + 1e-9);
        }
    }
}
