//! Time and unit utilities for the timeline.
//!
//! The timeline works in seconds; the UI works in display pixels under a
//! zoom factor expressed as pixels-per-second. These conversions are the
//! single place where the two meet, so ruler drawing, clip geometry, and
//! snap thresholds all agree on the mapping.

/// Convert a timeline position in seconds to display pixels.
pub fn secs_to_px(secs: f64, zoom_px_per_sec: f64) -> f64 {
    secs * zoom_px_per_sec
}

/// Convert a display-pixel offset to timeline seconds.
///
/// A non-positive zoom would make every pixel distance infinite; treat it
/// as zero seconds rather than dividing by zero.
pub fn px_to_secs(px: f64, zoom_px_per_sec: f64) -> f64 {
    if zoom_px_per_sec <= 0.0 {
        return 0.0;
    }
    px / zoom_px_per_sec
}

/// Format a time in seconds as `MM:SS.CC` (minutes, seconds, centiseconds).
///
/// Negative inputs are clamped to zero.
pub fn format_timecode(secs: f64) -> String {
    let total = secs.max(0.0);
    let minutes = (total / 60.0).floor() as u64;
    let seconds = (total % 60.0).floor() as u64;
    let centis = ((total * 100.0).floor() as u64) % 100;
    format!("{minutes:02}:{seconds:02}.{centis:02}")
}

/// Duration of a single frame at the given frame rate, in seconds.
pub fn frame_duration_secs(fps: u32) -> f64 {
    1.0 / fps.max(1) as f64
}

/// Number of whole output frames needed to cover `duration_secs` at `fps`.
pub fn frame_count(duration_secs: f64, fps: u32) -> u64 {
    (duration_secs.max(0.0) * fps.max(1) as f64).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_round_trip() {
        let zoom = 50.0;
        let secs = 3.2;
        let px = secs_to_px(secs, zoom);
        assert!((px - 160.0).abs() < 1e-9);
        assert!((px_to_secs(px, zoom) - secs).abs() < 1e-9);
    }

    #[test]
    fn test_px_to_secs_zero_zoom() {
        assert_eq!(px_to_secs(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0.0), "00:00.00");
        assert_eq!(format_timecode(65.25), "01:05.25");
        assert_eq!(format_timecode(600.0), "10:00.00");
        assert_eq!(format_timecode(-3.0), "00:00.00");
    }

    #[test]
    fn test_frame_math() {
        assert!((frame_duration_secs(30) - 1.0 / 30.0).abs() < 1e-12);
        assert_eq!(frame_count(1.0, 30), 30);
        assert_eq!(frame_count(1.01, 30), 31);
        assert_eq!(frame_count(0.0, 30), 0);
    }
}
