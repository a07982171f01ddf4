//! Snapping: aligning dragged edges to timeline anchors.
//!
//! The anchor set is every interesting time on the timeline: zero, the
//! playhead, every other clip's start and end, and every marker. The
//! snap window is a fixed pixel distance converted to seconds through
//! the current zoom, so snapping feels the same at every zoom level.

use reelcore_common::time::px_to_secs;
use reelcore_project_model::ProjectState;

/// Snap window in display pixels.
pub const SNAP_THRESHOLD_PX: f64 = 10.0;

/// Result of a snap search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The position to use: the anchor when snapped, otherwise the
    /// proposed position unchanged.
    pub time: f64,
    /// The anchor that captured the edge, for snap-line feedback.
    pub anchor: Option<f64>,
}

/// The snap window in seconds under the project's current zoom.
pub fn threshold_secs(project: &ProjectState) -> f64 {
    px_to_secs(SNAP_THRESHOLD_PX, project.zoom)
}

/// Collect anchor candidates, excluding the dragged clip's own edges.
pub fn anchor_candidates(project: &ProjectState, exclude_clip: Option<&str>) -> Vec<f64> {
    let mut anchors = vec![0.0, project.current_time];
    for clip in &project.clips {
        if Some(clip.id.as_str()) == exclude_clip {
            continue;
        }
        anchors.push(clip.start_offset);
        anchors.push(clip.end());
    }
    for marker in &project.markers {
        anchors.push(marker.time_secs);
    }
    anchors
}

/// Find the closest anchor within `threshold` of `proposed`.
///
/// When one is found the returned time equals the anchor exactly (not
/// approximately); otherwise the proposed time passes through.
pub fn snap_time(proposed: f64, anchors: &[f64], threshold: f64) -> SnapResult {
    let mut best: Option<f64> = None;
    let mut best_dist = threshold;
    for &anchor in anchors {
        let dist = (anchor - proposed).abs();
        if dist <= best_dist {
            best_dist = dist;
            best = Some(anchor);
        }
    }
    match best {
        Some(anchor) => SnapResult {
            time: anchor,
            anchor: Some(anchor),
        },
        None => SnapResult {
            time: proposed,
            anchor: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcore_project_model::{AssetRecord, Clip, ClipKind, Marker};

    fn project() -> ProjectState {
        let asset = AssetRecord {
            id: "a".to_string(),
            kind: ClipKind::Video,
            locator: "blob:a".to_string(),
            duration_secs: 5.0,
            thumbnail: None,
        };
        let clip = Clip::from_asset("c1", &asset, "track-video-1", 3.0);
        ProjectState::new(60.0)
            .with_clips(vec![clip])
            .with_markers(vec![Marker::new("m1", 12.0, "beat")])
            .with_current_time(20.0)
    }

    #[test]
    fn test_anchor_set_contents() {
        let project = project();
        let anchors = anchor_candidates(&project, None);
        assert!(anchors.contains(&0.0));
        assert!(anchors.contains(&20.0)); // playhead
        assert!(anchors.contains(&3.0)); // clip start
        assert!(anchors.contains(&8.0)); // clip end
        assert!(anchors.contains(&12.0)); // marker
    }

    #[test]
    fn test_excluded_clip_contributes_no_anchors() {
        let project = project();
        let anchors = anchor_candidates(&project, Some("c1"));
        assert!(!anchors.contains(&3.0));
        assert!(!anchors.contains(&8.0));
    }

    #[test]
    fn test_snap_is_exact_within_threshold() {
        let result = snap_time(7.93, &[8.0], 0.2);
        assert_eq!(result.time, 8.0);
        assert_eq!(result.anchor, Some(8.0));
    }

    #[test]
    fn test_no_snap_outside_threshold() {
        let result = snap_time(7.5, &[8.0], 0.2);
        assert_eq!(result.time, 7.5);
        assert!(result.anchor.is_none());
    }

    #[test]
    fn test_closest_anchor_wins() {
        let result = snap_time(5.4, &[5.0, 5.5], 0.5);
        assert_eq!(result.time, 5.5);
    }

    #[test]
    fn test_threshold_scales_with_zoom() {
        let mut project = project();
        project.zoom = 100.0;
        assert!((threshold_secs(&project) - 0.1).abs() < 1e-9);
        project.zoom = 10.0;
        assert!((threshold_secs(&project) - 1.0).abs() < 1e-9);
    }
}
