//! Pointer gestures: move, trim, and marker drags with snapping.
//!
//! A gesture captures the dragged object's geometry at pointer-down and
//! derives every update from that origin plus the current pointer time.
//! Each update produces a full candidate state by applying a command;
//! when the command rejects (locked target, geometry below the minimum)
//! the update returns the incoming state unchanged, so a drag can never
//! leave the timeline invalid mid-gesture.

use reelcore_project_model::ProjectState;

use crate::commands::Command;
use crate::error::{EditError, EditResult};
use crate::snap::{anchor_candidates, snap_time, threshold_secs, SnapResult};

/// What part of the clip the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Body grab: the whole clip moves.
    Move,
    /// Left-edge grab: trim the in-point.
    ResizeLeft,
    /// Right-edge grab: trim the out-point.
    ResizeRight,
}

/// One frame of gesture feedback.
#[derive(Debug, Clone)]
pub struct DragUpdate {
    /// The state after this pointer position, or the incoming state
    /// unchanged when the move was rejected.
    pub state: ProjectState,
    /// Anchor time an edge snapped to, for drawing the snap line.
    pub snap_line: Option<f64>,
}

/// An in-flight clip drag.
#[derive(Debug, Clone)]
pub struct DragGesture {
    pub mode: DragMode,
    pub clip_id: String,
    origin_pointer_time: f64,
    origin_start: f64,
    origin_duration: f64,
}

impl DragGesture {
    /// Start a gesture on a clip. Fails when the clip is missing or its
    /// track is locked, so a locked clip never starts moving at all.
    pub fn begin(
        project: &ProjectState,
        clip_id: &str,
        mode: DragMode,
        pointer_time: f64,
    ) -> EditResult<Self> {
        let clip = project.clip(clip_id).ok_or_else(|| EditError::ClipNotFound {
            id: clip_id.to_string(),
        })?;
        let track = project
            .track(&clip.track_id)
            .ok_or_else(|| EditError::TrackNotFound {
                id: clip.track_id.clone(),
            })?;
        if track.locked {
            return Err(EditError::TrackLocked {
                id: track.id.clone(),
            });
        }
        Ok(Self {
            mode,
            clip_id: clip_id.to_string(),
            origin_pointer_time: pointer_time,
            origin_start: clip.start_offset,
            origin_duration: clip.duration,
        })
    }

    /// Compute the state for the current pointer position.
    ///
    /// `hover_track` is the track under the pointer, if any; the clip
    /// only switches tracks when that track can host its kind and is
    /// unlocked, otherwise it stays where it is.
    pub fn update(
        &self,
        project: &ProjectState,
        pointer_time: f64,
        hover_track: Option<&str>,
    ) -> DragUpdate {
        let delta = pointer_time - self.origin_pointer_time;
        let anchors = anchor_candidates(project, Some(&self.clip_id));
        let threshold = threshold_secs(project);

        let (command, snap_line) = match self.mode {
            DragMode::Move => {
                let proposed_start = (self.origin_start + delta).max(0.0);
                let proposed_end = proposed_start + self.origin_duration;

                // Both edges compete for the snap; the closer one wins.
                let start_snap = snap_time(proposed_start, &anchors, threshold);
                let end_snap = snap_time(proposed_end, &anchors, threshold);
                let (new_start, snap_line) =
                    pick_edge_snap(proposed_start, proposed_end, start_snap, end_snap);

                let new_track = hover_track.and_then(|track_id| {
                    let clip = project.clip(&self.clip_id)?;
                    let track = project.track(track_id)?;
                    (track.kind == clip.kind.track_kind() && !track.locked)
                        .then(|| track.id.clone())
                });

                (
                    Command::MoveClip {
                        clip_id: self.clip_id.clone(),
                        new_start,
                        new_track,
                    },
                    snap_line,
                )
            }
            DragMode::ResizeLeft => {
                let snap = snap_time(self.origin_start + delta, &anchors, threshold);
                (
                    Command::TrimClipLeft {
                        clip_id: self.clip_id.clone(),
                        new_start: snap.time,
                    },
                    snap.anchor,
                )
            }
            DragMode::ResizeRight => {
                let proposed_end = self.origin_start + self.origin_duration + delta;
                let snap = snap_time(proposed_end, &anchors, threshold);
                (
                    Command::TrimClipRight {
                        clip_id: self.clip_id.clone(),
                        new_end: snap.time,
                    },
                    snap.anchor,
                )
            }
        };

        match command.apply(project) {
            Ok(state) => DragUpdate { state, snap_line },
            // Rejected positions pass through without moving anything.
            Err(_) => DragUpdate {
                state: project.clone(),
                snap_line: None,
            },
        }
    }
}

/// Choose which edge's snap applies when moving a whole clip: the edge
/// whose anchor is nearer, start winning ties.
fn pick_edge_snap(
    proposed_start: f64,
    proposed_end: f64,
    start_snap: SnapResult,
    end_snap: SnapResult,
) -> (f64, Option<f64>) {
    let duration = proposed_end - proposed_start;
    match (start_snap.anchor, end_snap.anchor) {
        (Some(sa), Some(ea)) => {
            if (sa - proposed_start).abs() <= (ea - proposed_end).abs() {
                (sa, Some(sa))
            } else {
                (ea - duration, Some(ea))
            }
        }
        (Some(sa), None) => (sa, Some(sa)),
        (None, Some(ea)) => (ea - duration, Some(ea)),
        (None, None) => (proposed_start, None),
    }
}

/// An in-flight marker drag.
#[derive(Debug, Clone)]
pub struct MarkerDrag {
    pub marker_id: String,
    origin_pointer_time: f64,
    origin_time: f64,
}

impl MarkerDrag {
    /// Start dragging a marker.
    pub fn begin(
        project: &ProjectState,
        marker_id: &str,
        pointer_time: f64,
    ) -> EditResult<Self> {
        let marker = project
            .markers
            .iter()
            .find(|m| m.id == marker_id)
            .ok_or_else(|| EditError::MarkerNotFound {
                id: marker_id.to_string(),
            })?;
        Ok(Self {
            marker_id: marker_id.to_string(),
            origin_pointer_time: pointer_time,
            origin_time: marker.time_secs,
        })
    }

    /// Compute the state for the current pointer position. Markers snap
    /// to clip edges, the playhead, zero, and other markers, but never
    /// to themselves.
    pub fn update(&self, project: &ProjectState, pointer_time: f64) -> DragUpdate {
        let proposed = (self.origin_time + pointer_time - self.origin_pointer_time).max(0.0);

        let mut anchors = vec![0.0, project.current_time];
        for clip in &project.clips {
            anchors.push(clip.start_offset);
            anchors.push(clip.end());
        }
        for marker in &project.markers {
            if marker.id != self.marker_id {
                anchors.push(marker.time_secs);
            }
        }

        let snap = snap_time(proposed, &anchors, threshold_secs(project));
        let command = Command::MoveMarker {
            marker_id: self.marker_id.clone(),
            time: snap.time,
        };
        match command.apply(project) {
            Ok(state) => DragUpdate {
                state,
                snap_line: snap.anchor,
            },
            Err(_) => DragUpdate {
                state: project.clone(),
                snap_line: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcore_project_model::{AssetRecord, Clip, ClipKind, Marker, MIN_CLIP_DURATION};

    fn asset(id: &str, kind: ClipKind) -> AssetRecord {
        AssetRecord {
            id: id.to_string(),
            kind,
            locator: format!("blob:{id}"),
            duration_secs: 30.0,
            thumbnail: None,
        }
    }

    fn clip(id: &str, kind: ClipKind, track: &str, start: f64, dur: f64) -> Clip {
        let mut c = Clip::from_asset(id, &asset(&format!("asset-{id}"), kind), track, start);
        c.duration = dur;
        c
    }

    fn project() -> ProjectState {
        // zoom 50 px/s, so the 10 px window is 0.2 s.
        ProjectState::new(60.0).with_clips(vec![
            clip("v1", ClipKind::Video, "track-video-1", 0.0, 5.0),
            clip("v2", ClipKind::Video, "track-video-2", 8.0, 4.0),
        ])
    }

    #[test]
    fn test_move_snaps_start_edge_to_neighbor_end() {
        let project = project();
        // v2 ends at 12. Drag v1 so its start lands at 11.9.
        let gesture = DragGesture::begin(&project, "v1", DragMode::Move, 2.0).unwrap();
        let update = gesture.update(&project, 13.9, None);
        assert_eq!(update.snap_line, Some(12.0));
        assert_eq!(update.state.clip("v1").unwrap().start_offset, 12.0);
    }

    #[test]
    fn test_move_snaps_trailing_edge_too() {
        let project = project();
        // v1 is 5 s long; put its end near v2's start at 8.
        let gesture = DragGesture::begin(&project, "v1", DragMode::Move, 0.0).unwrap();
        let update = gesture.update(&project, 2.9, None);
        assert_eq!(update.snap_line, Some(8.0));
        assert_eq!(update.state.clip("v1").unwrap().start_offset, 3.0);
    }

    #[test]
    fn test_move_without_nearby_anchor_passes_through() {
        let project = project();
        let gesture = DragGesture::begin(&project, "v1", DragMode::Move, 0.0).unwrap();
        let update = gesture.update(&project, 20.0, None);
        assert!(update.snap_line.is_none());
        assert_eq!(update.state.clip("v1").unwrap().start_offset, 20.0);
    }

    #[test]
    fn test_hover_over_incompatible_track_keeps_track() {
        let project = project();
        let gesture = DragGesture::begin(&project, "v1", DragMode::Move, 0.0).unwrap();
        let update = gesture.update(&project, 20.0, Some("track-audio-1"));
        assert_eq!(update.state.clip("v1").unwrap().track_id, "track-video-1");

        let update = gesture.update(&project, 20.0, Some("track-video-2"));
        assert_eq!(update.state.clip("v1").unwrap().track_id, "track-video-2");
    }

    #[test]
    fn test_resize_right_clamps_at_minimum() {
        let project = project();
        let gesture = DragGesture::begin(&project, "v1", DragMode::ResizeRight, 5.0).unwrap();
        // Drag the out-point far left of the in-point.
        let update = gesture.update(&project, -10.0, None);
        let c = update.state.clip("v1").unwrap();
        assert_eq!(c.duration, MIN_CLIP_DURATION);
        assert_eq!(c.start_offset, 0.0);
    }

    #[test]
    fn test_resize_left_rejection_keeps_state() {
        let project = project();
        // v1 has no source headroom; pulling left is rejected and the
        // clip stays put.
        let gesture = DragGesture::begin(&project, "v1", DragMode::ResizeLeft, 0.0).unwrap();
        let update = gesture.update(&project, -2.0, None);
        let c = update.state.clip("v1").unwrap();
        assert_eq!(c.start_offset, 0.0);
        assert_eq!(c.duration, 5.0);
        assert!(update.snap_line.is_none());
    }

    #[test]
    fn test_locked_track_refuses_gesture() {
        let mut project = project();
        let mut tracks = project.tracks.clone();
        tracks[0].locked = true;
        project = project.with_tracks(tracks);
        let err = DragGesture::begin(&project, "v1", DragMode::Move, 0.0).unwrap_err();
        assert!(matches!(err, EditError::TrackLocked { .. }));
    }

    #[test]
    fn test_marker_drag_snaps_to_clip_edge_not_itself() {
        let project = project().with_markers(vec![Marker::new("m1", 4.9, "cut")]);
        let drag = MarkerDrag::begin(&project, "m1", 4.9).unwrap();
        // Nudge toward v1's end at 5.0; its own old position must not
        // pin the marker at 4.9.
        let update = drag.update(&project, 4.95);
        assert_eq!(update.snap_line, Some(5.0));
        let marker = update
            .state
            .markers
            .iter()
            .find(|m| m.id == "m1")
            .unwrap();
        assert_eq!(marker.time_secs, 5.0);
    }
}
