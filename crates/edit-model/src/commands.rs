//! Edit commands: every timeline mutation as a pure value.
//!
//! A `Command` describes one edit; `apply` turns a state into the next
//! state without touching the original. Rejections leave the caller
//! holding the prior valid state, so the data model can never be
//! observed with a clip shorter than the minimum or a negative source
//! offset.

use serde::{Deserialize, Serialize};

use reelcore_project_model::{
    AssetRecord, Clip, ClipKind, ClipProperties, Marker, ProjectState, Track, TrackFlag,
    Transition, MIN_CLIP_DURATION,
};

use crate::error::{EditError, EditResult};

/// Timeline length of an inserted freeze-frame still, seconds.
pub const FREEZE_FRAME_DURATION: f64 = 2.0;

/// One timeline edit. Serializable so a session can journal its edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Move a clip along the timeline and optionally to another track.
    MoveClip {
        clip_id: String,
        new_start: f64,
        new_track: Option<String>,
    },
    /// Trim the clip's in-point: the out-point stays fixed, so duration
    /// shrinks and `source_start` advances by the same amount.
    TrimClipLeft { clip_id: String, new_start: f64 },
    /// Trim the clip's out-point: the in-point stays fixed.
    TrimClipRight { clip_id: String, new_end: f64 },
    /// Split a clip into two at a time strictly inside its interval.
    /// `new_id` names the tail fragment and must be unused.
    SplitClip {
        clip_id: String,
        at: f64,
        new_id: String,
    },
    /// Capture a still at `at`, insert it as a 2-second image clip, and
    /// ripple every clip starting at or after `at` forward by 2 seconds.
    /// `still_id` and `tail_id` name the new clips and must be unused.
    FreezeFrame {
        clip_id: String,
        at: f64,
        still_id: String,
        tail_id: String,
    },
    /// Materialize a clipboard snapshot at `at`.
    PasteClip {
        snapshot: Box<Clip>,
        new_id: String,
        at: f64,
    },
    /// Remove a clip.
    DeleteClip { clip_id: String },
    /// Place a clip for an ingested asset.
    AddClipFromAsset {
        new_clip_id: String,
        asset_id: String,
        track_id: String,
        at: f64,
    },
    /// Select one clip (or clear the selection with `None`).
    SelectClip { clip_id: Option<String> },
    /// Replace a clip's property bag.
    SetClipProperties {
        clip_id: String,
        properties: Box<ClipProperties>,
    },
    /// Set or clear a clip's entry transition.
    SetTransition {
        clip_id: String,
        transition: Option<Transition>,
    },
    /// Add a marker.
    AddMarker { marker: Marker },
    /// Move a marker.
    MoveMarker { marker_id: String, time: f64 },
    /// Remove a marker.
    RemoveMarker { marker_id: String },
    /// Toggle one flag on a track.
    ToggleTrackFlag { track_id: String, flag: TrackFlag },
    /// Append a track.
    AddTrack { track: Track },
    /// Move the playhead.
    SeekPlayhead { time: f64 },
}

impl Command {
    /// Apply this command, producing the next state.
    pub fn apply(&self, state: &ProjectState) -> EditResult<ProjectState> {
        tracing::debug!(command = self.name(), "applying edit command");
        match self {
            Command::MoveClip {
                clip_id,
                new_start,
                new_track,
            } => move_clip(state, clip_id, *new_start, new_track.as_deref()),
            Command::TrimClipLeft { clip_id, new_start } => {
                trim_left(state, clip_id, *new_start)
            }
            Command::TrimClipRight { clip_id, new_end } => trim_right(state, clip_id, *new_end),
            Command::SplitClip {
                clip_id,
                at,
                new_id,
            } => split_clip(state, clip_id, *at, new_id),
            Command::FreezeFrame {
                clip_id,
                at,
                still_id,
                tail_id,
            } => freeze_frame(state, clip_id, *at, still_id, tail_id),
            Command::PasteClip {
                snapshot,
                new_id,
                at,
            } => paste_clip(state, snapshot, new_id, *at),
            Command::DeleteClip { clip_id } => delete_clip(state, clip_id),
            Command::AddClipFromAsset {
                new_clip_id,
                asset_id,
                track_id,
                at,
            } => add_clip_from_asset(state, new_clip_id, asset_id, track_id, *at),
            Command::SelectClip { clip_id } => select_clip(state, clip_id.as_deref()),
            Command::SetClipProperties {
                clip_id,
                properties,
            } => with_clip(state, clip_id, |c| c.properties = (**properties).clone()),
            Command::SetTransition {
                clip_id,
                transition,
            } => with_clip(state, clip_id, |c| c.transition = transition.clone()),
            Command::AddMarker { marker } => {
                let mut markers = state.markers.clone();
                markers.push(marker.clone());
                Ok(state.with_markers(markers))
            }
            Command::MoveMarker { marker_id, time } => move_marker(state, marker_id, *time),
            Command::RemoveMarker { marker_id } => {
                if !state.markers.iter().any(|m| m.id == *marker_id) {
                    return Err(EditError::MarkerNotFound {
                        id: marker_id.clone(),
                    });
                }
                let markers = state
                    .markers
                    .iter()
                    .filter(|m| m.id != *marker_id)
                    .cloned()
                    .collect();
                Ok(state.with_markers(markers))
            }
            Command::ToggleTrackFlag { track_id, flag } => toggle_track_flag(state, track_id, *flag),
            Command::AddTrack { track } => {
                let mut tracks = state.tracks.clone();
                tracks.push(track.clone());
                Ok(state.with_tracks(tracks))
            }
            Command::SeekPlayhead { time } => Ok(state.with_current_time(*time)),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::MoveClip { .. } => "move_clip",
            Command::TrimClipLeft { .. } => "trim_clip_left",
            Command::TrimClipRight { .. } => "trim_clip_right",
            Command::SplitClip { .. } => "split_clip",
            Command::FreezeFrame { .. } => "freeze_frame",
            Command::PasteClip { .. } => "paste_clip",
            Command::DeleteClip { .. } => "delete_clip",
            Command::AddClipFromAsset { .. } => "add_clip_from_asset",
            Command::SelectClip { .. } => "select_clip",
            Command::SetClipProperties { .. } => "set_clip_properties",
            Command::SetTransition { .. } => "set_transition",
            Command::AddMarker { .. } => "add_marker",
            Command::MoveMarker { .. } => "move_marker",
            Command::RemoveMarker { .. } => "remove_marker",
            Command::ToggleTrackFlag { .. } => "toggle_track_flag",
            Command::AddTrack { .. } => "add_track",
            Command::SeekPlayhead { .. } => "seek_playhead",
        }
    }
}

fn find_clip<'a>(state: &'a ProjectState, clip_id: &str) -> EditResult<&'a Clip> {
    state.clip(clip_id).ok_or_else(|| EditError::ClipNotFound {
        id: clip_id.to_string(),
    })
}

fn ensure_unlocked(state: &ProjectState, track_id: &str) -> EditResult<()> {
    let track = state.track(track_id).ok_or_else(|| EditError::TrackNotFound {
        id: track_id.to_string(),
    })?;
    if track.locked {
        return Err(EditError::TrackLocked {
            id: track_id.to_string(),
        });
    }
    Ok(())
}

/// Commands that introduce a clip take its id from the caller; the id
/// must not collide with any clip already in the project.
fn ensure_id_free(state: &ProjectState, id: &str) -> EditResult<()> {
    if state.clip(id).is_some() {
        return Err(EditError::DuplicateClipId { id: id.to_string() });
    }
    Ok(())
}

fn kind_label(kind: ClipKind) -> &'static str {
    match kind {
        ClipKind::Video => "video",
        ClipKind::Image => "image",
        ClipKind::Audio => "audio",
        ClipKind::Text => "text",
    }
}

fn track_kind_label(kind: reelcore_project_model::TrackKind) -> &'static str {
    match kind {
        reelcore_project_model::TrackKind::Video => "video",
        reelcore_project_model::TrackKind::Audio => "audio",
        reelcore_project_model::TrackKind::Text => "text",
    }
}

/// Apply a closure to one clip, replacing the clip list.
fn with_clip(
    state: &ProjectState,
    clip_id: &str,
    edit: impl FnOnce(&mut Clip),
) -> EditResult<ProjectState> {
    find_clip(state, clip_id)?;
    let mut clips = state.clips.clone();
    if let Some(clip) = clips.iter_mut().find(|c| c.id == clip_id) {
        edit(clip);
    }
    Ok(state.with_clips(clips))
}

fn move_clip(
    state: &ProjectState,
    clip_id: &str,
    new_start: f64,
    new_track: Option<&str>,
) -> EditResult<ProjectState> {
    let clip = find_clip(state, clip_id)?;
    ensure_unlocked(state, &clip.track_id)?;

    let target_track = match new_track {
        Some(track_id) => {
            let track = state.track(track_id).ok_or_else(|| EditError::TrackNotFound {
                id: track_id.to_string(),
            })?;
            if track.kind != clip.kind.track_kind() {
                return Err(EditError::IncompatibleTrack {
                    clip_kind: kind_label(clip.kind),
                    track_kind: track_kind_label(track.kind),
                });
            }
            if track.locked {
                return Err(EditError::TrackLocked {
                    id: track.id.clone(),
                });
            }
            Some(track.id.clone())
        }
        None => None,
    };

    with_clip(state, clip_id, |c| {
        c.start_offset = new_start.max(0.0);
        if let Some(track_id) = target_track {
            c.track_id = track_id;
        }
    })
}

fn trim_left(state: &ProjectState, clip_id: &str, new_start: f64) -> EditResult<ProjectState> {
    let clip = find_clip(state, clip_id)?;
    ensure_unlocked(state, &clip.track_id)?;

    let delta = new_start - clip.start_offset;
    let new_duration = clip.duration - delta;
    let new_source_start = clip.source_start + delta;

    if new_start < 0.0 || new_duration < MIN_CLIP_DURATION {
        return Err(EditError::InvalidGeometry {
            message: format!("trim-left would leave duration {new_duration:.3}s"),
        });
    }
    if new_source_start < 0.0 {
        return Err(EditError::InvalidGeometry {
            message: format!("trim-left would need source offset {new_source_start:.3}s"),
        });
    }

    with_clip(state, clip_id, |c| {
        c.start_offset = new_start;
        c.duration = new_duration;
        c.source_start = new_source_start;
    })
}

fn trim_right(state: &ProjectState, clip_id: &str, new_end: f64) -> EditResult<ProjectState> {
    let clip = find_clip(state, clip_id)?;
    ensure_unlocked(state, &clip.track_id)?;
    let new_duration = (new_end - clip.start_offset).max(MIN_CLIP_DURATION);
    with_clip(state, clip_id, |c| c.duration = new_duration)
}

fn split_clip(
    state: &ProjectState,
    clip_id: &str,
    at: f64,
    new_id: &str,
) -> EditResult<ProjectState> {
    let clip = find_clip(state, clip_id)?.clone();
    ensure_unlocked(state, &clip.track_id)?;
    ensure_id_free(state, new_id)?;

    if at <= clip.start_offset || at >= clip.end() {
        return Err(EditError::OutsideClip { time: at });
    }
    let offset = at - clip.start_offset;
    if offset < MIN_CLIP_DURATION || clip.duration - offset < MIN_CLIP_DURATION {
        return Err(EditError::InvalidGeometry {
            message: "split would leave a fragment below the minimum duration".to_string(),
        });
    }

    // A transition belongs to a clip's own entry; it does not carry
    // across a cut.
    let mut tail = clip.clone();
    tail.id = new_id.to_string();
    tail.start_offset = at;
    tail.duration = clip.duration - offset;
    tail.source_start = clip.source_start + offset;
    tail.transition = None;
    tail.selected = false;

    let clips = state
        .clips
        .iter()
        .map(|c| {
            if c.id == clip.id {
                let mut head = c.clone();
                head.duration = offset;
                head
            } else {
                c.clone()
            }
        })
        .chain(std::iter::once(tail))
        .collect();
    Ok(state.with_clips(clips))
}

fn freeze_frame(
    state: &ProjectState,
    clip_id: &str,
    at: f64,
    still_id: &str,
    tail_id: &str,
) -> EditResult<ProjectState> {
    let clip = find_clip(state, clip_id)?.clone();
    ensure_unlocked(state, &clip.track_id)?;
    ensure_id_free(state, still_id)?;
    ensure_id_free(state, tail_id)?;
    if still_id == tail_id {
        return Err(EditError::DuplicateClipId {
            id: still_id.to_string(),
        });
    }
    if !clip.kind.is_visual() {
        return Err(EditError::InvalidGeometry {
            message: "freeze-frame needs a visual clip".to_string(),
        });
    }
    if at <= clip.start_offset || at >= clip.end() {
        return Err(EditError::OutsideClip { time: at });
    }
    let offset = at - clip.start_offset;
    if offset < MIN_CLIP_DURATION || clip.duration - offset < MIN_CLIP_DURATION {
        return Err(EditError::InvalidGeometry {
            message: "freeze-frame would leave a fragment below the minimum duration".to_string(),
        });
    }

    // Captured still as a new asset. The ingestion collaborator owns the
    // actual pixels; the locator records which frame was grabbed.
    let still_asset = AssetRecord {
        id: format!("{still_id}-asset"),
        kind: ClipKind::Image,
        locator: format!("still:{}@{:.3}", clip.locator, at),
        duration_secs: FREEZE_FRAME_DURATION,
        thumbnail: None,
    };
    let mut still = Clip::from_asset(still_id, &still_asset, clip.track_id.clone(), at);
    still.name = format!("{} (freeze)", clip.name);

    let mut tail = clip.clone();
    tail.id = tail_id.to_string();
    tail.start_offset = at + FREEZE_FRAME_DURATION;
    tail.duration = clip.duration - offset;
    tail.source_start = clip.source_start + offset;
    tail.transition = None;
    tail.selected = false;

    // Build the whole replacement list before committing: either every
    // shifted clip updates or none do.
    let clips: Vec<Clip> = state
        .clips
        .iter()
        .map(|c| {
            if c.id == clip.id {
                let mut head = c.clone();
                head.duration = offset;
                head
            } else if c.start_offset >= at {
                let mut shifted = c.clone();
                shifted.start_offset += FREEZE_FRAME_DURATION;
                shifted
            } else {
                c.clone()
            }
        })
        .chain([still, tail])
        .collect();

    let mut assets = state.assets.clone();
    assets.push(still_asset);

    Ok(state.with_assets(assets).with_clips(clips))
}

fn paste_clip(
    state: &ProjectState,
    snapshot: &Clip,
    new_id: &str,
    at: f64,
) -> EditResult<ProjectState> {
    ensure_id_free(state, new_id)?;
    let wanted_kind = snapshot.kind.track_kind();
    let target = state
        .track(&snapshot.track_id)
        .filter(|t| t.kind == wanted_kind)
        .or_else(|| state.first_track_of_kind(wanted_kind))
        .ok_or(EditError::NoCompatibleTrack {
            clip_kind: kind_label(snapshot.kind),
        })?;
    ensure_unlocked(state, &target.id)?;

    let mut pasted = snapshot.clone();
    pasted.id = new_id.to_string();
    pasted.track_id = target.id.clone();
    pasted.start_offset = at.max(0.0);
    pasted.selected = false;

    let mut clips = state.clips.clone();
    clips.push(pasted);
    Ok(state.with_clips(clips))
}

fn delete_clip(state: &ProjectState, clip_id: &str) -> EditResult<ProjectState> {
    let clip = find_clip(state, clip_id)?;
    ensure_unlocked(state, &clip.track_id)?;
    let clips = state
        .clips
        .iter()
        .filter(|c| c.id != clip_id)
        .cloned()
        .collect();
    Ok(state.with_clips(clips))
}

fn add_clip_from_asset(
    state: &ProjectState,
    new_clip_id: &str,
    asset_id: &str,
    track_id: &str,
    at: f64,
) -> EditResult<ProjectState> {
    ensure_id_free(state, new_clip_id)?;
    let asset = state.asset(asset_id).ok_or_else(|| EditError::AssetNotFound {
        id: asset_id.to_string(),
    })?;
    let track = state.track(track_id).ok_or_else(|| EditError::TrackNotFound {
        id: track_id.to_string(),
    })?;
    if track.kind != asset.kind.track_kind() {
        return Err(EditError::IncompatibleTrack {
            clip_kind: kind_label(asset.kind),
            track_kind: track_kind_label(track.kind),
        });
    }
    ensure_unlocked(state, track_id)?;

    let clip = Clip::from_asset(new_clip_id, asset, track_id, at);
    let mut clips = state.clips.clone();
    clips.push(clip);
    Ok(state.with_clips(clips))
}

fn select_clip(state: &ProjectState, clip_id: Option<&str>) -> EditResult<ProjectState> {
    if let Some(id) = clip_id {
        find_clip(state, id)?;
    }
    let clips = state
        .clips
        .iter()
        .map(|c| {
            let mut next = c.clone();
            next.selected = Some(c.id.as_str()) == clip_id;
            next
        })
        .collect();
    Ok(state.with_clips(clips))
}

fn move_marker(state: &ProjectState, marker_id: &str, time: f64) -> EditResult<ProjectState> {
    if !state.markers.iter().any(|m| m.id == marker_id) {
        return Err(EditError::MarkerNotFound {
            id: marker_id.to_string(),
        });
    }
    let markers = state
        .markers
        .iter()
        .map(|m| {
            if m.id == marker_id {
                let mut next = m.clone();
                next.time_secs = time.max(0.0);
                next
            } else {
                m.clone()
            }
        })
        .collect();
    Ok(state.with_markers(markers))
}

fn toggle_track_flag(
    state: &ProjectState,
    track_id: &str,
    flag: TrackFlag,
) -> EditResult<ProjectState> {
    if state.track(track_id).is_none() {
        return Err(EditError::TrackNotFound {
            id: track_id.to_string(),
        });
    }
    let tracks = state
        .tracks
        .iter()
        .map(|t| {
            if t.id == track_id {
                let mut next = t.clone();
                match flag {
                    TrackFlag::Muted => next.muted = !next.muted,
                    TrackFlag::Locked => next.locked = !next.locked,
                    TrackFlag::Solo => next.solo = !next.solo,
                    TrackFlag::RecordArmed => next.record_armed = !next.record_armed,
                }
                next
            } else {
                t.clone()
            }
        })
        .collect();
    Ok(state.with_tracks(tracks))
}
