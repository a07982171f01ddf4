//! Visibility and mix resolution: which clips are seen and heard at `t`.
//!
//! Solo is global: if any track is soloed, every non-solo track is
//! suppressed, for both picture and sound. Mute is audio-only and acts
//! through the gain, never through visual inclusion. Clip activation
//! intervals are half-open so adjacent clips never both claim the
//! boundary instant.

use reelcore_project_model::{Clip, ClipKind, ProjectState, Track};

/// Clips active at one instant, split by role.
///
/// `visual` and `text` are ordered back-to-front by track position
/// (later tracks on top); text always composites above all visual
/// layers. `audio_only` holds pure audio clips — a video clip's audio
/// travels with its visual feed and must not be played twice.
#[derive(Debug, Clone)]
pub struct ActiveClips<'a> {
    pub visual: Vec<&'a Clip>,
    pub text: Vec<&'a Clip>,
    pub audio_only: Vec<&'a Clip>,
}

/// Whether any track in the project is soloed.
pub fn any_solo(project: &ProjectState) -> bool {
    project.tracks.iter().any(|t| t.solo)
}

/// Whether a track is suppressed under global solo semantics.
pub fn is_suppressed(project: &ProjectState, track: &Track) -> bool {
    any_solo(project) && !track.solo
}

/// Resolve the active clips at time `t`.
///
/// Ordering is stable and explicit: clips are sorted by their track's
/// position in the track list, and ties (same track) by start offset
/// then id, so the same input always yields the same output order.
pub fn active_clips(project: &ProjectState, t: f64) -> ActiveClips<'_> {
    let solo = any_solo(project);

    let mut visual: Vec<&Clip> = vec![];
    let mut text: Vec<&Clip> = vec![];
    let mut audio_only: Vec<&Clip> = vec![];

    for clip in &project.clips {
        if !clip.contains(t) {
            continue;
        }
        let Some(track) = project.track(&clip.track_id) else {
            continue;
        };
        if solo && !track.solo {
            continue;
        }

        match clip.kind {
            ClipKind::Video | ClipKind::Image => visual.push(clip),
            ClipKind::Text => text.push(clip),
            ClipKind::Audio => audio_only.push(clip),
        }
    }

    let order_key = |clip: &&Clip| {
        (
            project.track_index(&clip.track_id).unwrap_or(usize::MAX),
            (clip.start_offset * 1e6) as i64,
            clip.id.clone(),
        )
    };
    visual.sort_by_key(order_key);
    text.sort_by_key(order_key);
    audio_only.sort_by_key(order_key);

    ActiveClips {
        visual,
        text,
        audio_only,
    }
}

/// Effective audio gain for a clip, 0.0..2.0.
///
/// Zero when the track is muted or solo-suppressed, and for reversed or
/// ramped clips: a single time-seekable audio source cannot follow a
/// backward or non-monotonic read head without artifacts, so those
/// timing modes are structurally silent.
pub fn effective_gain(project: &ProjectState, clip: &Clip) -> f64 {
    let Some(track) = project.track(&clip.track_id) else {
        return 0.0;
    };
    if track.muted || is_suppressed(project, track) {
        return 0.0;
    }
    if clip.properties.timing.mutes_audio() {
        return 0.0;
    }
    clip.properties
        .volume
        .unwrap_or(reelcore_project_model::DEFAULT_VOLUME)
        .clamp(0.0, 200.0)
        / 100.0
}

/// Effective stereo pan for a clip, -1.0 (left) .. 1.0 (right).
pub fn effective_pan(clip: &Clip) -> f64 {
    (clip.properties.pan.unwrap_or(0.0) / 50.0).clamp(-1.0, 1.0)
}
