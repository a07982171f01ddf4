//! Render frame planner: the full instruction set for one instant.
//!
//! `plan_frame` composes the visibility, transition, and compositor
//! resolvers into a deterministic, time-pure `FramePlan`. The offline
//! export path (`plan_export`) walks frames at a fixed rate through the
//! same function, which is what guarantees live playback and export
//! agree on every frame.

use serde::Serialize;

use reelcore_common::time::{frame_count, frame_duration_secs};
use reelcore_project_model::{Clip, ClipKind, ProjectState, TextStyle, TimingMode};

use crate::compositor::{compose_clip, VisualOps};
use crate::speed_ramp::source_time_at_progress;
use crate::transition;
use crate::visibility::{active_clips, effective_gain, effective_pan};

/// One visual draw operation in a frame plan. Layers are listed
/// back-to-front; the sink draws them in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualLayer {
    pub clip_id: String,
    pub asset_id: String,
    pub locator: String,
    pub kind: ClipKind,
    /// Draw order, 0 = furthest back.
    pub z_index: usize,
    /// Source-media timestamp to present, seconds. `None` for stills and
    /// text, which have no time axis of their own.
    pub source_time_secs: Option<f64>,
    /// The resolved visual pipeline.
    pub ops: VisualOps,
    /// Text styling, for text layers.
    pub text: Option<TextStyle>,
}

/// One audio source in a frame plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudioSource {
    pub clip_id: String,
    pub asset_id: String,
    pub locator: String,
    /// Source-media timestamp, seconds.
    pub source_time_secs: f64,
    /// Linear gain, 0.0..2.0. Zero means silent but still listed, so the
    /// mix graph can hold the route open across a mute toggle.
    pub gain: f64,
    /// Stereo pan, -1.0 (left) .. 1.0 (right).
    pub pan: f64,
}

/// The complete render instruction set for one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramePlan {
    pub time_secs: f64,
    /// Visual layers, back-to-front. Text layers always come last.
    pub layers: Vec<VisualLayer>,
    /// Audio sources with resolved gain/pan.
    pub audio: Vec<AudioSource>,
}

/// Map timeline time `t` into the clip's source media, honoring the
/// clip's timing mode. Returns `None` for stills and text.
pub fn resolve_source_time(clip: &Clip, t: f64) -> Option<f64> {
    if matches!(clip.kind, ClipKind::Image | ClipKind::Text) {
        return None;
    }
    let elapsed = (t - clip.start_offset).clamp(0.0, clip.duration);
    let source = match &clip.properties.timing {
        TimingMode::Normal { speed } => clip.source_start + elapsed * speed,
        TimingMode::Reversed { speed } => {
            // The read head starts at the end of the consumed span and
            // walks backward.
            clip.source_start + (clip.duration - elapsed) * speed
        }
        TimingMode::Ramped { ramp } => {
            let progress = clip.progress_at(t);
            clip.source_start + source_time_at_progress(progress, clip.duration, &ramp.points)
        }
    };
    Some(source.max(0.0))
}

/// Plan the frame at time `t`.
///
/// Deterministic and time-pure: identical `(project, t)` yield an
/// identical plan. Missing optional properties resolve to defaults;
/// this function never fails.
pub fn plan_frame(project: &ProjectState, t: f64) -> FramePlan {
    let active = active_clips(project, t);

    let mut layers = Vec::with_capacity(active.visual.len() + active.text.len());
    for clip in active.visual.iter().chain(active.text.iter()) {
        let eff = clip.properties.resolve_effective();
        let transition_state = transition::resolve(clip, t);
        let ops = compose_clip(clip, &eff, &transition_state, t);
        layers.push(VisualLayer {
            clip_id: clip.id.clone(),
            asset_id: clip.asset_id.clone(),
            locator: clip.locator.clone(),
            kind: clip.kind,
            z_index: layers.len(),
            source_time_secs: resolve_source_time(clip, t),
            ops,
            text: (clip.kind == ClipKind::Text).then(|| eff.text.clone()),
        });
    }

    let mut audio_clips: Vec<&Clip> = project
        .clips
        .iter()
        .filter(|c| c.contains(t) && c.kind.has_audio())
        .collect();
    audio_clips.sort_by_key(|clip| {
        (
            project.track_index(&clip.track_id).unwrap_or(usize::MAX),
            (clip.start_offset * 1e6) as i64,
            clip.id.clone(),
        )
    });

    let audio = audio_clips
        .into_iter()
        .map(|clip| AudioSource {
            clip_id: clip.id.clone(),
            asset_id: clip.asset_id.clone(),
            locator: clip.locator.clone(),
            source_time_secs: resolve_source_time(clip, t).unwrap_or(clip.source_start),
            gain: effective_gain(project, clip),
            pan: effective_pan(clip),
        })
        .collect();

    FramePlan {
        time_secs: t,
        layers,
        audio,
    }
}

/// Wall-clock speed multiplier for the playhead.
///
/// The selected clip's constant speed applies while that clip is under
/// the playhead; otherwise the playhead runs at realtime. Ramped clips
/// never alter the playhead rate, their ramp shapes source-time
/// consumption only.
pub fn effective_playback_speed(project: &ProjectState) -> f64 {
    project
        .selected_clip()
        .filter(|c| c.contains(project.current_time))
        .and_then(|c| c.properties.timing.constant_speed())
        .unwrap_or(1.0)
}

/// Plan every output frame for an offline export at `fps`.
///
/// Frame `k` is planned at `t = k / fps` through the same `plan_frame`
/// path used for live playback.
pub fn plan_export(project: &ProjectState, fps: u32) -> Vec<FramePlan> {
    let total = frame_count(project.duration, fps);
    let dt = frame_duration_secs(fps);
    (0..total)
        .map(|k| plan_frame(project, k as f64 * dt))
        .collect()
}
