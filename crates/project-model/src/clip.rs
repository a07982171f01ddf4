//! Clip types: time-bounded placements of source media on tracks.

use serde::{Deserialize, Serialize};

use crate::asset::AssetRecord;
use crate::properties::ClipProperties;
use crate::track::TrackKind;

/// Minimum clip duration after any edit, in seconds.
pub const MIN_CLIP_DURATION: f64 = 0.1;

/// Kind of media a clip carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipKind {
    Video,
    Image,
    Audio,
    Text,
}

impl ClipKind {
    /// The track kind this clip kind may live on.
    pub fn track_kind(&self) -> TrackKind {
        match self {
            ClipKind::Video | ClipKind::Image => TrackKind::Video,
            ClipKind::Audio => TrackKind::Audio,
            ClipKind::Text => TrackKind::Text,
        }
    }

    /// Whether the clip produces a picture.
    pub fn is_visual(&self) -> bool {
        matches!(self, ClipKind::Video | ClipKind::Image)
    }

    /// Whether the clip can carry an audio stream.
    pub fn has_audio(&self) -> bool {
        matches!(self, ClipKind::Video | ClipKind::Audio)
    }
}

/// Entry transition kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    Fade,
    Dissolve,
    SlideLeft,
    SlideRight,
    Zoom,
    Wipe,
}

/// An entry transition: active during the first `duration_secs` of the
/// clip's timeline presence. There is no exit-transition concept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub kind: TransitionKind,
    pub duration_secs: f64,
}

/// A time-bounded placement of a media source on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Unique clip identifier.
    pub id: String,

    /// Source asset this clip reads from.
    pub asset_id: String,

    /// Display name.
    pub name: String,

    /// Owning track.
    pub track_id: String,

    /// Position on the timeline, seconds, >= 0.
    pub start_offset: f64,

    /// Length on the timeline, seconds, >= MIN_CLIP_DURATION.
    pub duration: f64,

    /// Offset into the source media, seconds, >= 0.
    pub source_start: f64,

    /// Media kind.
    pub kind: ClipKind,

    /// Opaque source locator (copied from the asset at creation).
    pub locator: String,

    /// Selection flag. At most one clip is selected project-wide; the
    /// edit model enforces this when applying selection commands.
    #[serde(default)]
    pub selected: bool,

    /// Sparse property bag.
    #[serde(default)]
    pub properties: ClipProperties,

    /// Optional entry transition.
    #[serde(default)]
    pub transition: Option<Transition>,
}

impl Clip {
    /// Create a clip from an ingested asset, placed at `start_offset`.
    ///
    /// The glitch seed is derived from the new clip id so that a saved
    /// project replans identically after a round trip.
    pub fn from_asset(
        id: impl Into<String>,
        asset: &AssetRecord,
        track_id: impl Into<String>,
        start_offset: f64,
    ) -> Self {
        let id = id.into();
        let glitch_seed = fnv1a_64(id.as_bytes());
        Self {
            id,
            asset_id: asset.id.clone(),
            name: asset
                .locator
                .rsplit('/')
                .next()
                .unwrap_or(&asset.locator)
                .to_string(),
            track_id: track_id.into(),
            start_offset: start_offset.max(0.0),
            duration: asset.duration_secs.max(MIN_CLIP_DURATION),
            source_start: 0.0,
            kind: asset.kind,
            locator: asset.locator.clone(),
            selected: false,
            properties: ClipProperties {
                glitch_seed,
                ..ClipProperties::default()
            },
            transition: None,
        }
    }

    /// End of the clip on the timeline, seconds.
    pub fn end(&self) -> f64 {
        self.start_offset + self.duration
    }

    /// Half-open activation test: `start <= t < end`, so adjacent clips
    /// never both claim the boundary instant.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_offset && t < self.end()
    }

    /// Progress through the clip at time `t`, clamped to [0, 1].
    pub fn progress_at(&self, t: f64) -> f64 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        ((t - self.start_offset) / self.duration).clamp(0.0, 1.0)
    }
}

/// FNV-1a hash, used to derive stable per-clip seeds from ids.
pub(crate) fn fnv1a_64(input: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in input {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
