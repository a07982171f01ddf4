//! Track types: ordered lanes holding clips of one kind.

use serde::{Deserialize, Serialize};

/// What a track (and the clips it accepts) carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Text,
}

/// An ordered lane on the timeline.
///
/// The position of a track in `ProjectState::tracks` defines z-order:
/// later tracks are drawn later, i.e. on top. Tracks are never deleted
/// within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier.
    pub id: String,

    /// Kind of clips this track accepts.
    pub kind: TrackKind,

    /// Display name (e.g. "Video 1").
    pub name: String,

    /// Audio mute. Affects audio gain only, never visual inclusion.
    #[serde(default)]
    pub muted: bool,

    /// Editing lock: clips on a locked track reject geometry edits.
    #[serde(default)]
    pub locked: bool,

    /// Solo. If any track is soloed, only soloed tracks are audible
    /// and visible.
    #[serde(default)]
    pub solo: bool,

    /// Record-arm flag (capture integration; carried, not interpreted
    /// by the compositing core).
    #[serde(default)]
    pub record_armed: bool,
}

impl Track {
    /// Create a track with all flags cleared.
    pub fn new(id: impl Into<String>, kind: TrackKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            muted: false,
            locked: false,
            solo: false,
            record_armed: false,
        }
    }
}

/// A toggleable per-track flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackFlag {
    Muted,
    Locked,
    Solo,
    RecordArmed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_track_has_clear_flags() {
        let track = Track::new("t1", TrackKind::Video, "Video 1");
        assert!(!track.muted);
        assert!(!track.locked);
        assert!(!track.solo);
        assert!(!track.record_armed);
    }

    #[test]
    fn test_track_serialization_defaults_flags() {
        let json = r#"{"id":"t1","kind":"audio","name":"Audio 1"}"#;
        let track: Track = serde_json::from_str(json).unwrap();
        assert_eq!(track.kind, TrackKind::Audio);
        assert!(!track.solo);
    }
}
