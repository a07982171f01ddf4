//! Project state: the aggregate root, plus JSON persistence.
//!
//! `ProjectState` is single-writer: every mutation goes through an
//! explicit `with_*` operation that produces a new state with the
//! relevant sub-collection replaced. Nothing mutates in place, which is
//! what makes snapshot undo/redo and concurrent reads during rendering
//! safe.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::asset::AssetRecord;
use crate::clip::Clip;
use crate::marker::Marker;
use crate::track::{Track, TrackKind};

/// The complete editable state of a project at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectState {
    /// Ordered track list. Order defines z-order (later = on top).
    pub tracks: Vec<Track>,

    /// All clips, across all tracks.
    pub clips: Vec<Clip>,

    /// Timeline markers.
    pub markers: Vec<Marker>,

    /// Ingested assets.
    pub assets: Vec<AssetRecord>,

    /// Playhead position, seconds.
    pub current_time: f64,

    /// Total project duration, seconds.
    pub duration: f64,

    /// Timeline zoom, pixels per second.
    pub zoom: f64,

    /// Whether playback is running.
    pub is_playing: bool,

    /// Output aspect ratio (e.g. "16:9").
    pub aspect_ratio: String,
}

impl ProjectState {
    /// A fresh project with the standard starter tracks: two video, two
    /// audio, one text.
    pub fn new(duration_secs: f64) -> Self {
        Self {
            tracks: vec![
                Track::new("track-video-1", TrackKind::Video, "Video 1"),
                Track::new("track-video-2", TrackKind::Video, "Video 2"),
                Track::new("track-audio-1", TrackKind::Audio, "Audio 1"),
                Track::new("track-audio-2", TrackKind::Audio, "Audio 2"),
                Track::new("track-text-1", TrackKind::Text, "Text 1"),
            ],
            clips: vec![],
            markers: vec![],
            assets: vec![],
            current_time: 0.0,
            duration: duration_secs.max(0.0),
            zoom: 50.0,
            is_playing: false,
            aspect_ratio: "16:9".to_string(),
        }
    }

    /// Replace the clip list.
    ///
    /// Extends the project duration when any clip now runs past it, so
    /// `start_offset + duration <= project duration` always holds.
    pub fn with_clips(&self, clips: Vec<Clip>) -> Self {
        let clip_max = clips.iter().map(Clip::end).fold(0.0f64, f64::max);
        Self {
            duration: self.duration.max(clip_max),
            clips,
            ..self.clone()
        }
    }

    /// Replace the track list.
    pub fn with_tracks(&self, tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            ..self.clone()
        }
    }

    /// Replace the marker list.
    pub fn with_markers(&self, markers: Vec<Marker>) -> Self {
        Self {
            markers,
            ..self.clone()
        }
    }

    /// Replace the asset list.
    pub fn with_assets(&self, assets: Vec<AssetRecord>) -> Self {
        Self {
            assets,
            ..self.clone()
        }
    }

    /// Move the playhead, clamped to `[0, duration]`.
    pub fn with_current_time(&self, t: f64) -> Self {
        Self {
            current_time: t.clamp(0.0, self.duration),
            ..self.clone()
        }
    }

    /// Set the playing flag.
    pub fn with_playing(&self, playing: bool) -> Self {
        Self {
            is_playing: playing,
            ..self.clone()
        }
    }

    /// Look up a clip by id.
    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    /// Look up a track by id.
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Position of a track in the z-order.
    pub fn track_index(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Look up an asset by id.
    pub fn asset(&self, id: &str) -> Option<&AssetRecord> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// The selected clip, if any.
    pub fn selected_clip(&self) -> Option<&Clip> {
        self.clips.iter().find(|c| c.selected)
    }

    /// First track of the given kind, in z-order.
    pub fn first_track_of_kind(&self, kind: TrackKind) -> Option<&Track> {
        self.tracks.iter().find(|t| t.kind == kind)
    }
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new(60.0)
    }
}

/// On-disk project file (`project.json`): metadata wrapping the state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    /// Schema version.
    pub version: String,

    /// Human-readable project name.
    pub name: String,

    /// Unique project identifier.
    pub id: String,

    /// Creation timestamp (ISO 8601).
    pub created_at: String,

    /// Last modified timestamp (ISO 8601).
    pub modified_at: String,

    /// The full editable state.
    pub state: ProjectState,
}

impl ProjectFile {
    /// Create a new project file around a fresh state.
    pub fn new(name: impl Into<String>, duration_secs: f64) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: "1.0".to_string(),
            name: name.into(),
            id: uuid_v4(),
            created_at: now.clone(),
            modified_at: now,
            state: ProjectState::new(duration_secs),
        }
    }

    /// Load a project from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref().to_path_buf();
        let json = std::fs::read_to_string(&path).map_err(|e| ProjectError::IoError {
            path: path.clone(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ProjectError::ParseError { path, source: e })
    }

    /// Save the project as pretty JSON, refreshing `modified_at`.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref().to_path_buf();
        self.modified_at = chrono::Utc::now().to_rfc3339();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ProjectError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ProjectError::ParseError {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json).map_err(|e| ProjectError::IoError { path, source: e })
    }
}

/// Errors that can occur when working with project files.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Generate a simple UUID v4 without external dependency.
fn uuid_v4() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        (seed & 0xFFFFFFFF) as u32,
        ((seed >> 32) & 0xFFFF) as u16,
        ((seed >> 48) & 0x0FFF) as u16,
        (((seed >> 60) & 0x3F) | 0x80) as u16 | (((seed >> 66) & 0x3FF) as u16) << 6,
        (seed >> 76) & 0xFFFFFFFFFFFF,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipKind;

    fn asset() -> AssetRecord {
        AssetRecord {
            id: "a1".to_string(),
            kind: ClipKind::Video,
            locator: "blob:v".to_string(),
            duration_secs: 10.0,
            thumbnail: None,
        }
    }

    #[test]
    fn test_new_project_has_starter_tracks() {
        let state = ProjectState::new(60.0);
        assert_eq!(state.tracks.len(), 5);
        assert_eq!(
            state.tracks.iter().filter(|t| t.kind == TrackKind::Video).count(),
            2
        );
        assert_eq!(state.first_track_of_kind(TrackKind::Text).unwrap().name, "Text 1");
    }

    #[test]
    fn test_with_clips_extends_duration() {
        let state = ProjectState::new(10.0);
        let mut clip = Clip::from_asset("c1", &asset(), "track-video-1", 8.0);
        clip.duration = 10.0;
        let next = state.with_clips(vec![clip]);
        assert_eq!(next.duration, 18.0);

        // Shorter clips never shrink the project.
        let shorter = next.with_clips(vec![]);
        assert_eq!(shorter.duration, 18.0);
    }

    #[test]
    fn test_with_current_time_clamps() {
        let state = ProjectState::new(30.0);
        assert_eq!(state.with_current_time(-5.0).current_time, 0.0);
        assert_eq!(state.with_current_time(99.0).current_time, 30.0);
    }

    #[test]
    fn test_project_file_roundtrip() {
        let dir = std::env::temp_dir().join("reelcore_test_project");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("project.json");

        let mut file = ProjectFile::new("Cut Test", 42.0);
        file.state = file.state.with_assets(vec![asset()]);
        file.save(&path).unwrap();

        let loaded = ProjectFile::load(&path).unwrap();
        assert_eq!(loaded.name, "Cut Test");
        assert_eq!(loaded.state.duration, 42.0);
        assert_eq!(loaded.state.assets.len(), 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ProjectFile::load("/nonexistent/reelcore/project.json").unwrap_err();
        assert!(matches!(err, ProjectError::IoError { .. }));
    }
}
