//! Edit rejection taxonomy.

/// Why an edit command was rejected. The prior state is always left
/// unchanged on rejection.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EditError {
    #[error("Clip not found: {id}")]
    ClipNotFound { id: String },

    #[error("Track not found: {id}")]
    TrackNotFound { id: String },

    #[error("Marker not found: {id}")]
    MarkerNotFound { id: String },

    #[error("Asset not found: {id}")]
    AssetNotFound { id: String },

    #[error("Track is locked: {id}")]
    TrackLocked { id: String },

    /// A command tried to introduce a clip under an id the project
    /// already uses. Clip ids address clips everywhere (selection,
    /// property edits, drags), so collisions are rejected outright.
    #[error("Clip id already in use: {id}")]
    DuplicateClipId { id: String },

    /// Trim below the minimum duration or behind the start of the
    /// source media. Gesture callers drop this silently (the clip
    /// simply does not move); programmatic callers see the reason.
    #[error("Invalid clip geometry: {message}")]
    InvalidGeometry { message: String },

    #[error("Clip kind {clip_kind} cannot live on track kind {track_kind}")]
    IncompatibleTrack {
        clip_kind: &'static str,
        track_kind: &'static str,
    },

    /// Split or freeze-frame requested outside the clip's interval.
    #[error("Time {time:.3}s is outside the clip")]
    OutsideClip { time: f64 },

    /// Paste with no track able to host the clip kind. Surfaced to the
    /// user as a warning.
    #[error("No compatible track for a {clip_kind} clip")]
    NoCompatibleTrack { clip_kind: &'static str },

    #[error("Clipboard is empty")]
    NothingToPaste,
}

/// Result alias for edit operations.
pub type EditResult<T> = Result<T, EditError>;
