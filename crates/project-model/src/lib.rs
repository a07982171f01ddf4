//! Reelcore Project Model
//!
//! Defines the core data contracts for Reelcore projects:
//! - **Tracks:** ordered lanes with mute/solo/lock/record flags
//! - **Clips:** time-bounded placements of source media on tracks
//! - **Properties:** sparse per-clip property bag and its fully-defaulted
//!   effective resolution
//! - **Markers:** named snap anchors on the timeline
//! - **Project:** the aggregate state, plus JSON persistence
//!
//! All times are in timeline seconds unless a name says otherwise
//! (`source_start` is seconds into the clip's original media).
//! The model is single-writer: every mutation produces a new state from
//! the previous one, which keeps undo/redo and concurrent reads trivial.

pub mod asset;
pub mod clip;
pub mod marker;
pub mod project;
pub mod properties;
pub mod track;

pub use asset::*;
pub use clip::*;
pub use marker::*;
pub use project::*;
pub use properties::*;
pub use track::*;
