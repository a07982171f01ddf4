//! Reelcore Compositing Engine
//!
//! The pure computation at the heart of the editor: given a
//! `ProjectState` and an instant `t`, produce the exact ordered set of
//! visual draw operations and audio mix instructions for that frame.
//!
//! The same planning path serves interactive playback and offline
//! frame-by-frame export; plans are deterministic and time-pure, so
//! identical inputs at identical `t` always yield identical
//! instructions.
//!
//! Module map (leaves first):
//! - [`speed_ramp`] — piecewise integration of ramped playback speed
//! - [`visibility`] — solo/mute resolution, active-clip selection,
//!   z-ordering
//! - [`transition`] — entry-transition progress and modifiers
//! - [`compositor`] — per-clip transform/filter/keying/overlay pipeline
//! - [`planner`] — frame plans for live playback and export
//! - [`audio_graph`] — session-owned audio routing

pub mod audio_graph;
pub mod compositor;
pub mod planner;
pub mod speed_ramp;
pub mod transition;
pub mod visibility;

pub use audio_graph::*;
pub use compositor::*;
pub use planner::*;
pub use speed_ramp::*;
pub use transition::*;
pub use visibility::*;
