//! Reelcore Edit Model
//!
//! Mutation of the timeline happens exclusively through this crate:
//! - [`commands`] — every edit as a value with a pure
//!   `apply(&ProjectState) -> Result<ProjectState>` function
//! - [`drag`] — the pointer gesture state machine (move, trim, marker
//!   drag) that turns pointer deltas into commands with snapping
//! - [`snap`] — anchor collection and nearest-anchor search
//! - [`clipboard`] — value-snapshot copy/paste
//! - [`history`] — snapshot undo/redo
//!
//! Edits fail closed: a rejected command returns an error and the prior
//! state stays untouched. The frame planner can therefore assume every
//! state it sees satisfies the clip geometry invariants
//! (`duration >= 0.1`, `source_start >= 0`, `start_offset >= 0`).

pub mod clipboard;
pub mod commands;
pub mod drag;
pub mod error;
pub mod history;
pub mod snap;

pub use clipboard::*;
pub use commands::*;
pub use drag::*;
pub use error::*;
pub use history::*;
pub use snap::*;
