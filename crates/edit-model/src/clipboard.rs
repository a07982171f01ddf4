//! Copy/paste over value snapshots.
//!
//! Copy takes a full value snapshot of the selected clip, so later edits
//! to the original (or deleting it outright) never affect what paste
//! produces. Paste ids are generated from a per-clipboard counter to
//! stay unique within a session.

use reelcore_project_model::{Clip, ProjectState};

use crate::commands::Command;
use crate::error::{EditError, EditResult};

/// Single-slot clip clipboard.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    slot: Option<Clip>,
    paste_counter: u64,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the selected clip. Returns whether anything was copied;
    /// with no selection the previous slot is kept.
    pub fn copy(&mut self, project: &ProjectState) -> bool {
        match project.selected_clip() {
            Some(clip) => {
                self.slot = Some(clip.clone());
                true
            }
            None => false,
        }
    }

    /// Whether a paste is possible.
    pub fn has_content(&self) -> bool {
        self.slot.is_some()
    }

    /// Build the paste command for the playhead position. The command is
    /// returned rather than applied so callers can run it through their
    /// history.
    pub fn paste_command(&mut self, project: &ProjectState) -> EditResult<Command> {
        let snapshot = self.slot.clone().ok_or(EditError::NothingToPaste)?;
        self.paste_counter += 1;
        Ok(Command::PasteClip {
            new_id: format!("{}-paste-{}", snapshot.id, self.paste_counter),
            snapshot: Box::new(snapshot),
            at: project.current_time,
        })
    }
}
