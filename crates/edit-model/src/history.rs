//! Snapshot undo/redo.
//!
//! The state type is an immutable value, so history is just two stacks
//! of snapshots. A new edit clears the redo stack; the undo stack is
//! capped so long sessions do not grow without bound.

use reelcore_project_model::ProjectState;

/// Maximum retained undo snapshots.
const DEFAULT_CAPACITY: usize = 100;

/// Undo/redo stacks over project state snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo: Vec<ProjectState>,
    redo: Vec<ProjectState>,
    capacity: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record the state as it was before an edit.
    pub fn push(&mut self, before: ProjectState) {
        if self.undo.len() == self.capacity {
            self.undo.remove(0);
        }
        self.undo.push(before);
        self.redo.clear();
    }

    /// Step back, exchanging `current` for the previous snapshot.
    pub fn undo(&mut self, current: ProjectState) -> Option<ProjectState> {
        let previous = self.undo.pop()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: ProjectState) -> Option<ProjectState> {
        let next = self.redo.pop()?;
        self.undo.push(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
