//! The collaborator contract.

use reelcore_common::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

/// Horizontal reframe offset bound, percent of frame width.
pub const MAX_REFRAME_OFFSET: f64 = 40.0;

/// A reframing suggestion: which subject to follow and how far to move
/// the picture to keep it centered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReframeFocus {
    /// Name of the tracked subject.
    pub subject: String,
    /// Horizontal offset, clamped to the reframe bound.
    pub offset_x: f64,
}

impl ReframeFocus {
    pub fn new(subject: impl Into<String>, offset_x: f64) -> Self {
        Self {
            subject: subject.into(),
            offset_x: offset_x.clamp(-MAX_REFRAME_OFFSET, MAX_REFRAME_OFFSET),
        }
    }
}

/// The AI collaborator, as seen from the editor.
///
/// Implementations analyze source media by name; they may be slow, may
/// fail, and are never trusted with the project state. The boundary
/// layer turns their answers into property edits.
pub trait AssistService {
    /// Names of objects visible in the clip's media.
    fn detect_objects(&self, clip_name: &str) -> CoreResult<Vec<String>>;

    /// A reframing suggestion for the clip's media.
    fn analyze_reframe(&self, clip_name: &str) -> CoreResult<ReframeFocus>;

    /// Generate `seconds` of extended footage past the end of the
    /// clip's media. Returns whether the extension was produced.
    fn generate_extension(&self, clip_name: &str, seconds: f64) -> CoreResult<bool>;
}

/// Stand-in used when no inference backend is wired up. Every call
/// fails, which the boundary layer treats like any other collaborator
/// outage.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAssist;

impl AssistService for OfflineAssist {
    fn detect_objects(&self, _clip_name: &str) -> CoreResult<Vec<String>> {
        Err(CoreError::unsupported("no assist backend configured"))
    }

    fn analyze_reframe(&self, _clip_name: &str) -> CoreResult<ReframeFocus> {
        Err(CoreError::unsupported("no assist backend configured"))
    }

    fn generate_extension(&self, _clip_name: &str, _seconds: f64) -> CoreResult<bool> {
        Err(CoreError::unsupported("no assist backend configured"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reframe_focus_clamps_offset() {
        assert_eq!(ReframeFocus::new("surfer", 120.0).offset_x, 40.0);
        assert_eq!(ReframeFocus::new("surfer", -120.0).offset_x, -40.0);
        assert_eq!(ReframeFocus::new("surfer", 12.5).offset_x, 12.5);
    }

    #[test]
    fn test_offline_assist_always_fails() {
        let assist = OfflineAssist;
        assert!(assist.detect_objects("beach.mp4").is_err());
        assert!(assist.analyze_reframe("beach.mp4").is_err());
        assert!(assist.generate_extension("beach.mp4", 3.0).is_err());
    }
}
