//! Boundary functions: collaborator answers become property edits.
//!
//! Each function runs one collaborator call for one clip and commits the
//! answer through the edit model. Failures at any point (missing clip,
//! collaborator error, rejected edit) log a warning and return the
//! incoming state unchanged. Playback and rendering are never aborted by
//! the collaborator.

use reelcore_edit_model::Command;
use reelcore_project_model::{Clip, ClipProperties, ProjectState};

use crate::service::AssistService;

fn commit_properties(
    state: &ProjectState,
    clip_id: &str,
    properties: ClipProperties,
) -> ProjectState {
    let command = Command::SetClipProperties {
        clip_id: clip_id.to_string(),
        properties: Box::new(properties),
    };
    match command.apply(state) {
        Ok(next) => next,
        Err(error) => {
            tracing::warn!(clip_id, %error, "assist result discarded");
            state.clone()
        }
    }
}

fn clip_or_warn<'a>(state: &'a ProjectState, clip_id: &str) -> Option<&'a Clip> {
    let clip = state.clip(clip_id);
    if clip.is_none() {
        tracing::warn!(clip_id, "assist requested for unknown clip");
    }
    clip
}

/// Detect objects in a clip's media and record them on the clip.
pub fn apply_object_detection(
    service: &dyn AssistService,
    state: &ProjectState,
    clip_id: &str,
) -> ProjectState {
    let Some(clip) = clip_or_warn(state, clip_id) else {
        return state.clone();
    };
    match service.detect_objects(&clip.name) {
        Ok(objects) => {
            tracing::info!(clip_id, count = objects.len(), "objects detected");
            let mut properties = clip.properties.clone();
            properties.detected_objects = objects;
            commit_properties(state, clip_id, properties)
        }
        Err(error) => {
            tracing::warn!(clip_id, %error, "object detection failed");
            state.clone()
        }
    }
}

/// Start tracking one detected object as the clip's active mask.
///
/// The object must have been reported by a prior detection pass.
pub fn select_mask(state: &ProjectState, clip_id: &str, object: &str) -> ProjectState {
    let Some(clip) = clip_or_warn(state, clip_id) else {
        return state.clone();
    };
    if !clip.properties.detected_objects.iter().any(|o| o == object) {
        tracing::warn!(clip_id, object, "mask selection for undetected object");
        return state.clone();
    }
    let mut properties = clip.properties.clone();
    properties.active_mask_id = Some(object.to_string());
    properties.mask_overlay_visible = true;
    commit_properties(state, clip_id, properties)
}

/// Stop tracking the clip's active mask.
pub fn clear_mask(state: &ProjectState, clip_id: &str) -> ProjectState {
    let Some(clip) = clip_or_warn(state, clip_id) else {
        return state.clone();
    };
    let mut properties = clip.properties.clone();
    properties.active_mask_id = None;
    properties.mask_overlay_visible = false;
    commit_properties(state, clip_id, properties)
}

/// Ask for a reframing suggestion and apply it as a position offset.
pub fn apply_reframe(
    service: &dyn AssistService,
    state: &ProjectState,
    clip_id: &str,
) -> ProjectState {
    let Some(clip) = clip_or_warn(state, clip_id) else {
        return state.clone();
    };
    match service.analyze_reframe(&clip.name) {
        Ok(focus) => {
            tracing::info!(
                clip_id,
                subject = %focus.subject,
                offset = focus.offset_x,
                "reframe applied"
            );
            let mut properties = clip.properties.clone();
            properties.position_x = Some(focus.offset_x);
            commit_properties(state, clip_id, properties)
        }
        Err(error) => {
            tracing::warn!(clip_id, %error, "reframe analysis failed");
            state.clone()
        }
    }
}

/// Generate extra footage past the clip's source and lengthen the clip
/// by `seconds`. The generated tail is flagged on the clip so the
/// compositor can badge it.
pub fn apply_extension(
    service: &dyn AssistService,
    state: &ProjectState,
    clip_id: &str,
    seconds: f64,
) -> ProjectState {
    if seconds <= 0.0 {
        tracing::warn!(clip_id, seconds, "extension of non-positive length ignored");
        return state.clone();
    }
    let Some(clip) = clip_or_warn(state, clip_id) else {
        return state.clone();
    };
    match service.generate_extension(&clip.name, seconds) {
        Ok(true) => {
            let mut properties = clip.properties.clone();
            properties.ai_extended_duration =
                Some(properties.ai_extended_duration.unwrap_or(0.0) + seconds);
            let new_end = clip.end() + seconds;

            let with_tail = commit_properties(state, clip_id, properties);
            let lengthen = Command::TrimClipRight {
                clip_id: clip_id.to_string(),
                new_end,
            };
            match lengthen.apply(&with_tail) {
                Ok(next) => {
                    tracing::info!(clip_id, seconds, "clip extended");
                    next
                }
                Err(error) => {
                    tracing::warn!(clip_id, %error, "extension discarded");
                    state.clone()
                }
            }
        }
        Ok(false) => {
            tracing::warn!(clip_id, "collaborator declined to extend");
            state.clone()
        }
        Err(error) => {
            tracing::warn!(clip_id, %error, "extension generation failed");
            state.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{OfflineAssist, ReframeFocus};
    use reelcore_common::{CoreError, CoreResult};
    use reelcore_project_model::{AssetRecord, ClipKind};

    /// Collaborator with canned answers.
    struct ScriptedAssist {
        objects: Vec<String>,
        offset: f64,
        extend: bool,
    }

    impl AssistService for ScriptedAssist {
        fn detect_objects(&self, _clip_name: &str) -> CoreResult<Vec<String>> {
            Ok(self.objects.clone())
        }

        fn analyze_reframe(&self, _clip_name: &str) -> CoreResult<ReframeFocus> {
            Ok(ReframeFocus::new("subject", self.offset))
        }

        fn generate_extension(&self, _clip_name: &str, _seconds: f64) -> CoreResult<bool> {
            if self.extend {
                Ok(true)
            } else {
                Err(CoreError::assist("generation backend overloaded"))
            }
        }
    }

    fn project() -> ProjectState {
        let asset = AssetRecord {
            id: "a1".to_string(),
            kind: ClipKind::Video,
            locator: "blob:surf.mp4".to_string(),
            duration_secs: 6.0,
            thumbnail: None,
        };
        let clip = Clip::from_asset("c1", &asset, "track-video-1", 0.0);
        ProjectState::new(60.0).with_clips(vec![clip])
    }

    #[test]
    fn test_detection_records_objects() {
        let assist = ScriptedAssist {
            objects: vec!["surfer".to_string(), "wave".to_string()],
            offset: 0.0,
            extend: false,
        };
        let next = apply_object_detection(&assist, &project(), "c1");
        assert_eq!(
            next.clip("c1").unwrap().properties.detected_objects,
            vec!["surfer", "wave"]
        );
    }

    #[test]
    fn test_collaborator_failure_leaves_state_unchanged() {
        let state = project();
        let next = apply_object_detection(&OfflineAssist, &state, "c1");
        assert_eq!(next, state);
        let next = apply_reframe(&OfflineAssist, &state, "c1");
        assert_eq!(next, state);
        let next = apply_extension(&OfflineAssist, &state, "c1", 3.0);
        assert_eq!(next, state);
    }

    #[test]
    fn test_mask_selection_requires_detection() {
        let state = project();
        // Not detected yet: refused.
        let refused = select_mask(&state, "c1", "surfer");
        assert!(refused.clip("c1").unwrap().properties.active_mask_id.is_none());

        let assist = ScriptedAssist {
            objects: vec!["surfer".to_string()],
            offset: 0.0,
            extend: false,
        };
        let detected = apply_object_detection(&assist, &state, "c1");
        let masked = select_mask(&detected, "c1", "surfer");
        let props = &masked.clip("c1").unwrap().properties;
        assert_eq!(props.active_mask_id.as_deref(), Some("surfer"));
        assert!(props.mask_overlay_visible);

        let cleared = clear_mask(&masked, "c1");
        let props = &cleared.clip("c1").unwrap().properties;
        assert!(props.active_mask_id.is_none());
        assert!(!props.mask_overlay_visible);
    }

    #[test]
    fn test_reframe_sets_position_offset() {
        let assist = ScriptedAssist {
            objects: vec![],
            offset: 80.0, // clamped by ReframeFocus
            extend: false,
        };
        let next = apply_reframe(&assist, &project(), "c1");
        assert_eq!(next.clip("c1").unwrap().properties.position_x, Some(40.0));
    }

    #[test]
    fn test_extension_lengthens_clip_and_flags_tail() {
        let assist = ScriptedAssist {
            objects: vec![],
            offset: 0.0,
            extend: true,
        };
        let next = apply_extension(&assist, &project(), "c1", 2.0);
        let clip = next.clip("c1").unwrap();
        assert_eq!(clip.duration, 8.0);
        assert_eq!(clip.properties.ai_extended_duration, Some(2.0));

        // Extending again accumulates.
        let again = apply_extension(&assist, &next, "c1", 1.0);
        let clip = again.clip("c1").unwrap();
        assert_eq!(clip.duration, 9.0);
        assert_eq!(clip.properties.ai_extended_duration, Some(3.0));
    }

    #[test]
    fn test_unknown_clip_is_harmless() {
        let state = project();
        let assist = OfflineAssist;
        assert_eq!(apply_object_detection(&assist, &state, "nope"), state);
        assert_eq!(select_mask(&state, "nope", "x"), state);
    }
}
