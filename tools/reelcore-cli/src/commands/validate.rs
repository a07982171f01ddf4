//! Check a project file against the timeline invariants.

use std::collections::HashSet;
use std::path::PathBuf;

use reelcore_project_model::{ProjectFile, ProjectState, MIN_CLIP_DURATION};

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating project at: {}", path.display());

    let file =
        ProjectFile::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    println!("  Name: {}", file.name);
    println!("  Version: {}", file.version);
    println!("  Tracks: {}", file.state.tracks.len());
    println!("  Clips: {}", file.state.clips.len());

    let issues = check_invariants(&file.state);
    if issues.is_empty() {
        println!("\nProject is valid.");
    } else {
        println!("\nValidation issues:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!(
            "\n{} issue(s) found. Project may not be fully usable.",
            issues.len()
        );
    }

    Ok(())
}

/// All invariant violations in a state, as human-readable findings.
fn check_invariants(state: &ProjectState) -> Vec<String> {
    let mut issues = Vec::new();

    let mut seen_ids = HashSet::new();
    for clip in &state.clips {
        if !seen_ids.insert(clip.id.as_str()) {
            issues.push(format!("clip id '{}' is used more than once", clip.id));
        }
    }

    for clip in &state.clips {
        if clip.duration < MIN_CLIP_DURATION {
            issues.push(format!(
                "clip '{}' is {:.3}s, below the {MIN_CLIP_DURATION}s minimum",
                clip.id, clip.duration
            ));
        }
        if clip.start_offset < 0.0 {
            issues.push(format!("clip '{}' starts before zero", clip.id));
        }
        if clip.source_start < 0.0 {
            issues.push(format!("clip '{}' reads before its source start", clip.id));
        }
        if clip.end() > state.duration + 1e-9 {
            issues.push(format!("clip '{}' runs past the project duration", clip.id));
        }
        match state.track(&clip.track_id) {
            None => issues.push(format!(
                "clip '{}' references missing track '{}'",
                clip.id, clip.track_id
            )),
            Some(track) if track.kind != clip.kind.track_kind() => issues.push(format!(
                "clip '{}' ({:?}) sits on a {:?} track",
                clip.id, clip.kind, track.kind
            )),
            Some(_) => {}
        }
        if state.asset(&clip.asset_id).is_none() {
            issues.push(format!(
                "clip '{}' references missing asset '{}'",
                clip.id, clip.asset_id
            ));
        }
        if let Some(transition) = &clip.transition {
            if transition.duration_secs > clip.duration {
                issues.push(format!(
                    "clip '{}' has a transition longer than the clip",
                    clip.id
                ));
            }
        }
    }

    let selected = state.clips.iter().filter(|c| c.selected).count();
    if selected > 1 {
        issues.push(format!("{selected} clips selected at once"));
    }

    if state.current_time < 0.0 || state.current_time > state.duration {
        issues.push("playhead outside the project".to_string());
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelcore_project_model::{AssetRecord, Clip, ClipKind};

    fn asset() -> AssetRecord {
        AssetRecord {
            id: "a1".to_string(),
            kind: ClipKind::Video,
            locator: "blob:a1".to_string(),
            duration_secs: 5.0,
            thumbnail: None,
        }
    }

    #[test]
    fn test_clean_project_has_no_issues() {
        let state = ProjectState::new(60.0)
            .with_assets(vec![asset()])
            .with_clips(vec![Clip::from_asset("c1", &asset(), "track-video-1", 0.0)]);
        assert!(check_invariants(&state).is_empty());
    }

    #[test]
    fn test_broken_references_are_reported() {
        let mut clip = Clip::from_asset("c1", &asset(), "no-such-track", 0.0);
        clip.asset_id = "no-such-asset".to_string();
        let state = ProjectState::new(60.0).with_clips(vec![clip]);
        let issues = check_invariants(&state);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_duplicate_clip_ids_are_reported() {
        let first = Clip::from_asset("c1", &asset(), "track-video-1", 0.0);
        let mut second = Clip::from_asset("c1", &asset(), "track-video-1", 10.0);
        second.duration = 2.0;
        let state = ProjectState::new(60.0)
            .with_assets(vec![asset()])
            .with_clips(vec![first, second]);
        let issues = check_invariants(&state);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("used more than once"));
    }

    #[test]
    fn test_short_clip_is_reported() {
        let mut clip = Clip::from_asset("c1", &asset(), "track-video-1", 0.0);
        clip.duration = 0.01;
        let state = ProjectState::new(60.0)
            .with_assets(vec![asset()])
            .with_clips(vec![clip]);
        assert_eq!(check_invariants(&state).len(), 1);
    }
}
