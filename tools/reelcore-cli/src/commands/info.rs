//! Show project information.

use std::path::PathBuf;

use reelcore_common::time::format_timecode;
use reelcore_project_model::ProjectFile;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let file =
        ProjectFile::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    println!("Project: {}", file.name);
    println!("  ID: {}", file.id);
    println!("  Created: {}", file.created_at);
    println!("  Modified: {}", file.modified_at);
    println!();

    let state = &file.state;
    println!("Timeline:");
    println!("  Duration: {}", format_timecode(state.duration));
    println!("  Playhead: {}", format_timecode(state.current_time));
    println!("  Aspect ratio: {}", state.aspect_ratio);
    println!("  Zoom: {} px/s", state.zoom);
    println!();

    println!("Tracks:");
    for track in &state.tracks {
        let clip_count = state.clips.iter().filter(|c| c.track_id == track.id).count();
        let mut flags = Vec::new();
        if track.muted {
            flags.push("muted");
        }
        if track.locked {
            flags.push("locked");
        }
        if track.solo {
            flags.push("solo");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "  {} ({:?}): {} clip(s){}",
            track.name, track.kind, clip_count, flags
        );
    }
    println!();

    println!("Clips: {}", state.clips.len());
    for clip in &state.clips {
        println!(
            "  {} ({:?}): {} -> {}",
            clip.name,
            clip.kind,
            format_timecode(clip.start_offset),
            format_timecode(clip.end())
        );
    }
    println!();

    println!("Markers: {}", state.markers.len());
    println!("Assets: {}", state.assets.len());

    Ok(())
}
