//! Print the frame plan at one timeline position.

use std::path::PathBuf;

use reelcore_compositing::planner::plan_frame;
use reelcore_project_model::ProjectFile;

pub fn run(path: PathBuf, time: f64) -> anyhow::Result<()> {
    let file =
        ProjectFile::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    let plan = plan_frame(&file.state, time);
    tracing::debug!(
        time,
        layers = plan.layers.len(),
        audio = plan.audio.len(),
        "frame planned"
    );
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
