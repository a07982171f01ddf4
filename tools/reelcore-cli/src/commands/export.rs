//! Emit the per-frame plan stream for a whole project.
//!
//! One JSON object per line, one line per frame. A downstream rasterizer
//! consumes this stream; the CLI itself draws nothing.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use reelcore_compositing::planner::plan_export;
use reelcore_project_model::ProjectFile;

pub fn run(path: PathBuf, output: Option<PathBuf>, fps: u32) -> anyhow::Result<()> {
    anyhow::ensure!(fps > 0, "fps must be positive");

    let file =
        ProjectFile::load(&path).map_err(|e| anyhow::anyhow!("Failed to load project: {e}"))?;

    tracing::info!(
        project = %file.name,
        duration = file.state.duration,
        fps,
        "export started"
    );

    let plans = plan_export(&file.state, fps);

    match output {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut writer = BufWriter::new(std::fs::File::create(&out_path)?);
            write_plans(&mut writer, &plans)?;
            writer.flush()?;
            println!("Wrote {} frame plans to {}", plans.len(), out_path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            write_plans(&mut writer, &plans)?;
            writer.flush()?;
        }
    }

    tracing::info!(frames = plans.len(), "export finished");
    Ok(())
}

fn write_plans<W: Write>(
    writer: &mut W,
    plans: &[reelcore_compositing::planner::FramePlan],
) -> anyhow::Result<()> {
    for plan in plans {
        serde_json::to_writer(&mut *writer, plan)?;
        writeln!(writer)?;
    }
    Ok(())
}
