//! Initialize a new Reelcore project.

use std::path::PathBuf;

use reelcore_project_model::ProjectFile;

pub fn run(name: String, output: PathBuf, duration: f64) -> anyhow::Result<()> {
    let path = output.join(&name).join("project.json");
    println!("Creating project '{}' at {}", name, path.display());

    let mut file = ProjectFile::new(&name, duration);
    file.save(&path)
        .map_err(|e| anyhow::anyhow!("Failed to create project: {e}"))?;

    println!("Project created successfully:");
    println!("  File: {}", path.display());
    println!("  ID: {}", file.id);
    println!("  Duration: {duration:.1}s");
    println!("  Tracks:");
    for track in &file.state.tracks {
        println!("    {} ({:?})", track.name, track.kind);
    }

    Ok(())
}
