//! Reelcore CLI — Command-line interface for project inspection and
//! frame planning.
//!
//! Usage:
//!   reelcore init <NAME>            Create a new empty project
//!   reelcore info <PATH>            Show project information
//!   reelcore validate <PATH>        Check project invariants
//!   reelcore plan <PATH> --time T   Print the frame plan at time T
//!   reelcore export <PATH>          Emit the per-frame plan stream

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "reelcore",
    about = "Timeline compositing and editing for video projects",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append logs to a file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new empty project
    Init {
        /// Project name
        name: String,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Initial project duration in seconds
        #[arg(long, default_value = "60")]
        duration: f64,
    },

    /// Show project information
    Info {
        /// Path to the project file
        path: PathBuf,
    },

    /// Check project invariants
    Validate {
        /// Path to the project file
        path: PathBuf,
    },

    /// Print the frame plan at one instant
    Plan {
        /// Path to the project file
        path: PathBuf,

        /// Timeline position in seconds
        #[arg(short, long, default_value = "0.0")]
        time: f64,
    },

    /// Emit the per-frame plan stream as JSON Lines
    Export {
        /// Path to the project file
        path: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frames per second
        #[arg(long, default_value = "30")]
        fps: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    reelcore_common::logging::init_logging(&reelcore_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: cli.log_file.clone(),
    });

    match cli.command {
        Commands::Init {
            name,
            output,
            duration,
        } => commands::init::run(name, output, duration),
        Commands::Info { path } => commands::info::run(path),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Plan { path, time } => commands::plan::run(path, time),
        Commands::Export { path, output, fps } => commands::export::run(path, output, fps),
    }
}
