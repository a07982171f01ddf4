//! Reelcore Common Utilities
//!
//! Shared infrastructure for all Reelcore crates:
//! - Error types and result aliases
//! - Time/unit conversions (timeline seconds, display pixels, timecode)
//! - Playback clock
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod logging;
pub mod playback;
pub mod time;

pub use config::*;
pub use error::*;
pub use playback::*;
pub use time::*;
