//! Reelcore Assist
//!
//! The seam between the editor and its AI collaborator:
//! - [`service`] — the [`AssistService`] trait and the offline stand-in
//! - [`boundary`] — functions that run a collaborator call and record
//!   the result into clip properties, swallowing failures
//!
//! The collaborator is opaque and unreliable by contract. Every boundary
//! function returns a valid project state: on any collaborator error the
//! incoming state comes back unchanged and the failure is logged.

pub mod boundary;
pub mod service;

pub use boundary::*;
pub use service::*;
