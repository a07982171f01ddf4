//! Session-owned audio routing.
//!
//! Each playback or export session owns one `AudioMixGraph`. Every clip
//! that needs to sound holds an independent route (no two clips share a
//! seek position, even on the same asset); routes are acquired and
//! released explicitly, or synchronized wholesale against a frame plan.

use std::collections::BTreeMap;

use crate::planner::FramePlan;

/// One clip's routing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioRoute {
    /// Linear gain, 0.0..2.0.
    pub gain: f64,
    /// Stereo pan, -1.0..1.0.
    pub pan: f64,
}

impl Default for AudioRoute {
    fn default() -> Self {
        Self {
            gain: 1.0,
            pan: 0.0,
        }
    }
}

/// The audio routing table for one session.
///
/// Keyed by clip id with deterministic iteration order, so mixer state
/// dumps and tests are stable.
#[derive(Debug, Default)]
pub struct AudioMixGraph {
    routes: BTreeMap<String, AudioRoute>,
}

impl AudioMixGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire (or return the existing) route for a clip.
    pub fn acquire_route(&mut self, clip_id: &str) -> &mut AudioRoute {
        self.routes.entry(clip_id.to_string()).or_default()
    }

    /// Release a clip's route. Releasing an absent route is a no-op.
    pub fn release_route(&mut self, clip_id: &str) {
        self.routes.remove(clip_id);
    }

    /// Current route for a clip, if held.
    pub fn route(&self, clip_id: &str) -> Option<&AudioRoute> {
        self.routes.get(clip_id)
    }

    /// Update a held route's parameters, acquiring it if needed.
    pub fn set_route(&mut self, clip_id: &str, gain: f64, pan: f64) {
        let route = self.acquire_route(clip_id);
        route.gain = gain.clamp(0.0, 2.0);
        route.pan = pan.clamp(-1.0, 1.0);
    }

    /// Make the routing table match a frame plan exactly: acquire and
    /// update a route per plan audio source, release everything else.
    pub fn sync_with_plan(&mut self, plan: &FramePlan) {
        let wanted: Vec<&str> = plan.audio.iter().map(|a| a.clip_id.as_str()).collect();
        let stale: Vec<String> = self
            .routes
            .keys()
            .filter(|id| !wanted.contains(&id.as_str()))
            .cloned()
            .collect();
        for id in stale {
            tracing::debug!(clip = %id, "releasing audio route");
            self.routes.remove(&id);
        }
        for source in &plan.audio {
            self.set_route(&source.clip_id, source.gain, source.pan);
        }
    }

    /// All held routes, in deterministic order.
    pub fn active_routes(&self) -> impl Iterator<Item = (&str, &AudioRoute)> {
        self.routes.iter().map(|(id, route)| (id.as_str(), route))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
