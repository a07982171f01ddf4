//! Timeline markers: named snap anchors independent of clips and tracks.

use serde::{Deserialize, Serialize};

/// A named point on the timeline, used as a snap anchor and for
/// navigation. Markers never affect rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Unique marker identifier.
    pub id: String,

    /// Position in timeline seconds.
    pub time_secs: f64,

    /// Display label.
    pub label: String,

    /// Display color as hex string (for example `#e8c547`).
    pub color: String,
}

impl Marker {
    pub fn new(id: impl Into<String>, time_secs: f64, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            time_secs: time_secs.max(0.0),
            label: label.into(),
            color: "#e8c547".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_clamps_negative_time() {
        let marker = Marker::new("m1", -2.0, "intro");
        assert_eq!(marker.time_secs, 0.0);
    }
}
