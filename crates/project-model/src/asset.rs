//! Asset records produced by the ingestion collaborator.

use serde::{Deserialize, Serialize};

use crate::clip::ClipKind;

/// A source media record handed over by asset ingestion.
///
/// `duration_secs` is authoritative: the core never re-derives it from
/// the media itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Unique asset identifier.
    pub id: String,

    /// Media kind.
    pub kind: ClipKind,

    /// Opaque locator (URL, object key, blob handle).
    pub locator: String,

    /// Media duration in seconds. Images and text use a nominal length.
    pub duration_secs: f64,

    /// Optional thumbnail locator.
    #[serde(default)]
    pub thumbnail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_thumbnail_defaults_to_none() {
        let json = r#"{"id":"a1","kind":"video","locator":"blob:1","duration_secs":12.5}"#;
        let asset: AssetRecord = serde_json::from_str(json).unwrap();
        assert!(asset.thumbnail.is_none());
        assert!((asset.duration_secs - 12.5).abs() < 1e-9);
    }
}
