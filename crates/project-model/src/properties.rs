//! Per-clip properties: the sparse bag users edit, and its fully
//! defaulted "effective" resolution consumed by the frame planner.
//!
//! Every optional field has a documented default. Consumers never apply
//! defaults themselves; they call [`ClipProperties::resolve_effective`]
//! once per frame and read fully-populated values.

use serde::{Deserialize, Serialize};

/// Default opacity, percent.
pub const DEFAULT_OPACITY: f64 = 100.0;
/// Default scale, percent.
pub const DEFAULT_SCALE: f64 = 100.0;
/// Default brightness/contrast/saturation baseline, percent.
pub const DEFAULT_COLOR_BASELINE: f64 = 100.0;
/// Default audio volume, percent (0..200 accepted).
pub const DEFAULT_VOLUME: f64 = 100.0;

/// A speed-ramp control point: `time` is a 0..1 fraction of the clip's
/// timeline duration, `speed` the playback multiplier at that fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampPoint {
    pub time: f64,
    pub speed: f64,
}

/// A piecewise-linear speed ramp over a clip's timeline duration.
///
/// Points are kept sorted by `time` and span 0..1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedRamp {
    pub points: Vec<RampPoint>,
}

impl SpeedRamp {
    /// A flat ramp at the given speed (two endpoints).
    pub fn flat(speed: f64) -> Self {
        Self {
            points: vec![
                RampPoint { time: 0.0, speed },
                RampPoint { time: 1.0, speed },
            ],
        }
    }
}

/// How a clip consumes source time.
///
/// The three modes are mutually exclusive by construction. `Reversed`
/// and `Ramped` clips have their audio muted: a single time-seekable
/// audio source cannot track a backward or non-monotonic read head
/// without audible artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimingMode {
    /// Constant forward playback at `speed` (1.0 = realtime).
    Normal { speed: f64 },
    /// Constant backward playback at `speed`.
    Reversed { speed: f64 },
    /// Piecewise-ramped forward playback.
    Ramped { ramp: SpeedRamp },
}

impl Default for TimingMode {
    fn default() -> Self {
        TimingMode::Normal { speed: 1.0 }
    }
}

impl TimingMode {
    /// Whether this mode forces the clip's audio to be muted.
    pub fn mutes_audio(&self) -> bool {
        !matches!(self, TimingMode::Normal { .. })
    }

    /// Constant speed multiplier, if the mode has one.
    pub fn constant_speed(&self) -> Option<f64> {
        match self {
            TimingMode::Normal { speed } | TimingMode::Reversed { speed } => Some(*speed),
            TimingMode::Ramped { .. } => None,
        }
    }
}

/// Kind of a visual effect in a clip's effect stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    Blur,
    Sepia,
    Grayscale,
    Invert,
    HueRotate,
    Sharpen,
    Sketch,
    SpotRemover,
    RgbShift,
    Glitch,
    Vignette,
    ScanLines,
}

/// One entry in a clip's ordered effect stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualEffect {
    pub id: String,
    pub kind: EffectKind,
    /// Strength, 0..100.
    pub intensity: f64,
}

/// Chroma-key settings. All sliders are 0..100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromaKey {
    pub enabled: bool,
    /// Key color as hex string (for example `#00ff00`).
    pub key_color: String,
    /// Color-match width; also sharpens the key boundary pre-key.
    pub tolerance: f64,
    /// Post-key edge blur.
    pub feather: f64,
    /// Pseudo-depth: pushes the keyed subject back and up.
    pub distance: f64,
    /// Post-key drop-shadow strength.
    pub shadow: f64,
}

impl Default for ChromaKey {
    fn default() -> Self {
        Self {
            enabled: false,
            key_color: "#00ff00".to_string(),
            tolerance: 30.0,
            feather: 0.0,
            distance: 0.0,
            shadow: 0.0,
        }
    }
}

/// A single equalizer band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EqBand {
    pub freq_hz: f64,
    pub gain_db: f64,
}

/// Horizontal alignment of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Styling for text clips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: u16,
    pub color: String,
    pub align: TextAlign,
    pub background: Option<String>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_family: "Inter".to_string(),
            font_size: 48.0,
            font_weight: 600,
            color: "#ffffff".to_string(),
            align: TextAlign::Center,
            background: None,
        }
    }
}

/// The sparse, user-edited property bag on a clip.
///
/// Geometry and color fields are `None` until first touched; `None`
/// means "use the documented default". AI fields are written by the
/// assist boundary and read by the compositor's overlay pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipProperties {
    // Geometry
    /// Opacity, 0..100.
    pub opacity: Option<f64>,
    /// Uniform scale, percent.
    pub scale: Option<f64>,
    /// Rotation, degrees clockwise.
    pub rotation: Option<f64>,
    /// Horizontal offset, percent of frame width.
    pub position_x: Option<f64>,
    /// Vertical offset, percent of frame height.
    pub position_y: Option<f64>,

    // Color grade
    /// Brightness, percent (100 = neutral).
    pub brightness: Option<f64>,
    /// Contrast, percent (100 = neutral).
    pub contrast: Option<f64>,
    /// Saturation, percent (100 = neutral).
    pub saturation: Option<f64>,
    /// Color temperature shift, -100..100 (0 = neutral).
    pub temperature: Option<f64>,

    /// Ordered effect stack.
    pub effects: Vec<VisualEffect>,

    /// Chroma-key settings.
    pub chroma_key: Option<ChromaKey>,

    // Audio
    /// Volume, percent 0..200.
    pub volume: Option<f64>,
    /// Stereo pan, -50 (full left) .. 50 (full right).
    pub pan: Option<f64>,
    /// Optional per-band equalizer.
    pub equalizer: Option<Vec<EqBand>>,

    /// Source-time consumption mode.
    pub timing: TimingMode,

    /// Text styling (text clips only).
    pub text: Option<TextStyle>,

    // AI-derived fields
    /// Object names reported by the assist collaborator.
    pub detected_objects: Vec<String>,
    /// Currently tracked mask, if any.
    pub active_mask_id: Option<String>,
    /// Whether the mask-tracking overlay is shown.
    pub mask_overlay_visible: bool,
    /// Seconds of generated tail appended to the clip.
    pub ai_extended_duration: Option<f64>,

    /// Seed for stochastic effects (glitch). Fixed at clip creation so a
    /// given `(state, t)` always renders identically.
    pub glitch_seed: u64,
}

/// Fully-populated property values for one frame of one clip.
///
/// Produced once per frame by [`ClipProperties::resolve_effective`];
/// every consumer reads defaulted values from here instead of repeating
/// fallback logic at each use site.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveProperties {
    pub opacity: f64,
    pub scale: f64,
    pub rotation: f64,
    pub position_x: f64,
    pub position_y: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
    pub temperature: f64,
    pub effects: Vec<VisualEffect>,
    pub chroma_key: Option<ChromaKey>,
    pub volume: f64,
    pub pan: f64,
    pub equalizer: Vec<EqBand>,
    pub timing: TimingMode,
    pub text: TextStyle,
    pub detected_objects: Vec<String>,
    pub active_mask_id: Option<String>,
    pub mask_overlay_visible: bool,
    pub ai_extended_duration: f64,
    pub glitch_seed: u64,
}

impl ClipProperties {
    /// Resolve the sparse bag into fully-defaulted values.
    ///
    /// Total: never fails, never panics, regardless of how empty or
    /// out-of-range the bag is. Range validation belongs to the editing
    /// layer, not here.
    pub fn resolve_effective(&self) -> EffectiveProperties {
        EffectiveProperties {
            opacity: self.opacity.unwrap_or(DEFAULT_OPACITY),
            scale: self.scale.unwrap_or(DEFAULT_SCALE),
            rotation: self.rotation.unwrap_or(0.0),
            position_x: self.position_x.unwrap_or(0.0),
            position_y: self.position_y.unwrap_or(0.0),
            brightness: self.brightness.unwrap_or(DEFAULT_COLOR_BASELINE),
            contrast: self.contrast.unwrap_or(DEFAULT_COLOR_BASELINE),
            saturation: self.saturation.unwrap_or(DEFAULT_COLOR_BASELINE),
            temperature: self.temperature.unwrap_or(0.0),
            effects: self.effects.clone(),
            chroma_key: self.chroma_key.clone().filter(|ck| ck.enabled),
            volume: self.volume.unwrap_or(DEFAULT_VOLUME),
            pan: self.pan.unwrap_or(0.0),
            equalizer: self.equalizer.clone().unwrap_or_default(),
            timing: self.timing.clone(),
            text: self.text.clone().unwrap_or_default(),
            detected_objects: self.detected_objects.clone(),
            active_mask_id: self.active_mask_id.clone(),
            mask_overlay_visible: self.mask_overlay_visible,
            ai_extended_duration: self.ai_extended_duration.unwrap_or(0.0),
            glitch_seed: self.glitch_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bag_resolves_to_defaults() {
        let eff = ClipProperties::default().resolve_effective();
        assert_eq!(eff.opacity, DEFAULT_OPACITY);
        assert_eq!(eff.scale, DEFAULT_SCALE);
        assert_eq!(eff.rotation, 0.0);
        assert_eq!(eff.brightness, DEFAULT_COLOR_BASELINE);
        assert_eq!(eff.volume, DEFAULT_VOLUME);
        assert_eq!(eff.pan, 0.0);
        assert_eq!(eff.ai_extended_duration, 0.0);
        assert!(eff.effects.is_empty());
        assert!(eff.chroma_key.is_none());
        assert_eq!(eff.timing, TimingMode::Normal { speed: 1.0 });
    }

    #[test]
    fn test_disabled_chroma_key_resolves_to_none() {
        let props = ClipProperties {
            chroma_key: Some(ChromaKey {
                enabled: false,
                ..ChromaKey::default()
            }),
            ..ClipProperties::default()
        };
        assert!(props.resolve_effective().chroma_key.is_none());
    }

    #[test]
    fn test_timing_mode_audio_muting() {
        assert!(!TimingMode::Normal { speed: 2.0 }.mutes_audio());
        assert!(TimingMode::Reversed { speed: 1.0 }.mutes_audio());
        assert!(TimingMode::Ramped {
            ramp: SpeedRamp::flat(1.0)
        }
        .mutes_audio());
    }

    #[test]
    fn test_properties_deserialize_from_empty_object() {
        let props: ClipProperties = serde_json::from_str("{}").unwrap();
        assert_eq!(props, ClipProperties::default());
    }

    #[test]
    fn test_timing_mode_tagged_serialization() {
        let json = serde_json::to_string(&TimingMode::Reversed { speed: 1.5 }).unwrap();
        assert!(json.contains("\"mode\":\"reversed\""));
        let back: TimingMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TimingMode::Reversed { speed: 1.5 });
    }
}
