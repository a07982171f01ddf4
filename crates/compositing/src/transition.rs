//! Entry-transition resolution.
//!
//! A transition applies only during the first `duration_secs` of a
//! clip's timeline presence. Outside that window the result is neutral.
//! Only entry transitions exist; a cross-dissolve effect is achieved by
//! the editor placing an overlapping clip with an entry transition.

use serde::Serialize;

use reelcore_project_model::{Clip, TransitionKind};

/// Spatial modifier contributed by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TransitionTransform {
    /// Horizontal translation in percent of frame width.
    TranslateX { percent: f64 },
    /// Uniform scale factor (1.0 = full size).
    Scale { factor: f64 },
}

/// A rectangular reveal region, `inset`-style: each side is the percent
/// of the frame hidden from that edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevealRegion {
    pub top_pct: f64,
    pub right_pct: f64,
    pub bottom_pct: f64,
    pub left_pct: f64,
}

/// Resolved transition state for one clip at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionState {
    /// Progress through the transition, clamped to [0, 1].
    pub progress: f64,
    /// Opacity multiplier, 0..1.
    pub opacity: f64,
    /// Optional spatial modifier.
    pub transform: Option<TransitionTransform>,
    /// Optional reveal region (wipe).
    pub reveal: Option<RevealRegion>,
}

impl TransitionState {
    /// No transition in effect: full opacity, identity transform.
    pub const NEUTRAL: TransitionState = TransitionState {
        progress: 1.0,
        opacity: 1.0,
        transform: None,
        reveal: None,
    };
}

/// Resolve a clip's entry transition at time `t`.
pub fn resolve(clip: &Clip, t: f64) -> TransitionState {
    let Some(transition) = &clip.transition else {
        return TransitionState::NEUTRAL;
    };
    if transition.duration_secs <= 0.0 {
        return TransitionState::NEUTRAL;
    }

    let elapsed = t - clip.start_offset;
    if elapsed >= transition.duration_secs {
        return TransitionState::NEUTRAL;
    }

    let progress = (elapsed / transition.duration_secs).clamp(0.0, 1.0);

    match transition.kind {
        TransitionKind::Fade | TransitionKind::Dissolve => TransitionState {
            progress,
            opacity: progress,
            transform: None,
            reveal: None,
        },
        // Enters from the right.
        TransitionKind::SlideLeft => TransitionState {
            progress,
            opacity: 1.0,
            transform: Some(TransitionTransform::TranslateX {
                percent: (1.0 - progress) * 100.0,
            }),
            reveal: None,
        },
        // Enters from the left.
        TransitionKind::SlideRight => TransitionState {
            progress,
            opacity: 1.0,
            transform: Some(TransitionTransform::TranslateX {
                percent: -(1.0 - progress) * 100.0,
            }),
            reveal: None,
        },
        TransitionKind::Zoom => TransitionState {
            progress,
            opacity: 1.0,
            transform: Some(TransitionTransform::Scale { factor: progress }),
            reveal: None,
        },
        // Reveal grows from the left edge: only the left `progress`
        // fraction of the frame is visible.
        TransitionKind::Wipe => TransitionState {
            progress,
            opacity: 1.0,
            transform: None,
            reveal: Some(RevealRegion {
                top_pct: 0.0,
                right_pct: (1.0 - progress) * 100.0,
                bottom_pct: 0.0,
                left_pct: 0.0,
            }),
        },
    }
}
