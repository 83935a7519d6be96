//! Three-pose gesture classifier.
//!
//! Stateless: every frame is classified from its own landmarks.  Flicker
//! between neighbouring poses near a threshold is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::landmark::{idx, Landmark, LANDMARK_COUNT};

/// Four-tip average below this is a fist.
pub const FIST_CLOSE: f32 = 0.12;
/// Four-tip average above this is an open palm.
pub const OPEN_PALM_SPREAD: f32 = 0.25;
/// Index tip must reach further than this to point.
pub const POINTING_INDEX_MIN: f32 = 0.25;
/// ...while middle, ring and pinky average stays under this.
pub const POINTING_OTHERS_MAX: f32 = 0.15;

// ════════════════════════════════════════════════════════════════════════════
// GestureType
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GestureType {
    #[default]
    Idle,
    OpenPalm,
    Fist,
    Pointing,
}

impl GestureType {
    pub fn all() -> [GestureType; 4] {
        [GestureType::Idle, GestureType::OpenPalm, GestureType::Fist, GestureType::Pointing]
    }

    pub fn name(&self) -> &'static str {
        match self {
            GestureType::Idle     => "IDLE",
            GestureType::OpenPalm => "OPEN_PALM",
            GestureType::Fist     => "FIST",
            GestureType::Pointing => "POINTING",
        }
    }

    /// Pose and the swarm behaviour it commands, for on-screen captions.
    pub fn caption(&self) -> &'static str {
        match self {
            GestureType::Idle     => "IDLE / ORBIT",
            GestureType::OpenPalm => "PALM / DEFENSE",
            GestureType::Fist     => "FIST / CONVERGE",
            GestureType::Pointing => "POINT / ATTACK",
        }
    }
}

impl fmt::Display for GestureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureThresholds
// ════════════════════════════════════════════════════════════════════════════

/// Image-space distance thresholds.  Fixed at startup.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    pub fist_close:          f32,
    pub open_palm_spread:    f32,
    pub pointing_index_min:  f32,
    pub pointing_others_max: f32,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        GestureThresholds {
            fist_close:          FIST_CLOSE,
            open_palm_spread:    OPEN_PALM_SPREAD,
            pointing_index_min:  POINTING_INDEX_MIN,
            pointing_others_max: POINTING_OTHERS_MAX,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify with the default thresholds.
pub fn classify(landmarks: &[Landmark]) -> GestureType {
    classify_with(landmarks, &GestureThresholds::default())
}

/// Classify one hand.  An empty or partial point list is `Idle`.
pub fn classify_with(landmarks: &[Landmark], t: &GestureThresholds) -> GestureType {
    if landmarks.len() < LANDMARK_COUNT {
        return GestureType::Idle;
    }

    let wrist = landmarks[idx::WRIST];
    let [index, middle, ring, pinky] =
        idx::FINGER_TIPS.map(|tip| wrist.distance_2d(&landmarks[tip]));

    let others_avg = (middle + ring + pinky) / 3.0;
    let all_avg    = (index + middle + ring + pinky) / 4.0;

    decide(index, others_avg, all_avg, t)
}

/// The ordered decision on precomputed distances.  Pointing is tested
/// before the average so an isolated index finger is never read as a fist.
fn decide(index: f32, others_avg: f32, all_avg: f32, t: &GestureThresholds) -> GestureType {
    if index > t.pointing_index_min && others_avg < t.pointing_others_max {
        return GestureType::Pointing;
    }
    if all_avg < t.fist_close {
        return GestureType::Fist;
    }
    if all_avg > t.open_palm_spread {
        return GestureType::OpenPalm;
    }
    GestureType::Idle
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
