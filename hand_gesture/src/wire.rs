//! JSON-lines detection format.
//!
//! An external landmark detector (camera + model) writes one line per
//! processed video frame:
//!
//! ```text
//! {"hands":[{"handedness":"Right","score":0.94,"landmarks":[{"x":0.51,"y":0.62,"z":0.0}, ...21]}]}
//! {"hands":[]}
//! {"hands":[],"error":"camera unavailable"}
//! ```
//!
//! Hands appear in detection order.  A frame with any malformed hand is
//! rejected as a whole.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classifier::GestureThresholds;
use crate::descriptor::HandFrame;
use crate::error::GestureError;
use crate::landmark::{Landmark, LandmarkSet};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DetectedHand {
    pub landmarks: Vec<Landmark>,
    #[serde(default)]
    pub handedness: Option<String>,
    #[serde(default)]
    pub score: Option<f32>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DetectionFrame {
    #[serde(default)]
    pub hands: Vec<DetectedHand>,
    #[serde(default)]
    pub error: Option<String>,
}

impl DetectionFrame {
    /// Validate every hand.  Fails if the detector flagged an error or any
    /// hand is not a full 21-point set.
    pub fn into_landmark_sets(self) -> Result<Vec<LandmarkSet>, GestureError> {
        if let Some(e) = self.error {
            return Err(GestureError::Detector(e));
        }
        self.hands
            .iter()
            .map(|h| LandmarkSet::from_slice(&h.landmarks))
            .collect()
    }
}

/// Parse one line of detector output.
pub fn parse_detection_line(line: &str) -> Result<DetectionFrame, GestureError> {
    Ok(serde_json::from_str(line.trim())?)
}

/// Parse, validate and describe one line.  Never fails: a bad line becomes
/// a frame with no hands.
pub fn hand_frame_from_line(line: &str, thresholds: &GestureThresholds) -> HandFrame {
    let sets = parse_detection_line(line).and_then(DetectionFrame::into_landmark_sets);
    match sets {
        Ok(sets) => HandFrame::from_landmark_sets(&sets, thresholds),
        Err(e) => {
            warn!("rejecting detection frame: {e}");
            HandFrame::empty()
        }
    }
}

/// Serialize landmark sets in the same format (used to record sessions).
pub fn detection_line(sets: &[LandmarkSet]) -> Result<String, GestureError> {
    let frame = DetectionFrame {
        hands: sets
            .iter()
            .map(|s| DetectedHand { landmarks: s.as_slice().to_vec(), ..DetectedHand::default() })
            .collect(),
        error: None,
    };
    Ok(serde_json::to_string(&frame)?)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
