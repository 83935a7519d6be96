//! Per-hand descriptors and the per-frame hand list.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{classify_with, GestureThresholds, GestureType};
use crate::geometry::{palm_center, pointing_direction};
use crate::landmark::LandmarkSet;

/// Hands beyond this many in one frame are ignored.
pub const MAX_HANDS: usize = 2;

// ════════════════════════════════════════════════════════════════════════════
// HandDescriptor
// ════════════════════════════════════════════════════════════════════════════

/// Everything the swarm needs to know about one hand for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandDescriptor {
    pub gesture:     GestureType,
    /// Image space, same convention as the landmarks.
    pub palm_center: Vec3,
    /// World-up convention (y already flipped).  Not normalized.
    pub direction:   Vec3,
}

impl HandDescriptor {
    pub fn from_landmarks(set: &LandmarkSet) -> Self {
        Self::from_landmarks_with(set, &GestureThresholds::default())
    }

    pub fn from_landmarks_with(set: &LandmarkSet, thresholds: &GestureThresholds) -> Self {
        let points = set.as_slice();
        HandDescriptor {
            gesture:     classify_with(points, thresholds),
            palm_center: palm_center(points),
            direction:   pointing_direction(points),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandFrame
// ════════════════════════════════════════════════════════════════════════════

/// The hand list for one frame, in detection order.
///
/// Index 0 is the primary hand, index 1 the secondary.  Order is whatever the
/// tracker reported this frame; it is not a stable identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandFrame {
    hands: Vec<HandDescriptor>,
}

impl HandFrame {
    /// No hands.
    pub fn empty() -> Self {
        HandFrame::default()
    }

    /// Build from descriptors, keeping at most [`MAX_HANDS`].
    pub fn new(mut hands: Vec<HandDescriptor>) -> Self {
        if hands.len() > MAX_HANDS {
            debug!(reported = hands.len(), "dropping hands beyond the first {MAX_HANDS}");
            hands.truncate(MAX_HANDS);
        }
        HandFrame { hands }
    }

    /// Classify and describe each landmark set.
    pub fn from_landmark_sets<'a, I>(sets: I, thresholds: &GestureThresholds) -> Self
    where
        I: IntoIterator<Item = &'a LandmarkSet>,
    {
        let hands = sets
            .into_iter()
            .take(MAX_HANDS + 1)
            .map(|s| HandDescriptor::from_landmarks_with(s, thresholds))
            .collect();
        HandFrame::new(hands)
    }

    pub fn primary(&self) -> Option<&HandDescriptor> {
        self.hands.first()
    }

    pub fn secondary(&self) -> Option<&HandDescriptor> {
        self.hands.get(1)
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    pub fn hands(&self) -> &[HandDescriptor] {
        &self.hands
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
