//! Palm center and pointing direction.
//!
//! Both functions take the raw point slice a tracker hands over, so an
//! absent hand (empty slice) or a short read has a defined answer: the zero
//! vector.

use glam::Vec3;

use crate::landmark::{idx, Landmark, LANDMARK_COUNT};

/// Mean of wrist, index base and pinky base.  `Vec3::ZERO` when the set is
/// empty or not a full hand.
pub fn palm_center(landmarks: &[Landmark]) -> Vec3 {
    if landmarks.len() < LANDMARK_COUNT {
        return Vec3::ZERO;
    }
    let wrist = landmarks[idx::WRIST].to_vec3();
    let index = landmarks[idx::INDEX_MCP].to_vec3();
    let pinky = landmarks[idx::PINKY_MCP].to_vec3();
    (wrist + index + pinky) / 3.0
}

/// Wrist → index tip, with `y` negated so "up in the image" is `+y` in the
/// world.  `x` and `z` are passed through unchanged.
pub fn pointing_direction(landmarks: &[Landmark]) -> Vec3 {
    if landmarks.len() < LANDMARK_COUNT {
        return Vec3::ZERO;
    }
    let wrist = landmarks[idx::WRIST];
    let tip   = landmarks[idx::INDEX_TIP];
    Vec3::new(
        tip.x - wrist.x,
        -(tip.y - wrist.y),
        tip.z - wrist.z,
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
