//! Synthetic landmark sets for each pose.
//!
//! Used by the keyboard simulator and by tests.  Each finger is a straight
//! ray from the wrist, so the wrist-to-tip distance is exactly the table
//! value below and the classifier's answer is known in advance.

use crate::classifier::GestureType;
use crate::landmark::{idx, Landmark, LandmarkSet, LANDMARK_COUNT};

/// Wrist → knuckle distance for the four fingers.
const KNUCKLE_REACH: f32 = 0.09;

/// Finger angles from image-up, radians (index → pinky).
const FINGER_ANGLES: [f32; 4] = [-0.26, -0.09, 0.09, 0.26];
const THUMB_ANGLE:   f32 = -0.87;

/// Wrist → tip distances (index, middle, ring, pinky, thumb).
fn reach(gesture: GestureType) -> [f32; 5] {
    match gesture {
        GestureType::Fist     => [0.08, 0.08, 0.07, 0.07, 0.06],
        GestureType::OpenPalm => [0.32, 0.34, 0.31, 0.27, 0.16],
        GestureType::Pointing => [0.32, 0.08, 0.08, 0.07, 0.07],
        GestureType::Idle     => [0.18, 0.19, 0.18, 0.16, 0.10],
    }
}

/// An upright hand with the wrist at `(wrist_x, wrist_y)`.
pub fn pose(gesture: GestureType, wrist_x: f32, wrist_y: f32) -> LandmarkSet {
    pose_rolled(gesture, wrist_x, wrist_y, 0.0)
}

/// Like [`pose`] with the whole hand rotated by `roll` radians in the image
/// plane (positive = clockwise on screen).
pub fn pose_rolled(gesture: GestureType, wrist_x: f32, wrist_y: f32, roll: f32) -> LandmarkSet {
    let reach = reach(gesture);
    let wrist = Landmark::new(wrist_x, wrist_y, 0.0);
    let mut points = [wrist; LANDMARK_COUNT];

    let at = |angle: f32, dist: f32, depth: f32| {
        let a = angle + roll;
        Landmark::new(wrist_x + dist * a.sin(), wrist_y - dist * a.cos(), depth)
    };

    // Thumb: CMC, MCP, IP, TIP evenly along its ray.
    for (k, slot) in (idx::THUMB_CMC..=idx::THUMB_TIP).enumerate() {
        let t = (k + 1) as f32 / 4.0;
        points[slot] = at(THUMB_ANGLE, reach[4] * t, -0.01 * t);
    }

    // Fingers: MCP at knuckle reach, PIP/DIP between knuckle and tip.
    for (f, &angle) in FINGER_ANGLES.iter().enumerate() {
        let mcp = idx::INDEX_MCP + f * 4;
        let tip = reach[f];
        points[mcp] = at(angle, KNUCKLE_REACH, 0.0);
        for j in 1..=3 {
            let t = j as f32 / 3.0;
            let dist = KNUCKLE_REACH + (tip - KNUCKLE_REACH) * t;
            points[mcp + j] = at(angle, dist, -0.02 * t);
        }
    }

    LandmarkSet::new(points)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
