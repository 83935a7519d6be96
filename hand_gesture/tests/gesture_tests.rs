//! Classifier and geometry properties on the public API.

use glam::Vec3;
use hand_gesture::{
    classify, hand_frame_from_line, landmark::idx, palm_center, pointing_direction, synthetic,
    GestureThresholds, GestureType, HandDescriptor, Landmark, LandmarkSet, LANDMARK_COUNT,
};

/// Wrist at (0.5, 0.5); tips placed straight down the image at each distance.
fn hand(index: f32, middle: f32, ring: f32, pinky: f32) -> LandmarkSet {
    let mut pts = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
    for (slot, d) in idx::FINGER_TIPS.iter().zip([index, middle, ring, pinky]) {
        pts[*slot] = Landmark::new(0.5, 0.5 + d, 0.0);
    }
    LandmarkSet::new(pts)
}

#[test]
fn pointing_wins_whatever_the_four_tip_average() {
    // index > 0.25 and others < 0.15 across a range of averages.
    for (index, other) in [(0.26, 0.01), (0.3, 0.1), (0.5, 0.14), (0.8, 0.12)] {
        let set = hand(index, other, other, other);
        assert_eq!(classify(set.as_slice()), GestureType::Pointing, "index={index} other={other}");
    }
}

#[test]
fn absent_hand_defaults() {
    assert_eq!(classify(&[]), GestureType::Idle);
    assert_eq!(palm_center(&[]), Vec3::ZERO);
    assert_eq!(pointing_direction(&[]), Vec3::ZERO);
}

#[test]
fn direction_inverts_y_only() {
    let mut pts = [Landmark::new(0.3, 0.3, 0.1); LANDMARK_COUNT];
    pts[idx::INDEX_TIP] = Landmark::new(0.4, 0.5, 0.1);
    let d = pointing_direction(&pts);
    assert!((d - Vec3::new(0.1, -0.2, 0.0)).length() < 1e-6, "{d:?}");
}

#[test]
fn descriptor_matches_free_functions() {
    let set = synthetic::pose_rolled(GestureType::Pointing, 0.45, 0.75, 0.3);
    let d = HandDescriptor::from_landmarks(&set);
    assert_eq!(d.gesture, classify(set.as_slice()));
    assert_eq!(d.palm_center, palm_center(set.as_slice()));
    assert_eq!(d.direction, pointing_direction(set.as_slice()));
}

#[test]
fn rolled_pointing_direction_follows_roll() {
    // Rolled clockwise on screen → index leans right → +x in the world.
    let set = synthetic::pose_rolled(GestureType::Pointing, 0.5, 0.8, 0.8);
    let d = pointing_direction(set.as_slice());
    assert!(d.x > 0.0);
    assert!(d.y > 0.0);
}

#[test]
fn third_hand_in_a_detection_line_is_ignored() {
    let sets = [
        synthetic::pose(GestureType::Fist,     0.3, 0.5),
        synthetic::pose(GestureType::Fist,     0.7, 0.5),
        synthetic::pose(GestureType::OpenPalm, 0.5, 0.5),
    ];
    let line = hand_gesture::detection_line(&sets).unwrap();
    let frame = hand_frame_from_line(&line, &GestureThresholds::default());
    assert_eq!(frame.len(), 2);
    assert!(frame.hands().iter().all(|h| h.gesture == GestureType::Fist));
}
