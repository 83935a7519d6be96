//! # hand_gesture
//!
//! Turns one detected hand (21 normalized landmark points) into a
//! [`HandDescriptor`]: a discrete [`GestureType`], the palm center and the
//! pointing direction.
//!
//! ## Landmark layout
//!
//! | Index | Point | Index | Point |
//! |---|---|---|---|
//! | 0 | wrist | 12 | middle tip |
//! | 4 | thumb tip | 16 | ring tip |
//! | 5 | index base | 17 | pinky base |
//! | 8 | index tip | 20 | pinky tip |
//!
//! `x` and `y` are in image space (`[0, 1]`, `y` grows downward), `z` is
//! relative depth.
//!
//! ## Gesture table
//!
//! Evaluated in order, first match wins:
//!
//! | Gesture | Rule |
//! |---|---|
//! | `Idle` | no landmarks |
//! | `Pointing` | index tip > 0.25 from wrist, other three tips average < 0.15 |
//! | `Fist` | four-tip average < 0.12 |
//! | `OpenPalm` | four-tip average > 0.25 |
//! | `Idle` | everything else |
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{synthetic, GestureType, HandDescriptor};
//!
//! let set = synthetic::pose(GestureType::OpenPalm, 0.5, 0.6);
//! let hand = HandDescriptor::from_landmarks(&set);
//! assert_eq!(hand.gesture, GestureType::OpenPalm);
//! ```

pub mod landmark;
pub mod geometry;
pub mod classifier;
pub mod descriptor;
pub mod wire;
pub mod synthetic;
mod error;

pub use landmark::{Landmark, LandmarkSet, LANDMARK_COUNT};
pub use geometry::{palm_center, pointing_direction};
pub use classifier::{
    classify, classify_with, GestureThresholds, GestureType,
    FIST_CLOSE, OPEN_PALM_SPREAD, POINTING_INDEX_MIN, POINTING_OTHERS_MAX,
};
pub use descriptor::{HandDescriptor, HandFrame, MAX_HANDS};
pub use wire::{detection_line, hand_frame_from_line, parse_detection_line, DetectionFrame};
pub use error::GestureError;
