//! # sword_viz
//!
//! Hand-gesture controlled flying-sword swarm: hand sources, a software
//! renderer with HUD, and the application loop.
//!
//! ## Gesture → Formation mapping
//!
//! | Primary hand | Secondary hand | Swarm |
//! |---|---|---|
//! | none | - | Idle orbit around the origin |
//! | Fist | Fist | Mega convergence on the primary palm |
//! | Fist | other / none | Forward beam into the screen |
//! | Open palm | any | Defensive circle, radius 10 |
//! | Pointing | any | Focused beam along the index finger |
//! | Idle | any | Relaxed orbit around the palm |
//!
//! The key light follows the primary palm and stays where it was last seen.
//!
//! ## Hand sources
//!
//! * (default): **Simulation mode**: keyboard + mouse drive synthetic hands
//!   that go through the real classifier.
//! * `-- PROGRAM ARGS...` / `--replay FILE`: JSON lines, one detection per
//!   line, from a detector process or a recording.
//! * `leap` feature: **Hardware mode**: polls a real LeapMotion controller
//!   via LeapC.  Joints are scaled by the hand's own palm length, so the
//!   same thresholds hold for small and large hands.
//!
//! ### Simulation keyboard shortcuts
//!
//! | Key | Effect |
//! |---|---|
//! | `1` `2` `3` `4` | Primary hand: idle / open palm / fist / pointing |
//! | `B` | Toggle a second fist (mega convergence) |
//! | `H` | Hide / show hands |
//! | `←` `→` | Roll the primary hand |
//! | mouse | Move the primary palm |
//! | `Q` / `Esc` | Quit |

pub mod source;
pub mod canvas;
pub mod camera;
pub mod scene;
pub mod hud;
pub mod visualizer;
pub mod app;
