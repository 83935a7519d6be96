//! # sword_swarm
//!
//! A fixed population of flying swords that chase gesture-dependent
//! formations.  Each frame:
//!
//! 1. [`Formation::select`] reads the current [`HandFrame`](hand_gesture::HandFrame)
//!    (primary gesture, and the secondary for the two-fist case).
//! 2. Every sword gets a target from the formation, its index and the
//!    logical time.
//! 3. A [`SpringDamper`] step pulls position toward target.
//! 4. The sword is turned to fly blade-first along its velocity.
//!
//! ```rust
//! use hand_gesture::HandFrame;
//! use sword_swarm::{FrameClock, SwarmConfig, SwarmState};
//!
//! let mut swarm = SwarmState::new(&SwarmConfig::default().with_seed(1)).unwrap();
//! let mut clock = FrameClock::default();
//! let poses = swarm.step(&HandFrame::empty(), clock.tick());
//! assert_eq!(poses.len(), 300);
//! ```

pub mod config;
pub mod jitter;
pub mod spring;
pub mod formation;
pub mod orientation;
pub mod clock;
pub mod swarm;
mod error;

pub use config::{SwarmConfig, DAMPING, DEFAULT_SWORD_COUNT, FRAME_STEP, SPRING};
pub use jitter::{JitterSource, SeededJitter};
pub use spring::SpringDamper;
pub use formation::{hand_to_world, key_light_for, Formation, HAND_WORLD_SCALE, LIGHT_WORLD_SCALE};
pub use orientation::{instance_transform, look_rotation, sword_orientation, MIN_HEADING_SPEED};
pub use clock::FrameClock;
pub use swarm::{SwarmState, SwordPose, DEFAULT_KEY_LIGHT};
pub use error::ConfigError;
