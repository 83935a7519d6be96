//! Startup-fixed swarm parameters.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SWORD_COUNT: usize = 300;
/// Fraction of the target offset added to velocity each frame.
pub const SPRING:  f32 = 0.06;
/// Velocity retained each frame.
pub const DAMPING: f32 = 0.85;
/// Logical seconds per frame (nominal 60 Hz).
pub const FRAME_STEP: f32 = 0.016;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub sword_count:  usize,
    pub spring:       f32,
    pub damping:      f32,
    pub time_step:    f32,
    /// Full edge lengths of the box swords spawn in, centred on the origin.
    pub spawn_extent: Vec3,
    /// Seed for spawn positions and per-frame jitter.  `None` = entropy.
    pub seed:         Option<u64>,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        SwarmConfig {
            sword_count:  DEFAULT_SWORD_COUNT,
            spring:       SPRING,
            damping:      DAMPING,
            time_step:    FRAME_STEP,
            spawn_extent: Vec3::new(50.0, 50.0, 30.0),
            seed:         None,
        }
    }
}

impl SwarmConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sword_count(mut self, count: usize) -> Self {
        self.sword_count = count;
        self
    }

    /// Reject parameters that would make the integrator diverge or the
    /// swarm empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sword_count == 0 {
            return Err(ConfigError::EmptySwarm);
        }
        if !(self.spring > 0.0 && self.spring <= 1.0) {
            return Err(ConfigError::Spring(self.spring));
        }
        if !(self.damping >= 0.0 && self.damping < 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(ConfigError::TimeStep(self.time_step));
        }
        if !(self.spawn_extent.is_finite() && self.spawn_extent.min_element() >= 0.0) {
            return Err(ConfigError::SpawnExtent(self.spawn_extent));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(SwarmConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_swords_rejected() {
        let cfg = SwarmConfig::default().with_sword_count(0);
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptySwarm)));
    }

    #[test]
    fn undamped_rejected() {
        let cfg = SwarmConfig { damping: 1.0, ..SwarmConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Damping(_))));
    }

    #[test]
    fn nan_spring_rejected() {
        let cfg = SwarmConfig { spring: f32::NAN, ..SwarmConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::Spring(_))));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SwarmConfig = serde_json::from_str(r#"{"sword_count": 64, "seed": 7}"#).unwrap();
        assert_eq!(cfg.sword_count, 64);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.spring, SPRING);
        assert_eq!(cfg.damping, DAMPING);
    }
}
