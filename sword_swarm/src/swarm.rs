//! The swarm: one owner, one writer, stepped once per frame.

use glam::{Mat4, Quat, Vec3};
use hand_gesture::HandFrame;
use tracing::{debug, info};

use crate::config::SwarmConfig;
use crate::error::ConfigError;
use crate::formation::{key_light_for, Formation};
use crate::jitter::{JitterSource, SeededJitter};
use crate::orientation::{instance_transform, sword_orientation};
use crate::spring::SpringDamper;

/// Key light position before any hand has been seen.
pub const DEFAULT_KEY_LIGHT: Vec3 = Vec3::new(0.0, 5.0, 5.0);

// ════════════════════════════════════════════════════════════════════════════
// SwordPose
// ════════════════════════════════════════════════════════════════════════════

/// What the renderer gets for one sword.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwordPose {
    pub position:    Vec3,
    pub orientation: Quat,
}

impl SwordPose {
    pub fn transform(&self) -> Mat4 {
        instance_transform(self.position, self.orientation)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SwarmState
// ════════════════════════════════════════════════════════════════════════════

/// Per-sword position, velocity and target for a fixed population.
///
/// The population is fixed at construction.  [`SwarmState::step`] is the only
/// mutator; readers borrow [`SwarmState::poses`] between steps.
pub struct SwarmState<J: JitterSource = SeededJitter> {
    spring:     SpringDamper,
    positions:  Vec<Vec3>,
    velocities: Vec<Vec3>,
    targets:    Vec<Vec3>,
    poses:      Vec<SwordPose>,
    formation:  Formation,
    key_light:  Vec3,
    jitter:     J,
    steps:      u64,
}

impl SwarmState<SeededJitter> {
    /// Seeded from `config.seed`, or from entropy when unset.
    pub fn new(config: &SwarmConfig) -> Result<Self, ConfigError> {
        Self::with_jitter(config, SeededJitter::from_seed_or_entropy(config.seed))
    }
}

impl<J: JitterSource> SwarmState<J> {
    /// Scatter `config.sword_count` swords uniformly through the spawn box,
    /// at rest, each targeting its own spawn point.
    pub fn with_jitter(config: &SwarmConfig, mut jitter: J) -> Result<Self, ConfigError> {
        config.validate()?;

        let n = config.sword_count;
        let half = config.spawn_extent * 0.5;
        let positions: Vec<Vec3> = (0..n)
            .map(|_| {
                let x = jitter.centered(half.x);
                let y = jitter.centered(half.y);
                let z = jitter.centered(half.z);
                Vec3::new(x, y, z)
            })
            .collect();

        let upright = sword_orientation(Vec3::ZERO);
        let poses = positions
            .iter()
            .map(|&position| SwordPose { position, orientation: upright })
            .collect();

        info!(swords = n, spring = config.spring, damping = config.damping, "swarm ready");

        Ok(SwarmState {
            spring:     SpringDamper::new(config.spring, config.damping),
            targets:    positions.clone(),
            velocities: vec![Vec3::ZERO; n],
            positions,
            poses,
            formation:  Formation::IdleOrbit,
            key_light:  DEFAULT_KEY_LIGHT,
            jitter,
            steps:      0,
        })
    }

    /// Advance every sword one frame toward this frame's formation at
    /// logical time `elapsed`.
    pub fn step(&mut self, hands: &HandFrame, elapsed: f64) -> &[SwordPose] {
        let formation = Formation::select(hands);
        if !formation.same_kind(&self.formation) {
            debug!(from = %self.formation, to = %formation, hands = hands.len(), "formation change");
        }
        self.formation = formation;

        if let Some(light) = key_light_for(hands) {
            self.key_light = light;
        }

        let count = self.positions.len();
        for i in 0..count {
            let target = formation.target(i, count, elapsed, &mut self.jitter);
            self.targets[i] = target;

            let (pos, vel) = (&mut self.positions[i], &mut self.velocities[i]);
            self.spring.step(pos, vel, target);

            self.poses[i] = SwordPose {
                position:    *pos,
                orientation: sword_orientation(*vel),
            };
        }

        self.steps += 1;
        &self.poses
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn len(&self)             -> usize       { self.positions.len() }
    pub fn is_empty(&self)        -> bool        { self.positions.is_empty() }
    pub fn poses(&self)           -> &[SwordPose] { &self.poses }
    pub fn positions(&self)       -> &[Vec3]     { &self.positions }
    pub fn velocities(&self)      -> &[Vec3]     { &self.velocities }
    pub fn targets(&self)         -> &[Vec3]     { &self.targets }
    pub fn formation(&self)       -> Formation   { self.formation }
    pub fn steps(&self)           -> u64         { self.steps }

    /// Last hand-driven key light position; stays put when hands vanish.
    pub fn key_light(&self) -> Vec3 { self.key_light }

    /// 4x4 transforms in sword order, ready for instanced upload.
    pub fn transforms(&self) -> impl Iterator<Item = Mat4> + '_ {
        self.poses.iter().map(SwordPose::transform)
    }

    /// Mean distance between each sword and its current target.
    pub fn mean_target_distance(&self) -> f32 {
        let sum: f32 = self.positions.iter()
            .zip(&self.targets)
            .map(|(p, t)| p.distance(*t))
            .sum();
        sum / self.len().max(1) as f32
    }

    /// Mean per-frame speed.
    pub fn mean_speed(&self) -> f32 {
        let sum: f32 = self.velocities.iter().map(|v| v.length()).sum();
        sum / self.len().max(1) as f32
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formation::{hand_to_world, HAND_WORLD_SCALE};
    use hand_gesture::{GestureType, HandDescriptor};

    fn small(seed: u64) -> SwarmState {
        SwarmState::new(&SwarmConfig::default().with_sword_count(40).with_seed(seed)).unwrap()
    }

    fn one_hand(gesture: GestureType) -> HandFrame {
        HandFrame::new(vec![HandDescriptor {
            gesture,
            palm_center: Vec3::new(0.3, 0.6, 0.0),
            direction:   Vec3::new(0.2, 0.1, 0.0),
        }])
    }

    #[test]
    fn spawn_is_at_rest_inside_the_box() {
        let s = small(1);
        assert_eq!(s.len(), 40);
        for (p, t) in s.positions().iter().zip(s.targets()) {
            assert_eq!(p, t);
            assert!(p.x.abs() <= 25.0 && p.y.abs() <= 25.0 && p.z.abs() <= 15.0);
        }
        assert!(s.velocities().iter().all(|v| *v == Vec3::ZERO));
    }

    #[test]
    fn zero_population_is_an_error() {
        let cfg = SwarmConfig::default().with_sword_count(0);
        assert!(SwarmState::new(&cfg).is_err());
    }

    #[test]
    fn same_seed_same_swarm() {
        let mut a = small(77);
        let mut b = small(77);
        let fists = HandFrame::new(vec![one_hand(GestureType::Fist).hands()[0]; 2]);
        for k in 0..30 {
            let t = k as f64 * 0.016;
            a.step(&fists, t);
            b.step(&fists, t);
        }
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn step_publishes_one_pose_per_sword() {
        let mut s = small(2);
        let poses = s.step(&HandFrame::empty(), 0.016);
        assert_eq!(poses.len(), 40);
        assert_eq!(s.steps(), 1);
        assert_eq!(s.poses()[5].position, s.positions()[5]);
    }

    #[test]
    fn population_never_changes() {
        let mut s = small(3);
        for (k, g) in GestureType::all().iter().cycle().take(40).enumerate() {
            s.step(&one_hand(*g), k as f64 * 0.016);
            assert_eq!(s.len(), 40);
            assert_eq!(s.transforms().count(), 40);
        }
    }

    #[test]
    fn formation_tracks_gesture() {
        let mut s = small(4);
        s.step(&one_hand(GestureType::OpenPalm), 0.1);
        assert!(matches!(s.formation(), Formation::DefensiveCircle { center }
            if center == hand_to_world(Vec3::new(0.3, 0.6, 0.0), HAND_WORLD_SCALE)));
        s.step(&HandFrame::empty(), 0.2);
        assert_eq!(s.formation(), Formation::IdleOrbit);
    }

    #[test]
    fn key_light_holds_last_hand_position() {
        let mut s = small(5);
        assert_eq!(s.key_light(), DEFAULT_KEY_LIGHT);
        s.step(&one_hand(GestureType::Idle), 0.0);
        let lit = s.key_light();
        assert_ne!(lit, DEFAULT_KEY_LIGHT);
        s.step(&HandFrame::empty(), 0.016);
        assert_eq!(s.key_light(), lit);
    }

    #[test]
    fn swords_settle_on_a_held_formation() {
        let mut s = small(6);
        let palm = one_hand(GestureType::OpenPalm);
        // Constant time freezes the circle so the targets are stationary.
        for _ in 0..400 {
            s.step(&palm, 1.0);
        }
        assert!(s.mean_target_distance() < 1e-2);
        assert!(s.mean_speed() < 1e-2);
    }
}
