//! Gesture → formation → per-sword target.
//!
//! | Hands | Primary | Secondary | Formation |
//! |---|---|---|---|
//! | 0 | - | - | idle orbit around the origin |
//! | ≥1 | Fist | Fist | mega convergence on the primary hand |
//! | ≥1 | Fist | other / none | forward beam into the screen |
//! | ≥1 | OpenPalm | any | defensive circle |
//! | ≥1 | Pointing | any | focused beam along the index finger |
//! | ≥1 | Idle | any | relaxed orbit around the hand |
//!
//! Every formula takes the sword index `i`, the population `count` and the
//! logical time `t`; only mega convergence and the focused beam draw jitter.

use std::f32::consts::TAU;
use std::fmt;

use glam::{Vec2, Vec3};
use hand_gesture::{GestureType, HandFrame};

use crate::jitter::JitterSource;

/// Image → world scale used for hand-driven formations.
pub const HAND_WORLD_SCALE: Vec2 = Vec2::new(40.0, 30.0);
/// Image → world scale used for the hand-following key light.
pub const LIGHT_WORLD_SCALE: Vec2 = Vec2::new(35.0, 25.0);
/// Key light depth while following a hand.
pub const LIGHT_DEPTH: f32 = 8.0;

pub const DEFENSIVE_RADIUS: f32 = 10.0;

/// Map a normalized palm center to world space: the center of the camera
/// view lands on the origin and image `y` is flipped.  Depth is dropped.
pub fn hand_to_world(palm_center: Vec3, scale: Vec2) -> Vec3 {
    Vec3::new(
        (palm_center.x - 0.5) * scale.x,
        -(palm_center.y - 0.5) * scale.y,
        0.0,
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Formation
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Formation {
    IdleOrbit,
    MegaConvergence { center: Vec3 },
    ForwardBeam     { origin: Vec3 },
    DefensiveCircle { center: Vec3 },
    /// `direction` is unit length, or zero for a degenerate pointing hand.
    FocusedBeam     { origin: Vec3, direction: Vec3 },
    RelaxedOrbit    { center: Vec3 },
}

impl Formation {
    /// Pick this frame's formation.  Only the first two hands are read.
    pub fn select(hands: &HandFrame) -> Formation {
        let Some(primary) = hands.primary() else {
            return Formation::IdleOrbit;
        };
        let h = hand_to_world(primary.palm_center, HAND_WORLD_SCALE);

        match primary.gesture {
            GestureType::Fist => {
                let both = hands.secondary().map(|s| s.gesture) == Some(GestureType::Fist);
                if both {
                    Formation::MegaConvergence { center: h }
                } else {
                    Formation::ForwardBeam { origin: h }
                }
            }
            GestureType::OpenPalm => Formation::DefensiveCircle { center: h },
            GestureType::Pointing => Formation::FocusedBeam {
                origin:    h,
                direction: primary.direction.normalize_or_zero(),
            },
            GestureType::Idle => Formation::RelaxedOrbit { center: h },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Formation::IdleOrbit             => "idle orbit",
            Formation::MegaConvergence { .. } => "mega convergence",
            Formation::ForwardBeam { .. }     => "forward beam",
            Formation::DefensiveCircle { .. } => "defensive circle",
            Formation::FocusedBeam { .. }     => "focused beam",
            Formation::RelaxedOrbit { .. }    => "relaxed orbit",
        }
    }

    /// Whether `self` and `other` are the same kind of formation, ignoring
    /// where the hand is.
    pub fn same_kind(&self, other: &Formation) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Target for sword `i` of `count` at logical time `t`.
    pub fn target<J: JitterSource + ?Sized>(
        &self,
        i: usize,
        count: usize,
        t: f64,
        jitter: &mut J,
    ) -> Vec3 {
        let fi = i as f32;
        let share = fi / count.max(1) as f32;

        match *self {
            Formation::IdleOrbit => {
                let base   = share * TAU;
                let angle  = base + phase(t, 0.3);
                let radius = 12.0 + (phase(t, 0.5) + fi * 0.05).sin() * 3.0;
                Vec3::new(
                    angle.cos() * radius,
                    // 0.8 × angle, with the time part wrapped on its own.
                    (base * 0.8 + phase(t, 0.24)).sin() * radius * 0.7,
                    (phase(t, 0.2) + fi * 0.02).sin() * 8.0,
                )
            }

            Formation::MegaConvergence { center } => {
                let dx = jitter.centered(1.0);
                let dy = jitter.centered(1.0);
                center + Vec3::new(dx, dy, 0.0)
            }

            Formation::ForwardBeam { origin } => {
                let noise = (phase(t, 15.0) + fi).sin() * 0.8;
                Vec3::new(
                    origin.x + noise,
                    origin.y + noise,
                    origin.z - 10.0 - (i % 20) as f32,
                )
            }

            Formation::DefensiveCircle { center } => {
                let angle = share * TAU + phase(t, 1.0);
                center + Vec3::new(
                    angle.cos() * DEFENSIVE_RADIUS,
                    angle.sin() * DEFENSIVE_RADIUS,
                    (angle * 2.0).cos() * 2.0,
                )
            }

            Formation::FocusedBeam { origin, direction } => {
                let reach  = 5.0 + share * 25.0;
                let spread = (i % 10) as f32 * 0.1;
                let mut p = origin + direction * reach;
                p.x += jitter.centered(0.5) * spread;
                p.y += jitter.centered(0.5) * spread;
                p
            }

            Formation::RelaxedOrbit { center } => {
                let angle  = share * TAU + phase(t, 0.5);
                let radius = 6.0 + (phase(t, 1.0) + fi * 0.1).sin() * 2.0;
                center + Vec3::new(
                    angle.cos() * radius,
                    angle.sin() * radius,
                    (phase(t, 1.0) + fi).cos() * 3.0,
                )
            }
        }
    }
}

/// `t × rate` reduced to one turn in f64 before it meets f32 trig.
fn phase(t: f64, rate: f64) -> f32 {
    (t * rate).rem_euclid(std::f64::consts::TAU) as f32
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the key light should sit for this frame, if a hand steers it.
pub fn key_light_for(hands: &HandFrame) -> Option<Vec3> {
    hands.primary().map(|h| {
        let mut p = hand_to_world(h.palm_center, LIGHT_WORLD_SCALE);
        p.z = LIGHT_DEPTH;
        p
    })
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jitter::SeededJitter;
    use hand_gesture::HandDescriptor;

    fn hand(gesture: GestureType, x: f32, y: f32) -> HandDescriptor {
        HandDescriptor {
            gesture,
            palm_center: Vec3::new(x, y, -0.05),
            direction:   Vec3::new(0.0, 0.3, 0.0),
        }
    }

    fn frame(hands: &[HandDescriptor]) -> HandFrame {
        HandFrame::new(hands.to_vec())
    }

    #[test]
    fn view_center_maps_to_origin() {
        assert_eq!(hand_to_world(Vec3::new(0.5, 0.5, 0.3), HAND_WORLD_SCALE), Vec3::ZERO);
    }

    #[test]
    fn image_top_left_maps_to_world_upper_left() {
        let w = hand_to_world(Vec3::new(0.0, 0.0, 0.0), HAND_WORLD_SCALE);
        assert_eq!(w, Vec3::new(-20.0, 15.0, 0.0));
    }

    #[test]
    fn select_covers_the_table() {
        let fist = hand(GestureType::Fist, 0.5, 0.5);
        let palm = hand(GestureType::OpenPalm, 0.5, 0.5);
        let point = hand(GestureType::Pointing, 0.5, 0.5);
        let idle = hand(GestureType::Idle, 0.5, 0.5);

        assert_eq!(Formation::select(&HandFrame::empty()), Formation::IdleOrbit);
        assert!(matches!(Formation::select(&frame(&[fist, fist])),  Formation::MegaConvergence { .. }));
        assert!(matches!(Formation::select(&frame(&[fist])),        Formation::ForwardBeam { .. }));
        assert!(matches!(Formation::select(&frame(&[fist, palm])),  Formation::ForwardBeam { .. }));
        assert!(matches!(Formation::select(&frame(&[palm, fist])),  Formation::DefensiveCircle { .. }));
        assert!(matches!(Formation::select(&frame(&[point])),       Formation::FocusedBeam { .. }));
        assert!(matches!(Formation::select(&frame(&[idle, point])), Formation::RelaxedOrbit { .. }));
    }

    #[test]
    fn focused_beam_direction_is_normalized() {
        let f = Formation::select(&frame(&[hand(GestureType::Pointing, 0.5, 0.5)]));
        match f {
            Formation::FocusedBeam { direction, .. } => assert!((direction - Vec3::Y).length() < 1e-6),
            other => panic!("unexpected {other}"),
        }
    }

    #[test]
    fn zero_pointing_direction_keeps_beam_on_hand() {
        let f = Formation::FocusedBeam { origin: Vec3::ONE, direction: Vec3::ZERO };
        let mut j = SeededJitter::new(3);
        // i % 10 == 0 → no spread either.
        assert_eq!(f.target(10, 300, 1.0, &mut j), Vec3::ONE);
    }

    #[test]
    fn forward_beam_noise_stays_exact_days_into_a_session() {
        let t = 2.0 * 24.0 * 3600.0;
        let f = Formation::ForwardBeam { origin: Vec3::ZERO };
        let mut j = SeededJitter::new(0);
        for k in 0..4 {
            let tk = t + k as f64 * 0.016;
            for i in [0, 7, 123] {
                let expected = ((tk * 15.0 + i as f64).sin() * 0.8) as f32;
                let p = f.target(i, 300, tk, &mut j);
                assert!((p.x - expected).abs() < 1e-3, "frame {k} sword {i}");
            }
        }
    }

    #[test]
    fn idle_orbit_at_time_zero() {
        let mut j = SeededJitter::new(0);
        let p = Formation::IdleOrbit.target(0, 300, 0.0, &mut j);
        assert!((p - Vec3::new(12.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn defensive_circle_radius_is_ten_in_plane() {
        let center = Vec3::new(3.0, -2.0, 0.0);
        let f = Formation::DefensiveCircle { center };
        let mut j = SeededJitter::new(0);
        for i in 0..300 {
            let p = f.target(i, 300, 2.7, &mut j);
            let planar = (p - center).truncate().length();
            assert!((planar - DEFENSIVE_RADIUS).abs() < 1e-4);
            assert!((p.z - center.z).abs() <= 2.0 + 1e-5);
        }
    }

    #[test]
    fn relaxed_orbit_is_tighter_than_idle_orbit() {
        let mut j = SeededJitter::new(0);
        let f = Formation::RelaxedOrbit { center: Vec3::ZERO };
        for i in 0..300 {
            let p = f.target(i, 300, 4.2, &mut j);
            let r = p.truncate().length();
            assert!((4.0 - 1e-4..=8.0 + 1e-4).contains(&r), "i={i} r={r}");
        }
    }

    #[test]
    fn focused_beam_reaches_further_with_index() {
        let f = Formation::FocusedBeam { origin: Vec3::ZERO, direction: Vec3::Z };
        let mut j = SeededJitter::new(5);
        let near = f.target(0, 300, 0.0, &mut j);
        let far = f.target(290, 300, 0.0, &mut j);
        assert!((near.z - 5.0).abs() < 1e-5);
        assert!(far.z > 28.0);
    }

    #[test]
    fn key_light_follows_primary_only_when_present() {
        assert_eq!(key_light_for(&HandFrame::empty()), None);
        let lit = key_light_for(&frame(&[hand(GestureType::Idle, 1.0, 1.0)])).unwrap();
        assert_eq!(lit, Vec3::new(17.5, -12.5, LIGHT_DEPTH));
    }
}
