//! Spring-damper step.
//!
//! Semi-implicit Euler toward a target, per frame (no `dt`):
//!
//! ```text
//! v ← (v + (target − x)·k)·d
//! x ← x + v
//! ```
//!
//! With k = 0.06, d = 0.85 the step is underdamped: error decays by about
//! 8% per frame with a single overshoot of roughly a third of the initial
//! offset.

use glam::Vec3;

use crate::config::{DAMPING, SPRING};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringDamper {
    pub spring:  f32,
    pub damping: f32,
}

impl Default for SpringDamper {
    fn default() -> Self {
        SpringDamper { spring: SPRING, damping: DAMPING }
    }
}

impl SpringDamper {
    pub fn new(spring: f32, damping: f32) -> Self {
        SpringDamper { spring, damping }
    }

    #[inline]
    pub fn step(&self, position: &mut Vec3, velocity: &mut Vec3, target: Vec3) {
        let force = (target - *position) * self.spring;
        *velocity = (*velocity + force) * self.damping;
        *position += *velocity;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_step_matches_formula() {
        let sd = SpringDamper::default();
        let mut x = Vec3::new(1.0, 2.0, 3.0);
        let mut v = Vec3::new(0.5, 0.0, -0.5);
        let target = Vec3::new(11.0, 2.0, 3.0);
        sd.step(&mut x, &mut v, target);

        let expect_v = (Vec3::new(0.5, 0.0, -0.5) + Vec3::new(10.0, 0.0, 0.0) * 0.06) * 0.85;
        assert!((v - expect_v).length() < 1e-6);
        assert!((x - (Vec3::new(1.0, 2.0, 3.0) + expect_v)).length() < 1e-6);
    }

    #[test]
    fn at_rest_on_target_stays_put() {
        let sd = SpringDamper::default();
        let mut x = Vec3::new(4.0, -2.0, 1.0);
        let mut v = Vec3::ZERO;
        for _ in 0..50 {
            sd.step(&mut x, &mut v, Vec3::new(4.0, -2.0, 1.0));
        }
        assert_eq!(v, Vec3::ZERO);
        assert_eq!(x, Vec3::new(4.0, -2.0, 1.0));
    }

    #[test]
    fn contracts_toward_stationary_target() {
        let sd = SpringDamper::default();
        let target = Vec3::new(10.0, -6.0, 3.0);
        let mut x = Vec3::ZERO;
        let mut v = Vec3::ZERO;
        let initial = (target - x).length();

        let mut errors = Vec::new();
        for _ in 0..300 {
            sd.step(&mut x, &mut v, target);
            errors.push((target - x).length());
        }

        // Never further away than where it started.
        assert!(errors.iter().all(|&e| e < initial));

        // Successive local peaks of the error shrink (above f32 noise).
        let peaks: Vec<f32> = errors
            .windows(3)
            .filter(|w| w[1] > 1e-3 && w[1] > w[0] && w[1] >= w[2])
            .map(|w| w[1])
            .collect();
        assert!(!peaks.is_empty());
        assert!(peaks.windows(2).all(|p| p[1] < p[0]), "{peaks:?}");

        assert!(errors.last().copied().unwrap_or(f32::MAX) < 1e-3);
    }

    #[test]
    fn first_frames_close_monotonically_until_overshoot() {
        let sd = SpringDamper::default();
        let mut x = Vec3::ZERO;
        let mut v = Vec3::ZERO;
        let target = Vec3::X * 10.0;
        let mut prev = 10.0_f32;
        for _ in 0..7 {
            sd.step(&mut x, &mut v, target);
            let e = target.x - x.x;
            assert!(e < prev && e > 0.0);
            prev = e;
        }
    }
}
