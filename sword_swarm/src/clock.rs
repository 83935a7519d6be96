//! Logical frame clock.
//!
//! Time advances by a fixed nominal step per rendered frame rather than by
//! measured wall time, so orbit speeds and beam noise are tied to the frame
//! count.  A slow machine sees the swarm move slower, never jump.

use crate::config::FRAME_STEP;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameClock {
    step:   f32,
    frames: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::new(FRAME_STEP)
    }
}

impl FrameClock {
    pub fn new(step: f32) -> Self {
        FrameClock { step, frames: 0 }
    }

    /// Advance one frame and return the new logical time.
    pub fn tick(&mut self) -> f64 {
        self.frames += 1;
        self.elapsed()
    }

    /// Frame count times step, in f64.  Stays exact to well under a step
    /// for any session length; an f32 sum stops resolving one step after
    /// about a day and a half.
    pub fn elapsed(&self) -> f64 { self.frames as f64 * self.step as f64 }
    pub fn frames(&self)  -> u64 { self.frames }
    pub fn step(&self)    -> f32 { self.step }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_one_step() {
        let mut c = FrameClock::default();
        assert_eq!(c.tick(), FRAME_STEP as f64);
        assert_eq!(c.frames(), 1);
    }

    #[test]
    fn sixty_ticks_is_about_a_second() {
        let mut c = FrameClock::default();
        for _ in 0..60 { c.tick(); }
        assert!((c.elapsed() - 0.96).abs() < 1e-4);
    }

    #[test]
    fn long_sessions_keep_whole_steps() {
        // Two days of frames, then one more tick.
        let frames: u64 = 2 * 24 * 3600 * 60;
        let mut c = FrameClock::default();
        for _ in 0..frames { c.tick(); }
        let before = c.elapsed();
        let after = c.tick();
        assert!((after - before - FRAME_STEP as f64).abs() < 1e-6);
    }
}
