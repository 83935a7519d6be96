//! Window, input polling and frame presentation using `minifb`.
//!
//! The drawing itself lives in [`scene`](crate::scene) and [`hud`](crate::hud)
//! so it can be exercised without opening a window.

use std::sync::mpsc::Sender;
use std::time::Duration;

use anyhow::{anyhow, Result};
use glam::Vec3;
use hand_gesture::GestureType;
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};
use sword_swarm::SwordPose;

use crate::hud::{draw_hud, HudView};
use crate::scene::{Renderer, Starfield};
use crate::source::SimInput;

/// Roll per frame while an arrow key is held.
const ROLL_STEP: f32 = 0.05;

pub const SIM_LEGEND: &str =
    "1=IDLE  2=PALM  3=FIST  4=POINT  B=SECOND FIST  H=HIDE  ARROWS=ROLL  MOUSE=MOVE  Q=QUIT";

pub struct Visualizer {
    window:       Window,
    renderer:     Renderer,
    /// Present only when the keyboard simulator is the hand source.
    sim_tx:       Option<Sender<SimInput>>,
    last_pointer: Option<(f32, f32)>,
}

impl Visualizer {
    pub fn new(
        width: usize,
        height: usize,
        stars: Starfield,
        sim_tx: Option<Sender<SimInput>>,
    ) -> Result<Self> {
        let mut window = Window::new(
            "Sword Swarm — Hand Gesture Controller",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| anyhow!("opening window: {e}"))?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            renderer: Renderer::new(width, height, stars),
            sim_tx,
            last_pointer: None,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn is_simulating(&self) -> bool { self.sim_tx.is_some() }

    /// Poll keyboard and mouse.  Returns false when the user asked to quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        if one_shot(Key::Q) || one_shot(Key::Escape) {
            self.send(SimInput::Quit);
            return false;
        }

        if self.sim_tx.is_none() { return true; }

        let mut inputs = Vec::new();
        for (key, gesture) in [
            (Key::Key1, GestureType::Idle),
            (Key::Key2, GestureType::OpenPalm),
            (Key::Key3, GestureType::Fist),
            (Key::Key4, GestureType::Pointing),
        ] {
            if one_shot(key) {
                inputs.push(SimInput::Pose(gesture));
            }
        }
        if one_shot(Key::B) { inputs.push(SimInput::ToggleSecondFist); }
        if one_shot(Key::H) { inputs.push(SimInput::ToggleHidden); }

        // Roll repeats while held.
        if self.window.is_key_down(Key::Left)  { inputs.push(SimInput::Roll(-ROLL_STEP)); }
        if self.window.is_key_down(Key::Right) { inputs.push(SimInput::Roll(ROLL_STEP)); }

        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let (w, h) = (self.renderer.canvas().width(), self.renderer.canvas().height());
            let p = (mx / w as f32, my / h as f32);
            if self.last_pointer != Some(p) {
                self.last_pointer = Some(p);
                inputs.push(SimInput::Pointer { x: p.0, y: p.1 });
            }
        }

        for input in inputs {
            self.send(input);
        }
        true
    }

    fn send(&self, input: SimInput) {
        if let Some(tx) = &self.sim_tx {
            let _ = tx.send(input);
        }
    }

    /// Render one frame.
    pub fn render(&mut self, poses: &[SwordPose], key_light: Vec3, hud: &HudView) {
        self.renderer.draw_scene(poses, key_light);
        draw_hud(self.renderer.canvas_mut(), hud);

        let canvas = self.renderer.canvas();
        self.window
            .update_with_buffer(canvas.pixels(), canvas.width(), canvas.height())
            .ok();
    }
}
