//! The 3D part of a frame: background, starfield and one flat jian per sword.
//!
//! Each triangle is lit by the ambient term plus the hand-following key light
//! (inverse-square with a soft range cutoff), mixed from the cyan glow toward
//! the white core, then fogged toward the background with exponential-squared
//! fog.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sword_swarm::SwordPose;

use crate::camera::Camera;
use crate::canvas::{blend, scale_color, Canvas};

// ════════════════════════════════════════════════════════════════════════════
// Look
// ════════════════════════════════════════════════════════════════════════════

pub const BG_TOP:      u32 = 0xFF000814;
pub const BG_BOTTOM:   u32 = 0xFF0A1A2F;
pub const SWORD_CORE:  u32 = 0xFFFFFFFF;
pub const SWORD_GLOW:  u32 = 0xFF00F0FF;
pub const STAR_COLOR:  u32 = 0xFF55AAFF;
const STAR_OPACITY:    f32 = 0.6;
pub const FOG_COLOR:   u32 = BG_TOP;
pub const FOG_DENSITY: f32 = 0.05;

const AMBIENT:             f32 = 0.4;
const KEY_LIGHT_INTENSITY: f32 = 20.0;
const KEY_LIGHT_RANGE:     f32 = 100.0;

pub const DEFAULT_STAR_COUNT: usize = 3000;
/// Stars fill a cube of this edge centered on the origin.
pub const STAR_FIELD: f32 = 150.0;

/// The procedural jian, blade up (+Y), flat in the XY plane: tip, two blade
/// halves, crossguard, hilt.
pub const JIAN: [[Vec3; 3]; 5] = [
    [Vec3::new( 0.0,  1.5, 0.0), Vec3::new(-0.1,  0.0, 0.0), Vec3::new( 0.1,  0.0, 0.0)],
    [Vec3::new(-0.1,  0.0, 0.0), Vec3::new( 0.1,  0.0, 0.0), Vec3::new(-0.1, -1.2, 0.0)],
    [Vec3::new( 0.1,  0.0, 0.0), Vec3::new( 0.1, -1.2, 0.0), Vec3::new(-0.1, -1.2, 0.0)],
    [Vec3::new(-0.2, -1.2, 0.0), Vec3::new( 0.2, -1.2, 0.0), Vec3::new( 0.0, -1.3, 0.0)],
    [Vec3::new( 0.0, -1.3, 0.0), Vec3::new(-0.05, -1.7, 0.0), Vec3::new(0.05, -1.7, 0.0)],
];

/// Fraction of fog color at view distance `d`.
pub fn fog_factor(d: f32) -> f32 {
    let k = FOG_DENSITY * d.max(0.0);
    (1.0 - (-k * k).exp()).clamp(0.0, 1.0)
}

/// Key light contribution at `point` for a surface with `normal`.
/// Double-sided: the sign of the normal does not matter.
pub fn key_light_at(point: Vec3, normal: Vec3, key_light: Vec3) -> f32 {
    let to_light = key_light - point;
    let d = to_light.length();
    if d >= KEY_LIGHT_RANGE || d < 1e-6 {
        return 0.0;
    }
    let cutoff = (1.0 - (d / KEY_LIGHT_RANGE).powi(4)).powi(2);
    let falloff = KEY_LIGHT_INTENSITY / (d * d).max(1.0) * cutoff;
    let lambert = normal.normalize_or_zero().dot(to_light / d).abs();
    falloff * lambert
}

/// Final color of a sword triangle.
pub fn sword_color(centroid: Vec3, normal: Vec3, key_light: Vec3, view_depth: f32) -> u32 {
    let light = AMBIENT + key_light_at(centroid, normal, key_light);
    let lit = blend(SWORD_GLOW, SWORD_CORE, (light - AMBIENT).clamp(0.0, 1.0));
    let lit = scale_color(lit, 0.6 + light.min(1.0) * 0.6);
    blend(lit, FOG_COLOR, fog_factor(view_depth))
}

// ════════════════════════════════════════════════════════════════════════════
// Starfield
// ════════════════════════════════════════════════════════════════════════════

pub struct Starfield {
    points: Vec<Vec3>,
}

impl Starfield {
    pub fn new(count: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None    => StdRng::from_entropy(),
        };
        let half = STAR_FIELD * 0.5;
        let points = (0..count)
            .map(|_| Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ))
            .collect();
        Starfield { points }
    }

    pub fn points(&self) -> &[Vec3] { &self.points }
}

// ════════════════════════════════════════════════════════════════════════════
// Renderer
// ════════════════════════════════════════════════════════════════════════════

/// Owns the canvas and everything static about the scene.
pub struct Renderer {
    canvas: Canvas,
    camera: Camera,
    stars:  Starfield,
}

impl Renderer {
    pub fn new(width: usize, height: usize, stars: Starfield) -> Self {
        Renderer {
            canvas: Canvas::new(width, height),
            camera: Camera::new(width, height),
            stars,
        }
    }

    pub fn canvas(&self)         -> &Canvas     { &self.canvas }
    pub fn canvas_mut(&mut self) -> &mut Canvas { &mut self.canvas }

    /// Background, stars, then every sword.
    pub fn draw_scene(&mut self, poses: &[SwordPose], key_light: Vec3) {
        self.canvas.clear_gradient(BG_TOP, BG_BOTTOM);
        self.draw_stars();
        for pose in poses {
            self.draw_sword(pose, key_light);
        }
    }

    fn draw_stars(&mut self) {
        for &p in self.stars.points() {
            let Some(s) = self.camera.project(p) else { continue };
            if s.x < 0.0 || s.y < 0.0 { continue; }
            let alpha = STAR_OPACITY * (1.0 - fog_factor(s.depth));
            self.canvas.blend_pixel(s.x as usize, s.y as usize, STAR_COLOR, alpha);
        }
    }

    fn draw_sword(&mut self, pose: &SwordPose, key_light: Vec3) {
        let m = pose.transform();
        let normal = m.transform_vector3(Vec3::Z);

        for tri in &JIAN {
            let world = tri.map(|v| m.transform_point3(v));
            let (Some(a), Some(b), Some(c)) = (
                self.camera.project(world[0]),
                self.camera.project(world[1]),
                self.camera.project(world[2]),
            ) else { continue };

            let centroid = (world[0] + world[1] + world[2]) / 3.0;
            let depth = (a.depth + b.depth + c.depth) / 3.0;
            let color = sword_color(centroid, normal, key_light, depth);
            self.canvas.fill_triangle([a.to_vec3(), b.to_vec3(), c.to_vec3()], color);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
