//! Fixed perspective camera looking down −Z from z = 15.

use glam::{Mat4, Vec3};

pub const CAMERA_Z:    f32 = 15.0;
pub const FOV_Y_DEG:   f32 = 75.0;
const NEAR:            f32 = 0.1;
const FAR:             f32 = 1000.0;

/// A projected point: pixel coordinates plus view distance along the
/// camera axis (used for depth testing and fog).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x:     f32,
    pub y:     f32,
    pub depth: f32,
}

impl ScreenPoint {
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.depth)
    }
}

#[derive(Clone, Debug)]
pub struct Camera {
    view_proj: Mat4,
    width:     f32,
    height:    f32,
}

impl Camera {
    pub fn new(width: usize, height: usize) -> Self {
        let aspect = width as f32 / height.max(1) as f32;
        let proj = Mat4::perspective_rh(FOV_Y_DEG.to_radians(), aspect, NEAR, FAR);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, CAMERA_Z), Vec3::ZERO, Vec3::Y);
        Camera {
            view_proj: proj * view,
            width:     width as f32,
            height:    height as f32,
        }
    }

    /// Project a world point.  `None` when it is behind the near plane.
    pub fn project(&self, world: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_proj * world.extend(1.0);
        if clip.w <= NEAR {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(ScreenPoint {
            x:     (ndc.x + 1.0) * 0.5 * self.width,
            y:     (1.0 - ndc.y) * 0.5 * self.height,
            depth: clip.w,
        })
    }
}
