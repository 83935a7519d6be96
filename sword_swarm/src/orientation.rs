//! Sword orientation from velocity.
//!
//! The sword mesh is modelled blade-up (+Y).  A sword is turned so its local
//! +Z looks along its velocity with world +Y as up, then tipped 90° about its
//! own X axis, which carries the blade from +Y onto the look direction.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat3, Mat4, Quat, Vec3};

/// Below this speed a sword stops following its velocity and stands upright.
pub const MIN_HEADING_SPEED: f32 = 0.05;

/// Rotation whose local +Z points along `forward`.
///
/// When `forward` is parallel to `up` the basis is nudged off the pole
/// instead of collapsing, so a stationary, upright sword still gets a
/// well-defined rotation.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let mut z = forward.normalize_or_zero();
    if z == Vec3::ZERO {
        z = Vec3::Z;
    }

    let mut x = up.cross(z);
    if x.length_squared() == 0.0 {
        if up.z.abs() == 1.0 {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);

    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Orientation for a sword moving at `velocity`.
pub fn sword_orientation(velocity: Vec3) -> Quat {
    let heading = if velocity.length() > MIN_HEADING_SPEED { velocity } else { Vec3::Y };
    look_rotation(heading, Vec3::Y) * Quat::from_rotation_x(FRAC_PI_2)
}

/// 4x4 instance transform (rotation then translation, unit scale).
pub fn instance_transform(position: Vec3, orientation: Quat) -> Mat4 {
    Mat4::from_rotation_translation(orientation, position)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
