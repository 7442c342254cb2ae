// Camera shared by the renderer and pointer picking. No platform types.

use crate::constants::{AUTO_ROTATE_SPEED, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, POLAR_MARGIN};
use crate::interaction::Ray;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera framing a scene of `reference_size` world units, slightly above
    /// and in front of the origin.
    pub fn framing(reference_size: f32, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, reference_size * 0.5, reference_size),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to normalized device coordinates. `z` of the
    /// result is the NDC depth; `None` when the point is behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// World-space ray through a point given in NDC (x right, y up, both -1..1).
    pub fn ray_through(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, far - self.eye)
    }

    /// Rotate the eye around the target's vertical axis.
    pub fn orbit(&mut self, angle_radians: f32) {
        let offset = self.eye - self.target;
        self.eye = self.target + Quat::from_rotation_y(angle_radians) * offset;
    }

    /// Change the eye's polar angle (measured down from +y) by `delta_radians`,
    /// staying clear of the poles. Distance to the target is preserved.
    pub fn tilt(&mut self, delta_radians: f32) {
        let offset = self.eye - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        let phi = (phi + delta_radians).clamp(POLAR_MARGIN, std::f32::consts::PI - POLAR_MARGIN);
        self.eye = self.target
            + Vec3::new(
                radius * phi.sin() * theta.sin(),
                radius * phi.cos(),
                radius * phi.sin() * theta.cos(),
            );
    }
}

/// Per-frame orbit angle matching an auto-rotate speed of
/// `AUTO_ROTATE_SPEED` at 60 frames per second.
#[inline]
pub fn auto_rotate_step() -> f32 {
    std::f32::consts::TAU / 60.0 / 60.0 * AUTO_ROTATE_SPEED
}
