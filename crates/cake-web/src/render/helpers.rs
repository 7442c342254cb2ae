use cake_core::Camera;
use glam::{Vec2, Vec3};

/// A world point projected to canvas pixels, with its distance from the eye.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub px: Vec2,
    pub depth: f32,
    /// Canvas pixels per world unit at this depth.
    pub scale: f32,
}

#[inline]
pub fn ndc_to_px(ndc: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height)
}

/// Project `world` onto a `width` x `height` canvas. `None` behind the eye.
pub fn project(camera: &Camera, world: Vec3, width: f32, height: f32) -> Option<ScreenPoint> {
    let ndc = camera.project(world)?;
    let depth = camera.eye.distance(world).max(1e-3);
    let focal = height * 0.5 / (camera.fovy_radians * 0.5).tan();
    Some(ScreenPoint {
        px: ndc_to_px(ndc.truncate(), width, height),
        depth,
        scale: focal / depth,
    })
}

/// Indices into `depths` ordered far to near, for painter's-order drawing.
pub fn back_to_front(depths: &[f32]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..depths.len()).collect();
    order.sort_by(|&a, &b| depths[b].total_cmp(&depths[a]));
    order
}

#[inline]
pub fn rgba(rgb: [u8; 3], alpha: f32) -> String {
    format!(
        "rgba({},{},{},{:.3})",
        rgb[0],
        rgb[1],
        rgb[2],
        alpha.clamp(0.0, 1.0)
    )
}
