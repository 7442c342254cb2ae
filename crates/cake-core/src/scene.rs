use crate::constants::{CANDLE_HEIGHT_RATIO, FLAME_ANCHOR_RATIO, FLAME_HEIGHT_RATIO};
use glam::Vec3;

/// Placement geometry exposed by whatever loads and positions the cake.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    /// Height of the candle bases (the cake's top surface).
    pub base_height: f32,
    /// Radius of the circle the candles stand on.
    pub radius: f32,
    /// Longest dimension of the scaled cake; all other sizes derive from it.
    pub reference_size: f32,
}

impl SceneLayout {
    pub fn candle_height(&self) -> f32 {
        self.reference_size * CANDLE_HEIGHT_RATIO
    }

    pub fn flame_height(&self) -> f32 {
        self.reference_size * FLAME_HEIGHT_RATIO
    }

    /// Base of candle `index` out of `count`, evenly spaced on the circle.
    pub fn candle_base(&self, index: usize, count: usize) -> Vec3 {
        let angle = index as f32 * std::f32::consts::TAU / count.max(1) as f32;
        Vec3::new(
            angle.cos() * self.radius,
            self.base_height,
            angle.sin() * self.radius,
        )
    }

    /// Where the flame of candle `index` is anchored.
    pub fn flame_anchor(&self, index: usize, count: usize) -> Vec3 {
        self.candle_base(index, count) + Vec3::Y * self.candle_height() * FLAME_ANCHOR_RATIO
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        // A 50-unit cake with candles on a ring a quarter of its width out.
        Self {
            base_height: 8.0,
            radius: 12.5,
            reference_size: 50.0,
        }
    }
}
