use crate::constants::*;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CandleState {
    Lit,
    /// Terminal; there is no way back to `Lit`.
    Extinguished,
}

/// What the renderer needs to draw one flame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlameVisual {
    pub scale: Vec3,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct Candle {
    index: usize,
    anchor: Vec3,
    flame_height: f32,
    state: CandleState,
    current_scale: f32,
    flicker_offset: f32,
    flame: FlameVisual,
    light_intensity: f32,
}

impl Candle {
    pub fn new(index: usize, anchor: Vec3, flame_height: f32, flicker_offset: f32) -> Self {
        Self {
            index,
            anchor,
            flame_height,
            state: CandleState::Lit,
            current_scale: 1.0,
            flicker_offset,
            flame: FlameVisual {
                scale: Vec3::ONE,
                visible: true,
            },
            light_intensity: 1.0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_out(&self) -> bool {
        self.state == CandleState::Extinguished
    }

    pub fn current_scale(&self) -> f32 {
        self.current_scale
    }

    pub fn flicker_offset(&self) -> f32 {
        self.flicker_offset
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn flame_height(&self) -> f32 {
        self.flame_height
    }

    pub fn flame(&self) -> FlameVisual {
        self.flame
    }

    pub fn light_intensity(&self) -> f32 {
        self.light_intensity
    }

    /// Centre and radius of the sphere used for pointer hit-testing.
    pub fn hit_sphere(&self) -> (Vec3, f32) {
        let half = self.flame_height * 0.5;
        let center = self.anchor + Vec3::Y * half * self.current_scale;
        (center, half * self.current_scale.max(PICK_MIN_SCALE))
    }

    /// Returns `true` only on the lit → extinguished transition.
    pub(crate) fn extinguish(&mut self) -> bool {
        if self.is_out() {
            return false;
        }
        self.state = CandleState::Extinguished;
        self.current_scale = 0.0;
        self.flame = FlameVisual {
            scale: Vec3::ZERO,
            visible: false,
        };
        self.light_intensity = 0.0;
        true
    }

    /// Shrink the flame by `sensitivity`. Returns `true` when the flame has
    /// dropped to `threshold` or below and must be put out.
    pub(crate) fn apply_blow_decay(&mut self, sensitivity: f32, threshold: f32) -> bool {
        if self.is_out() {
            return false;
        }
        self.current_scale = (self.current_scale - sensitivity).max(0.0);
        self.flame.scale = Vec3::splat(self.current_scale);
        self.current_scale <= threshold
    }

    /// Cosmetic pass: `jitter` in [0, 1) drives the light, `time` the stretch.
    pub(crate) fn flicker(&mut self, time: f32, jitter: f32) {
        if self.is_out() {
            return;
        }
        self.light_intensity = FLICKER_INTENSITY_MIN + jitter * FLICKER_INTENSITY_SPAN;
        let stretch = 1.0 + (time * FLICKER_FREQUENCY + self.flicker_offset).sin() * FLICKER_STRETCH;
        self.flame.scale = Vec3::new(
            self.current_scale,
            self.current_scale * stretch,
            self.current_scale,
        );
    }
}
