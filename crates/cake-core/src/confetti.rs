// Screen-space confetti in CSS pixels, y down.

use crate::constants::*;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ConfettiBurst {
    /// Launch point relative to the viewport, 0..1 on both axes.
    pub origin: Vec2,
    /// Degrees counter-clockwise from the positive x axis.
    pub angle_deg: f32,
    pub spread_deg: f32,
    pub count: usize,
}

impl ConfettiBurst {
    pub fn left_edge() -> Self {
        Self {
            origin: Vec2::new(0.0, 0.5),
            angle_deg: CONFETTI_LEFT_ANGLE_DEG,
            spread_deg: CONFETTI_SPREAD_DEG,
            count: CONFETTI_PER_BURST,
        }
    }

    pub fn right_edge() -> Self {
        Self {
            origin: Vec2::new(1.0, 0.5),
            angle_deg: CONFETTI_RIGHT_ANGLE_DEG,
            spread_deg: CONFETTI_SPREAD_DEG,
            count: CONFETTI_PER_BURST,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConfettiPiece {
    pub position: Vec2,
    pub color: &'static str,
    heading: f32,
    velocity: f32,
    wobble: f32,
    wobble_speed: f32,
    tilt_angle: f32,
    tick: u32,
}

impl ConfettiPiece {
    /// Fraction of the piece's life already spent, 0..1.
    pub fn progress(&self) -> f32 {
        self.tick as f32 / CONFETTI_TICKS as f32
    }

    pub fn opacity(&self) -> f32 {
        1.0 - self.progress()
    }

    /// Offset of the fluttering corner used to draw the piece as a quad.
    pub fn wobble_offset(&self) -> Vec2 {
        Vec2::new(self.wobble.cos(), self.wobble.sin()) * 10.0
    }

    pub fn tilt(&self) -> f32 {
        self.tilt_angle
    }
}

#[derive(Debug, Default)]
pub struct ConfettiSystem {
    pieces: Vec<ConfettiPiece>,
}

impl ConfettiSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pieces(&self) -> &[ConfettiPiece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn emit<R: Rng>(&mut self, rng: &mut R, burst: ConfettiBurst, viewport: Viewport) {
        let start = Vec2::new(
            burst.origin.x * viewport.width,
            burst.origin.y * viewport.height,
        );
        let spread = burst.spread_deg.to_radians();
        for _ in 0..burst.count {
            let heading = -burst.angle_deg.to_radians() + (0.5 * spread - rng.gen::<f32>() * spread);
            let velocity =
                CONFETTI_START_VELOCITY * 0.5 + rng.gen::<f32>() * CONFETTI_START_VELOCITY;
            let color = CONFETTI_COLORS[rng.gen_range(0..CONFETTI_COLORS.len())];
            self.pieces.push(ConfettiPiece {
                position: start,
                color,
                heading,
                velocity,
                wobble: rng.gen::<f32>() * 10.0,
                wobble_speed: (rng.gen::<f32>() * 0.1 + 0.05).min(0.11),
                tilt_angle: (rng.gen::<f32>() * 0.5 + 0.25) * std::f32::consts::PI,
                tick: 0,
            });
        }
    }

    /// Advance every piece by one frame and drop the ones that have expired.
    pub fn update(&mut self) {
        self.pieces.retain_mut(|p| {
            p.position.x += p.heading.cos() * p.velocity;
            p.position.y += p.heading.sin() * p.velocity + CONFETTI_GRAVITY;
            p.velocity *= CONFETTI_DECAY;
            p.wobble += p.wobble_speed;
            p.tilt_angle += 0.1;
            p.tick += 1;
            p.tick < CONFETTI_TICKS
        });
    }
}
