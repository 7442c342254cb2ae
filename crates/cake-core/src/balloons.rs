use crate::constants::*;
use glam::Vec3;
use rand::Rng;

/// Visible extent of the balloon overlay at the z = 0 plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalloonViewport {
    pub visible_width: f32,
    pub visible_height: f32,
}

impl BalloonViewport {
    /// Extent seen by a camera `camera_z` units back with vertical FOV `fovy_radians`.
    pub fn from_camera(fovy_radians: f32, camera_z: f32, aspect: f32) -> Self {
        let visible_height = 2.0 * (fovy_radians / 2.0).tan() * camera_z;
        Self {
            visible_width: visible_height * aspect,
            visible_height,
        }
    }

    pub fn for_aspect(aspect: f32) -> Self {
        Self::from_camera(CAMERA_FOV_DEG.to_radians(), BALLOON_CAMERA_Z, aspect)
    }
}

#[derive(Clone, Debug)]
pub struct BalloonParticle {
    pub position: Vec3,
    /// Units per frame, fixed at spawn.
    pub speed: f32,
    pub sway_offset: f32,
    pub scale: f32,
    pub spin: f32,
    pub tilt: f32,
}

#[derive(Debug)]
pub struct BalloonSystem {
    particles: Vec<BalloonParticle>,
    exit_y: f32,
    spawned: u64,
}

impl BalloonSystem {
    pub fn new(exit_y: f32) -> Self {
        Self {
            particles: Vec::new(),
            exit_y,
            spawned: 0,
        }
    }

    pub fn particles(&self) -> &[BalloonParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Total balloons ever spawned.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    /// Launch one balloon just below the bottom edge at a random x.
    pub fn spawn<R: Rng>(&mut self, rng: &mut R, view: BalloonViewport) {
        let x = (rng.gen::<f32>() - 0.5) * view.visible_width;
        let y = -view.visible_height / 2.0 - BALLOON_SPAWN_DEPTH;
        let z = (rng.gen::<f32>() - 0.5) * 2.0;
        let scale = BALLOON_SCALE_MIN + rng.gen::<f32>() * BALLOON_SCALE_SPAN;
        let speed = BALLOON_SPEED_MIN + rng.gen::<f32>() * BALLOON_SPEED_SPAN;
        let sway_offset = rng.gen::<f32>() * RANDOM_PHASE_MAX;
        self.particles.push(BalloonParticle {
            position: Vec3::new(x, y, z),
            speed,
            sway_offset,
            scale,
            spin: 0.0,
            tilt: 0.0,
        });
        self.spawned += 1;
    }

    /// One frame of motion: rise, sway, spin. Balloons past the exit height
    /// are dropped in the same pass; `retain_mut` visits each one exactly once.
    pub fn update(&mut self, time: f32) {
        let exit_y = self.exit_y;
        self.particles.retain_mut(|b| {
            b.position.y += b.speed;
            b.position.x += (time + b.sway_offset).sin() * BALLOON_SWAY_STEP;
            b.spin += BALLOON_SPIN_STEP;
            b.tilt = (time * 2.0 + b.sway_offset).sin() * BALLOON_TILT;
            b.position.y <= exit_y
        });
    }
}
