// Drag-to-orbit with damping, plus the idle auto-rotation.

use crate::camera::{auto_rotate_step, Camera};
use crate::constants::{DRAG_CLICK_SLOP_PX, ORBIT_DAMPING};
use glam::Vec2;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub start: Vec2,
    pub last: Vec2,
    /// Set once the pointer has travelled past the click slop.
    pub dragged: bool,
}

/// How a press ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// No press was in progress.
    None,
    /// The pointer barely moved: treat it as a click on the scene.
    Click,
    Drag,
}

#[derive(Clone, Debug, Default)]
pub struct OrbitControls {
    drag: DragState,
    /// Rotation still to be applied: x is the orbit angle, y the tilt.
    pending: Vec2,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn pending(&self) -> Vec2 {
        self.pending
    }

    pub fn press(&mut self, pos: Vec2) {
        self.drag = DragState {
            active: true,
            start: pos,
            last: pos,
            dragged: false,
        };
    }

    /// Pointer moved to `pos` (CSS px). A full element height of travel turns
    /// the cake once around.
    pub fn drag_to(&mut self, pos: Vec2, element_height: f32) {
        if !self.drag.active || element_height <= 0.0 {
            return;
        }
        if pos.distance(self.drag.start) > DRAG_CLICK_SLOP_PX {
            self.drag.dragged = true;
        }
        let delta = pos - self.drag.last;
        self.drag.last = pos;
        if self.drag.dragged {
            // Dragging right swings the eye left; dragging down raises it.
            self.pending += Vec2::new(-delta.x, -delta.y) * TAU / element_height;
        }
    }

    pub fn release(&mut self, pos: Vec2, element_height: f32) -> Release {
        if !self.drag.active {
            return Release::None;
        }
        self.drag_to(pos, element_height);
        let dragged = self.drag.dragged;
        self.drag.active = false;
        if dragged {
            Release::Drag
        } else {
            Release::Click
        }
    }

    /// Apply one frame of rotation. `frames` is the elapsed time in 60 Hz
    /// frames; damping eases out whatever drag rotation is pending.
    pub fn update(&mut self, camera: &mut Camera, frames: f32) {
        let share = 1.0 - (1.0 - ORBIT_DAMPING).powf(frames.max(0.0));
        let step = self.pending * share;
        self.pending -= step;
        camera.orbit(auto_rotate_step() * frames + step.x);
        if step.y != 0.0 {
            camera.tilt(step.y);
        }
    }
}
