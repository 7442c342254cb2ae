use super::helpers::{project, rgba};
use cake_core::{BalloonParticle, Camera, ConfettiPiece, BALLOON_CAMERA_Z};
use glam::Vec3;
use web_sys as web;

const BALLOON_RADIUS: f32 = 0.3; // world units at scale 1
const STRING_LENGTH: f32 = 0.6;
const BALLOON_BODY: [u8; 3] = [244, 114, 182];
const BALLOON_SHINE: [u8; 3] = [255, 255, 255];
const STRING: [u8; 3] = [148, 163, 184];

/// Full-page overlay for balloons and confetti. Confetti positions are CSS
/// pixels, so the context is scaled by the device pixel ratio while drawing.
pub struct OverlayRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl OverlayRenderer {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    /// Camera the balloons are seen through: fixed, looking down -z.
    pub fn balloon_camera(aspect: f32) -> Camera {
        let mut camera = Camera::framing(1.0, aspect);
        camera.eye = Vec3::new(0.0, 0.0, BALLOON_CAMERA_Z);
        camera.target = Vec3::ZERO;
        camera
    }

    pub fn draw(&self, balloons: &[BalloonParticle], confetti: &[ConfettiPiece], dpr: f64) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
        if balloons.is_empty() && confetti.is_empty() {
            return;
        }
        let camera = Self::balloon_camera(w as f32 / h.max(1.0) as f32);

        // Far balloons first.
        let mut order: Vec<&BalloonParticle> = balloons.iter().collect();
        order.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));
        for b in order {
            self.draw_balloon(&camera, b, w as f32, h as f32);
        }

        self.ctx.save();
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        for piece in confetti {
            self.draw_confetti(piece);
        }
        self.ctx.restore();
    }

    fn draw_balloon(&self, camera: &Camera, b: &BalloonParticle, w: f32, h: f32) {
        let Some(p) = project(camera, b.position, w, h) else {
            return;
        };
        let r = (BALLOON_RADIUS * b.scale * p.scale) as f64;
        // Spin reads as the body turning edge-on.
        let squash = 0.75 + 0.25 * b.spin.cos().abs() as f64;
        let (x, y) = (p.px.x as f64, p.px.y as f64);
        let ctx = &self.ctx;

        ctx.save();
        let _ = ctx.translate(x, y);
        let _ = ctx.rotate(-b.tilt as f64);

        ctx.set_stroke_style_str(&rgba(STRING, 0.9));
        ctx.set_line_width((r * 0.04).max(1.0));
        let knot = r * 1.15;
        let string = r * STRING_LENGTH as f64 * 4.0;
        ctx.begin_path();
        ctx.move_to(0.0, knot);
        ctx.quadratic_curve_to(r * 0.2, knot + string * 0.5, 0.0, knot + string);
        ctx.stroke();

        ctx.set_fill_style_str(&rgba(BALLOON_BODY, 0.95));
        ctx.begin_path();
        let _ = ctx.ellipse(0.0, 0.0, r * squash, r * 1.15, 0.0, 0.0, std::f64::consts::TAU);
        ctx.fill();

        ctx.begin_path();
        ctx.move_to(-r * 0.12, r * 1.25);
        ctx.line_to(r * 0.12, r * 1.25);
        ctx.line_to(0.0, r * 1.1);
        ctx.close_path();
        ctx.fill();

        ctx.set_fill_style_str(&rgba(BALLOON_SHINE, 0.35));
        ctx.begin_path();
        let _ = ctx.ellipse(-r * 0.35 * squash, -r * 0.45, r * 0.18, r * 0.3, -0.5, 0.0, std::f64::consts::TAU);
        ctx.fill();
        ctx.restore();
    }

    fn draw_confetti(&self, piece: &ConfettiPiece) {
        let ctx = &self.ctx;
        let wobble = piece.wobble_offset();
        let width = 6.0 + wobble.x.abs() as f64 * 0.4;
        let height = 3.0 + wobble.y.abs() as f64 * 0.4;
        ctx.save();
        ctx.set_global_alpha(piece.opacity() as f64);
        let _ = ctx.translate(piece.position.x as f64, piece.position.y as f64);
        let _ = ctx.rotate(piece.tilt() as f64);
        ctx.set_fill_style_str(piece.color);
        ctx.fill_rect(-width / 2.0, -height / 2.0, width, height);
        ctx.restore();
    }
}
