use super::helpers::{back_to_front, project, rgba, ScreenPoint};
use cake_core::{Camera, Candle, SceneLayout, Session};
use glam::Vec3;
use web_sys as web;

const RIM_SEGMENTS: usize = 48;
const CAKE_RADIUS_RATIO: f32 = 1.6; // of the candle ring radius
const CAKE_DEPTH_RATIO: f32 = 0.3; // of the reference size
const PLATE_MARGIN: f32 = 1.15;
const CANDLE_WIDTH_RATIO: f32 = 0.025; // of the reference size
const FLAME_WIDTH_RATIO: f32 = 0.36; // of the flame height
const GLOW_BLUR_PX: f64 = 18.0;

const PLATE: [u8; 3] = [226, 232, 240];
const SPONGE: [u8; 3] = [244, 114, 182];
const SPONGE_SHADE: [u8; 3] = [190, 24, 93];
const FROSTING: [u8; 3] = [253, 242, 248];
const WAX: [u8; 3] = [165, 180, 252];
const WICK: [u8; 3] = [68, 45, 30];
const FLAME_OUTER: [u8; 3] = [255, 170, 51];
const FLAME_CORE: [u8; 3] = [255, 244, 214];

fn mix(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    [lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2])]
}

/// Draws the procedural cake, its candles and their flames.
pub struct CakeRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CakeRenderer {
    pub fn new(canvas: web::HtmlCanvasElement, ctx: web::CanvasRenderingContext2d) -> Self {
        Self { canvas, ctx }
    }

    pub fn aspect(&self) -> f32 {
        self.canvas.width() as f32 / self.canvas.height().max(1) as f32
    }

    pub fn draw(&self, camera: &Camera, session: &Session) {
        let w = self.canvas.width() as f32;
        let h = self.canvas.height() as f32;
        self.ctx.clear_rect(0.0, 0.0, w as f64, h as f64);

        let layout = session.layout();
        self.draw_cake(camera, layout, w, h);

        let candles = session.candles();
        let depths: Vec<f32> = candles
            .iter()
            .map(|c| camera.eye.distance(c.anchor()))
            .collect();
        for i in back_to_front(&depths) {
            let base = layout.candle_base(i, candles.len());
            self.draw_candle(camera, base, &candles[i], layout, w, h);
        }
    }

    fn ring(&self, camera: &Camera, y: f32, radius: f32, w: f32, h: f32) -> Option<Vec<ScreenPoint>> {
        (0..RIM_SEGMENTS)
            .map(|i| {
                let a = i as f32 * std::f32::consts::TAU / RIM_SEGMENTS as f32;
                project(camera, Vec3::new(a.cos() * radius, y, a.sin() * radius), w, h)
            })
            .collect()
    }

    fn fill_polygon(&self, points: &[ScreenPoint], color: &str) {
        let Some(first) = points.first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.px.x as f64, first.px.y as f64);
        for p in &points[1..] {
            self.ctx.line_to(p.px.x as f64, p.px.y as f64);
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn draw_cake(&self, camera: &Camera, layout: SceneLayout, w: f32, h: f32) {
        let radius = layout.radius * CAKE_RADIUS_RATIO;
        let top_y = layout.base_height;
        let bottom_y = top_y - layout.reference_size * CAKE_DEPTH_RATIO;
        let (Some(plate), Some(top), Some(bottom)) = (
            self.ring(camera, bottom_y, radius * PLATE_MARGIN, w, h),
            self.ring(camera, top_y, radius, w, h),
            self.ring(camera, bottom_y, radius, w, h),
        ) else {
            return;
        };

        self.fill_polygon(&plate, &rgba(PLATE, 1.0));

        // Side walls facing the eye, shaded by a fixed key light.
        let light = Vec3::new(2.0, 5.0, 2.0).normalize();
        for i in 0..RIM_SEGMENTS {
            let j = (i + 1) % RIM_SEGMENTS;
            let a = (i as f32 + 0.5) * std::f32::consts::TAU / RIM_SEGMENTS as f32;
            let normal = Vec3::new(a.cos(), 0.0, a.sin());
            let mid = Vec3::new(normal.x * radius, (top_y + bottom_y) * 0.5, normal.z * radius);
            if (camera.eye - mid).dot(normal) <= 0.0 {
                continue;
            }
            let shade = 0.45 + 0.55 * normal.dot(light).max(0.0);
            let color = rgba(mix(SPONGE_SHADE, SPONGE, shade), 1.0);
            self.fill_polygon(&[top[i], top[j], bottom[j], bottom[i]], &color);
        }

        self.fill_polygon(&top, &rgba(FROSTING, 1.0));
    }

    fn draw_candle(
        &self,
        camera: &Camera,
        base: Vec3,
        candle: &Candle,
        layout: SceneLayout,
        w: f32,
        h: f32,
    ) {
        let anchor = candle.anchor();
        let (Some(b), Some(a)) = (project(camera, base, w, h), project(camera, anchor, w, h)) else {
            return;
        };
        let ctx = &self.ctx;
        ctx.set_line_cap("round");
        ctx.set_line_width((layout.reference_size * CANDLE_WIDTH_RATIO * a.scale) as f64);
        ctx.set_stroke_style_str(&rgba(WAX, 1.0));
        ctx.begin_path();
        ctx.move_to(b.px.x as f64, b.px.y as f64);
        ctx.line_to(a.px.x as f64, a.px.y as f64);
        ctx.stroke();

        let wick_top = anchor + Vec3::Y * candle.flame_height() * 0.15;
        if let Some(t) = project(camera, wick_top, w, h) {
            ctx.set_line_width((a.scale * 0.15).max(1.0) as f64);
            ctx.set_stroke_style_str(&rgba(WICK, 1.0));
            ctx.begin_path();
            ctx.move_to(a.px.x as f64, a.px.y as f64);
            ctx.line_to(t.px.x as f64, t.px.y as f64);
            ctx.stroke();
        }

        let flame = candle.flame();
        if !flame.visible {
            return;
        }
        let height = candle.flame_height() * flame.scale.y * a.scale;
        let width = candle.flame_height() * FLAME_WIDTH_RATIO * flame.scale.x * a.scale;
        let glow = candle.light_intensity();

        ctx.save();
        ctx.set_shadow_color(&rgba(FLAME_OUTER, 0.9));
        ctx.set_shadow_blur(GLOW_BLUR_PX * glow as f64);
        self.teardrop(a.px.x, a.px.y, width, height, &rgba(FLAME_OUTER, 0.75 + 0.2 * glow));
        ctx.set_shadow_blur(0.0);
        self.teardrop(a.px.x, a.px.y, width * 0.5, height * 0.55, &rgba(FLAME_CORE, 1.0));
        ctx.restore();
    }

    /// Flame outline standing on (x, y), tip pointing up.
    fn teardrop(&self, x: f32, y: f32, width: f32, height: f32, color: &str) {
        let (x, y, w, h) = (x as f64, y as f64, width as f64, height as f64);
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x, y - h);
        ctx.bezier_curve_to(x + w, y - h * 0.45, x + w * 0.8, y, x, y);
        ctx.bezier_curve_to(x - w * 0.8, y, x - w, y - h * 0.45, x, y - h);
        ctx.close_path();
        ctx.set_fill_style_str(color);
        ctx.fill();
    }
}
