use cake_core::{client_to_ndc, Camera, Ray};
use glam::Vec2;
use web_sys as web;

/// Pointer position in the canvas' NDC (y up). `None` for a collapsed canvas.
#[inline]
pub fn pointer_ndc(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    client_to_ndc(
        pointer_client(ev),
        Vec2::new(rect.left() as f32, rect.top() as f32),
        Vec2::new(rect.width() as f32, rect.height() as f32),
    )
}

#[inline]
pub fn pointer_client(ev: &web::PointerEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Presses outside the canvas rectangle never reach the picker.
#[inline]
pub fn within_canvas(ndc: Vec2) -> bool {
    ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0
}

#[inline]
pub fn pointer_ray(camera: &Camera, ndc: Vec2) -> Option<Ray> {
    within_canvas(ndc).then(|| camera.ray_through(ndc))
}

/// Backing store size for a CSS box at the given device pixel ratio.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let w = (css_width * dpr) as u32;
    let h = (css_height * dpr) as u32;
    (w.max(1), h.max(1))
}
