// Host-side tests for the pure pointer and projection helpers.
// The web crate is wasm-only, so the pure modules are included directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}
mod helpers {
    include!("../src/render/helpers.rs");
}

use cake_core::{Camera, SceneLayout};
use glam::{Vec2, Vec3};
use helpers::*;
use input::*;

fn camera() -> Camera {
    Camera::framing(SceneLayout::default().reference_size, 1.5)
}

#[test]
fn backing_size_scales_by_dpr() {
    assert_eq!(backing_size(400.0, 300.0, 2.0), (800, 600));
    assert_eq!(backing_size(401.5, 300.0, 1.0), (401, 300));
}

#[test]
fn backing_size_never_collapses() {
    assert_eq!(backing_size(0.0, 0.0, 2.0), (1, 1));
    assert_eq!(backing_size(0.2, 10.0, 1.0), (1, 10));
}

#[test]
fn within_canvas_accepts_edges_only() {
    assert!(within_canvas(Vec2::ZERO));
    assert!(within_canvas(Vec2::new(1.0, -1.0)));
    assert!(!within_canvas(Vec2::new(1.01, 0.0)));
    assert!(!within_canvas(Vec2::new(0.0, -1.5)));
}

#[test]
fn pointer_ray_rejects_presses_outside() {
    let cam = camera();
    assert!(pointer_ray(&cam, Vec2::new(2.0, 0.0)).is_none());
    let ray = pointer_ray(&cam, Vec2::ZERO).expect("centre ray");
    assert_eq!(ray.origin, cam.eye);
    let to_target = (cam.target - cam.eye).normalize();
    assert!(ray.dir.dot(to_target) > 0.999);
}

#[test]
fn ndc_to_px_flips_y() {
    let px = ndc_to_px(Vec2::new(-1.0, 1.0), 200.0, 100.0);
    assert_eq!(px, Vec2::new(0.0, 0.0));
    let px = ndc_to_px(Vec2::new(1.0, -1.0), 200.0, 100.0);
    assert_eq!(px, Vec2::new(200.0, 100.0));
    let px = ndc_to_px(Vec2::ZERO, 200.0, 100.0);
    assert_eq!(px, Vec2::new(100.0, 50.0));
}

#[test]
fn project_centres_the_target() {
    let cam = camera();
    let p = project(&cam, cam.target, 300.0, 200.0).expect("target in view");
    assert!((p.px - Vec2::new(150.0, 100.0)).length() < 1e-2);
    assert!((p.depth - cam.eye.distance(cam.target)).abs() < 1e-3);
}

#[test]
fn project_scale_shrinks_with_distance() {
    let cam = camera();
    let near = project(&cam, Vec3::new(0.0, 0.0, 10.0), 300.0, 200.0).expect("near");
    let far = project(&cam, Vec3::new(0.0, 0.0, -10.0), 300.0, 200.0).expect("far");
    assert!(near.depth < far.depth);
    assert!(near.scale > far.scale);
}

#[test]
fn project_skips_points_behind_the_eye() {
    let cam = camera();
    let behind = cam.eye + (cam.eye - cam.target);
    assert!(project(&cam, behind, 300.0, 200.0).is_none());
}

#[test]
fn back_to_front_orders_far_first() {
    assert_eq!(back_to_front(&[3.0, 9.0, 1.0, 5.0]), vec![1, 3, 0, 2]);
    assert!(back_to_front(&[]).is_empty());
}

#[test]
fn rgba_clamps_alpha() {
    assert_eq!(rgba([255, 0, 10], 0.5), "rgba(255,0,10,0.500)");
    assert_eq!(rgba([1, 2, 3], 2.0), "rgba(1,2,3,1.000)");
    assert_eq!(rgba([1, 2, 3], -1.0), "rgba(1,2,3,0.000)");
}
