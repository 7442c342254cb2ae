// Drag-to-orbit: click versus drag, rotation from pointer travel, damping.

use cake_core::*;
use glam::Vec2;
use std::f32::consts::TAU;

const HEIGHT: f32 = 800.0;

fn camera() -> Camera {
    Camera::framing(SceneLayout::default().reference_size, 1.5)
}

fn yaw(camera: &Camera) -> f32 {
    let offset = camera.eye - camera.target;
    offset.x.atan2(offset.z)
}

#[test]
fn press_without_travel_is_a_click() {
    let mut controls = OrbitControls::new();
    controls.press(Vec2::new(300.0, 200.0));
    assert!(controls.drag().active);
    assert_eq!(
        controls.release(Vec2::new(300.0, 200.0), HEIGHT),
        Release::Click
    );
    assert!(!controls.drag().active);
    assert_eq!(controls.pending(), Vec2::ZERO);
}

#[test]
fn jitter_under_the_slop_still_clicks() {
    let mut controls = OrbitControls::new();
    controls.press(Vec2::new(300.0, 200.0));
    controls.drag_to(Vec2::new(302.0, 201.0), HEIGHT);
    controls.drag_to(Vec2::new(299.0, 198.0), HEIGHT);
    assert_eq!(
        controls.release(Vec2::new(301.0, 202.0), HEIGHT),
        Release::Click
    );
    assert_eq!(controls.pending(), Vec2::ZERO);
}

#[test]
fn release_without_press_is_nothing() {
    let mut controls = OrbitControls::new();
    controls.drag_to(Vec2::new(500.0, 500.0), HEIGHT);
    assert_eq!(controls.release(Vec2::ZERO, HEIGHT), Release::None);
    assert_eq!(controls.pending(), Vec2::ZERO);
}

#[test]
fn horizontal_drag_queues_orbit() {
    let mut controls = OrbitControls::new();
    controls.press(Vec2::new(100.0, 300.0));
    controls.drag_to(Vec2::new(110.0, 300.0), HEIGHT);
    controls.drag_to(Vec2::new(100.0 + HEIGHT / 4.0, 300.0), HEIGHT);
    assert_eq!(
        controls.release(Vec2::new(100.0 + HEIGHT / 4.0, 300.0), HEIGHT),
        Release::Drag
    );
    let pending = controls.pending();
    assert!((pending.x + TAU / 4.0).abs() < 1e-4, "{pending:?}");
    assert_eq!(pending.y, 0.0);
}

#[test]
fn collapsed_element_ignores_motion() {
    let mut controls = OrbitControls::new();
    controls.press(Vec2::ZERO);
    controls.drag_to(Vec2::new(400.0, 0.0), 0.0);
    assert_eq!(controls.pending(), Vec2::ZERO);
    assert!(!controls.drag().dragged);
}

#[test]
fn damping_eases_out_the_drag() {
    let mut controls = OrbitControls::new();
    controls.press(Vec2::ZERO);
    controls.release(Vec2::new(-HEIGHT / 8.0, 0.0), HEIGHT);
    let start = controls.pending();
    assert!(start.x > 0.0);

    let mut cam = camera();
    let distance = cam.eye.distance(cam.target);
    let yaw0 = yaw(&cam);
    controls.update(&mut cam, 1.0);
    let first = start.x - controls.pending().x;
    assert!((first - start.x * ORBIT_DAMPING).abs() < 1e-5);
    let after_one = yaw(&cam) - yaw0;
    assert!((after_one - (first + auto_rotate_step())).abs() < 1e-4);

    let mut previous = controls.pending().x;
    for _ in 0..200 {
        controls.update(&mut cam, 1.0);
        let now = controls.pending().x;
        assert!(now < previous);
        previous = now;
    }
    assert!(controls.pending().length() < start.length() * 1e-4);
    assert!((cam.eye.distance(cam.target) - distance).abs() < 1e-2);
}

#[test]
fn long_frames_apply_a_bigger_share() {
    let mut controls = OrbitControls::new();
    controls.press(Vec2::ZERO);
    controls.release(Vec2::new(200.0, 0.0), HEIGHT);
    let start = controls.pending();
    controls.update(&mut camera(), 2.0);
    let expected = start * (1.0 - ORBIT_DAMPING) * (1.0 - ORBIT_DAMPING);
    assert!((controls.pending() - expected).length() < 1e-5);
}

#[test]
fn idle_controls_only_auto_rotate() {
    let mut controls = OrbitControls::new();
    let mut cam = camera();
    let y0 = cam.eye.y;
    let yaw0 = yaw(&cam);
    controls.update(&mut cam, 1.0);
    assert!((yaw(&cam) - yaw0 - auto_rotate_step()).abs() < 1e-5);
    assert!((cam.eye.y - y0).abs() < 1e-3);
}

#[test]
fn dragging_down_raises_the_eye() {
    let mut controls = OrbitControls::new();
    controls.press(Vec2::new(0.0, 100.0));
    controls.release(Vec2::new(0.0, 100.0 + HEIGHT / 8.0), HEIGHT);
    assert!(controls.pending().y < 0.0);

    let mut cam = camera();
    let y0 = cam.eye.y;
    let distance = cam.eye.distance(cam.target);
    for _ in 0..300 {
        controls.update(&mut cam, 1.0);
    }
    assert!(cam.eye.y > y0);
    assert!((cam.eye.distance(cam.target) - distance).abs() < 1e-2);
}

#[test]
fn tilt_stops_short_of_the_poles() {
    let mut cam = camera();
    let distance = cam.eye.distance(cam.target);
    cam.tilt(-10.0);
    assert!(cam.eye.y < distance);
    assert!(cam.eye.y > distance * 0.99);
    cam.tilt(20.0);
    assert!(cam.eye.y > -distance);
    assert!(cam.eye.y < -distance * 0.99);
    assert!((cam.eye.distance(cam.target) - distance).abs() < 1e-2);
}
