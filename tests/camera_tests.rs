// Framing math and the 2D/3D camera rig.

mod common;

use buildvolume_core::*;
use common::{approx, approx_vec3};
use glam::{Vec2, Vec3};
use std::time::Duration;

fn cube_bounds() -> SceneBounds {
    SceneBounds::from_min_max(Vec3::new(-100.0, -100.0, 0.0), Vec3::new(100.0, 100.0, 200.0))
}

fn rig_with_aspect(aspect: f32) -> CameraRig {
    let mut rig = CameraRig::default();
    rig.camera.aspect = aspect;
    rig.reframe(&cube_bounds());
    rig
}

#[test]
fn three_quarter_framing() {
    let view = frame_3d(&cube_bounds());
    assert_eq!(view.target, Vec3::new(0.0, 0.0, 80.0));
    assert!(approx_vec3(view.eye - view.target, Vec3::new(168.0, -480.0, 336.0), 1e-3));
}

#[test]
fn short_scenes_keep_minimum_target_height() {
    let flat = SceneBounds::from_min_max(Vec3::new(-50.0, -50.0, 0.0), Vec3::new(50.0, 50.0, 20.0));
    assert_eq!(pivot_3d(&flat).z, 60.0);
}

#[test]
fn top_down_distance_fits_padded_bounds() {
    let d = top_down_distance(&cube_bounds(), 45f32.to_radians(), 800.0 / 600.0);
    assert!(approx(d, 362.132, 0.01), "distance {d}");

    // portrait viewport: width is the limiting side
    let portrait = top_down_distance(&cube_bounds(), 45f32.to_radians(), 0.5);
    assert!(approx(portrait, 724.264, 0.02), "distance {portrait}");

    let tiny = SceneBounds::from_min_max(Vec3::ZERO, Vec3::ZERO);
    assert_eq!(top_down_distance(&tiny, 45f32.to_radians(), 1.0), 200.0);
}

#[test]
fn viewport_aspect_floors_sides() {
    assert_eq!(viewport_aspect(0.0, 0.0), 1.0);
    assert_eq!(viewport_aspect(800.0, 600.0), 800.0 / 600.0);
    assert_eq!(viewport_aspect(1.0, 1000.0), 0.1);
}

#[test]
fn tween_eases_and_lands_exactly() {
    let from = CameraView {
        eye: Vec3::new(0.0, -100.0, 100.0),
        target: Vec3::ZERO,
    };
    let to = CameraView {
        eye: Vec3::new(0.0, 0.0, 400.0),
        target: Vec3::new(10.0, 10.0, 0.0),
    };
    let mut tween = CameraTween::new(from, to);
    let (mid, done) = tween.advance(Duration::from_millis(160));
    assert!(!done);
    assert!(approx_vec3(mid.eye, from.eye.lerp(to.eye, 0.5), 1e-3));

    let (end, done) = tween.advance(Duration::from_millis(200));
    assert!(done);
    assert_eq!(end, to);
}

#[test]
fn smoothstep_is_clamped() {
    assert_eq!(smoothstep(-1.0), 0.0);
    assert_eq!(smoothstep(0.5), 0.5);
    assert_eq!(smoothstep(2.0), 1.0);
}

#[test]
fn enter_and_exit_2d_restores_saved_view() {
    let mut rig = rig_with_aspect(800.0 / 600.0);
    let before = rig.view();

    rig.enter_2d(&cube_bounds());
    assert!(rig.is_2d());
    assert!(rig.is_animating());
    assert_eq!(rig.saved_3d(), Some(before));
    rig.tick(Duration::from_secs(1));
    assert!(!rig.is_animating());
    assert_eq!(rig.camera.target, Vec3::ZERO);
    assert!(approx(rig.camera.eye.z, 362.132, 0.01));
    assert_eq!(rig.limits().max_polar, 0.0);

    rig.exit_2d(&cube_bounds());
    assert!(!rig.is_2d());
    rig.tick(Duration::from_secs(1));
    assert_eq!(rig.view(), before);
    assert_eq!(rig.limits(), OrbitLimits::orbit_3d());
}

#[test]
fn top_down_view_cannot_orbit() {
    let mut rig = rig_with_aspect(1.0);
    rig.enter_2d(&cube_bounds());
    rig.tick(Duration::from_secs(1));
    let locked = rig.view();
    rig.orbit(0.7, 0.4);
    rig.tick(Duration::from_millis(16));
    assert_eq!(rig.view(), locked);
}

#[test]
fn top_down_zoom_is_bounded() {
    let mut rig = rig_with_aspect(800.0 / 600.0);
    rig.enter_2d(&cube_bounds());
    rig.tick(Duration::from_secs(1));
    let base = rig.top_down_distance();
    rig.zoom(10.0);
    assert!(approx(rig.top_down_distance(), base * 2.0, 0.01));
    rig.zoom(0.001);
    assert!(approx(rig.top_down_distance(), base * 0.5, 0.01));
}

#[test]
fn resize_reframes_only_top_down() {
    let mut rig = rig_with_aspect(800.0 / 600.0);
    let view = rig.view();
    rig.resize(0.5, &cube_bounds());
    assert_eq!(rig.view(), view);

    rig.enter_2d(&cube_bounds());
    rig.resize(0.5, &cube_bounds());
    assert!(approx(rig.top_down_distance(), 724.264, 0.02));
    assert!(!rig.is_animating());
}

#[test]
fn orbit_zoom_is_clamped() {
    let mut rig = rig_with_aspect(1.0);
    rig.zoom(100.0);
    assert!(approx(rig.camera.distance(), 5000.0, 0.1));
    rig.zoom(0.0001);
    assert!(approx(rig.camera.distance(), 200.0, 0.01));
    let before = rig.view();
    rig.zoom(f32::NAN);
    rig.zoom(-2.0);
    assert_eq!(rig.view(), before);
}

#[test]
fn orbit_keeps_distance_and_stays_off_the_pole() {
    let mut rig = rig_with_aspect(1.0);
    let distance = rig.camera.distance();
    rig.orbit(0.5, 0.0);
    assert!(approx(rig.camera.distance(), distance, 0.01));
    rig.orbit(0.0, -10.0);
    assert!(approx(rig.camera.distance(), distance, 0.01));
    assert!(rig.camera.eye.z > rig.camera.target.z);
    assert!(rig.camera.view_matrix().is_finite());
}

#[test]
fn pan_moves_eye_and_target_together() {
    let mut rig = rig_with_aspect(1.0);
    let offset = rig.camera.eye - rig.camera.target;
    let target_z = rig.camera.target.z;
    rig.pan(40.0, -25.0, 600.0);
    assert!(approx_vec3(rig.camera.eye - rig.camera.target, offset, 1e-3));
    assert_eq!(rig.camera.target.z, target_z);
    assert_ne!(rig.camera.target, Vec3::new(0.0, 0.0, 80.0));
}

#[test]
fn snap_keeps_distance_from_pivot() {
    let mut rig = rig_with_aspect(1.0);
    let pivot = rig.pivot();
    let distance = rig.camera.eye.distance(pivot);
    rig.snap_to_direction(Vec3::Z);
    assert_eq!(rig.camera.target, pivot);
    assert!(approx_vec3(rig.camera.eye, pivot + Vec3::Z * distance, 1e-2));
    assert!(rig.camera.view_matrix().is_finite());

    let (polar, _) = rig.pivot_angles();
    assert!(approx(polar, 0.0, 1e-3));
}

#[test]
fn orbit_pivot_to_places_eye_on_sphere() {
    let mut rig = rig_with_aspect(1.0);
    let distance = rig.camera.eye.distance(rig.pivot());
    rig.orbit_pivot_to(std::f32::consts::FRAC_PI_2, 0.0);
    assert!(approx_vec3(
        rig.camera.eye,
        rig.pivot() + Vec3::X * distance,
        1e-2
    ));
}

#[test]
fn spherical_helpers() {
    let (r, polar, azimuth) = to_spherical(Vec3::new(0.0, 0.0, 5.0));
    assert_eq!((r, polar, azimuth), (5.0, 0.0, 0.0));
    assert_eq!(to_spherical(Vec3::ZERO), (0.0, 0.0, 0.0));
    let v = from_spherical(2.0, std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    assert!(approx_vec3(v, Vec3::new(0.0, 2.0, 0.0), 1e-5));
}

#[test]
fn projection_centers_target_and_rejects_points_behind() {
    let camera = Camera::default();
    let center = camera.world_to_screen(camera.target, 800.0, 600.0).unwrap();
    assert!((center - Vec2::new(400.0, 300.0)).length() < 1e-2);

    let behind = camera.eye + (camera.eye - camera.target);
    assert_eq!(camera.world_to_screen(behind, 800.0, 600.0), None);
}

#[test]
fn straight_down_view_matrix_is_finite() {
    let camera = Camera {
        eye: Vec3::new(0.0, 0.0, 500.0),
        ..Camera::default()
    };
    assert!(camera.view_matrix().is_finite());
    assert!(camera.view_proj().is_finite());
}
