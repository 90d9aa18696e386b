// Name tag placement in both camera modes, plus the orientation gizmo.

mod common;

use buildvolume_core::*;
use common::{approx, approx_vec3};
use glam::{Vec2, Vec3};

#[test]
fn name_hash_wraps_like_32_bit_ints() {
    assert_eq!(name_hash(""), 0);
    assert_eq!(name_hash("a"), 97);
    assert_eq!(name_hash("ab"), 12805);
    assert_eq!(name_hash("Prusa MK4"), 1037336167);
    assert_eq!(name_hash("Voron 2.4 350"), -119415806);
}

#[test]
fn angle_slot_keeps_sign() {
    assert_eq!(angle_slot("ab"), 1);
    assert_eq!(angle_slot("Prusa MK4"), 7);
    assert_eq!(angle_slot("Voron 2.4 350"), -2);
    assert_eq!(angle_slot("Ender 3"), -5);
}

#[test]
fn world_anchor_orbits_box_at_name_angle() {
    // "P1" hashes to slot 5, i.e. 150 degrees
    let anchor = world_anchor("P1", Vec3::splat(200.0));
    assert!(approx_vec3(anchor, Vec3::new(-51.9615, 30.0, 240.0), 1e-3));

    // small boxes use the minimum radius
    let small = world_anchor("ab", Vec3::new(40.0, 20.0, 10.0));
    assert!(approx(small.truncate().length(), 50.0, 1e-3));
    assert_eq!(small.z, 50.0);
}

#[test]
fn label_height_is_clamped_between_ground_and_camera() {
    let anchor = Vec3::new(10.0, -20.0, 240.0);
    let open = place_label_3d(Vec2::new(100.0, 0.0), anchor, 1000.0);
    assert_eq!(open, Vec3::new(110.0, -20.0, 240.0));

    let low_camera = place_label_3d(Vec2::ZERO, anchor, 100.0);
    assert_eq!(low_camera.z, 90.0);

    let underground = place_label_3d(Vec2::ZERO, anchor, 0.0);
    assert_eq!(underground.z, 5.0);
}

#[test]
fn label_2d_sits_inside_footprint() {
    let size = Vec2::new(20.0, 10.0);
    let footprint = Vec2::splat(200.0);
    let top_left = place_label_2d(Vec2::ZERO, footprint, size, anchor_2d(0));
    assert!(approx_vec3(top_left, Vec3::new(-29.0, 29.0, 5.0), 1e-4));

    let bottom_center = place_label_2d(Vec2::ZERO, footprint, size, anchor_2d(5));
    assert!(approx_vec3(bottom_center, Vec3::new(0.0, -29.0, 5.0), 1e-4));

    let moved = place_label_2d(Vec2::new(300.0, -50.0), footprint, size, anchor_2d(3));
    assert!(approx_vec3(moved, Vec3::new(329.0, -79.0, 5.0), 1e-4));
}

#[test]
fn label_2d_prefers_upper_bound_when_box_is_too_small() {
    let pos = place_label_2d(Vec2::ZERO, Vec2::splat(20.0), Vec2::new(30.0, 10.0), anchor_2d(0));
    assert_eq!(pos.x, -21.0);
}

#[test]
fn anchors_cycle_every_six() {
    assert_eq!(anchor_2d(6), anchor_2d(0));
    assert_eq!(anchor_2d(13), anchor_2d(1));
    assert_eq!(ANCHORS_2D.len(), 6);
}

#[test]
fn order_2d_is_case_insensitive_then_stable() {
    let ordered = order_2d(["beta", "alpha", "Alpha", "Gamma"]);
    assert_eq!(ordered, ["Alpha", "alpha", "beta", "Gamma"]);
}

#[test]
fn label_size_scales_with_text() {
    let size = label_size("abc");
    assert!(approx(size.x, 23.66, 1e-3));
    assert!(approx(size.y, 13.3, 1e-3));
    assert!(label_size("a much longer printer name").x > size.x);
}

#[test]
fn nearest_label_within_radius() {
    let labels = [("A", Vec2::new(100.0, 100.0)), ("B", Vec2::new(120.0, 100.0))];
    assert_eq!(nearest_label(labels, Vec2::new(112.0, 100.0), 30.0), Some("B"));
    assert_eq!(nearest_label(labels, Vec2::new(105.0, 100.0), 30.0), Some("A"));
    assert_eq!(nearest_label(labels, Vec2::new(300.0, 300.0), 30.0), None);
}

fn straight_down() -> Camera {
    Camera {
        eye: Vec3::new(0.0, 0.0, 500.0),
        target: Vec3::ZERO,
        ..Camera::default()
    }
}

#[test]
fn gizmo_camera_mirrors_main_direction() {
    let main = Camera::default();
    let gizmo = gizmo_camera(&main);
    let dir = (main.eye - main.target).normalize();
    assert!(approx_vec3(gizmo.eye, dir * 1.5, 1e-5));
    assert_eq!(gizmo.target, Vec3::ZERO);
    assert_eq!(gizmo.aspect, 1.0);
}

#[test]
fn gizmo_pick_prefers_nearest_face() {
    let gizmo = gizmo_camera(&straight_down());
    // Top and Bottom both project to the center; Top is nearer
    assert_eq!(pick_face(&gizmo, Vec2::splat(50.0), 100.0), Some(GizmoFace::Top));
    assert_eq!(pick_face(&gizmo, Vec2::ZERO, 100.0), None);
}

#[test]
fn gizmo_faces_flatten_along_their_axis() {
    assert_eq!(FlattenAxis::from_view(GizmoFace::Top.view()), FlattenAxis::Z);
    assert_eq!(FlattenAxis::from_view(GizmoFace::Front.view()), FlattenAxis::Y);
    assert_eq!(FlattenAxis::from_view(GizmoFace::Left.view()), FlattenAxis::X);
    // ties resolve x before y before z
    assert_eq!(FlattenAxis::from_view(Vec3::new(1.0, 1.0, 1.0)), FlattenAxis::X);
    assert_eq!(FlattenAxis::from_view(Vec3::new(0.0, -1.0, 1.0)), FlattenAxis::Y);
    assert_eq!(
        FlattenAxis::scale(Some(FlattenAxis::Z)),
        Vec3::new(1.0, 1.0, 0.001)
    );
    assert_eq!(FlattenAxis::scale(None), Vec3::ONE);
}

#[test]
fn gizmo_orbit_has_inertia_and_comes_to_rest() {
    let mut orbit = GizmoOrbit::default();
    orbit.start(1.0, 0.0);
    assert!(orbit.step().is_none());

    orbit.drag(10.0, 0.0);
    let (polar, azimuth) = orbit.step().unwrap();
    assert_eq!(polar, 1.0);
    assert!(azimuth < 0.0);

    orbit.release();
    let mut steps = 0;
    while orbit.step().is_some() {
        steps += 1;
        assert!(steps < 1000, "gizmo never settled");
    }
    assert!(orbit.azimuth < -0.025);
}

#[test]
fn gizmo_polar_stays_off_poles() {
    let mut orbit = GizmoOrbit::default();
    orbit.start(0.1, 0.0);
    orbit.drag(0.0, 10_000.0);
    let (polar, _) = orbit.step().unwrap();
    assert_eq!(polar, 0.05);
}
