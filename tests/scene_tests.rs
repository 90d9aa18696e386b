// Retained web scene and CPU vertex generation, built on the host.

#![allow(dead_code)]
mod common;
mod scene {
    include!("../src/scene.rs");
}
mod geometry {
    include!("../src/geometry.rs");
}

use buildvolume_core::{base_style, AxisGuide, GridSpec, NodeKey, Rgb, SceneGraph};
use common::cube_mesh;
use geometry::*;
use glam::Vec3;
use scene::*;

fn style() -> buildvolume_core::NodeStyle {
    base_style(Rgb::from_u32(0x3fa7d6))
}

#[test]
fn box_changes_mark_geometry_dirty_once() {
    let mut scene = WebScene::new();
    scene.add_box("P1", Vec3::splat(200.0), &style());
    assert!(scene.take_boxes_dirty());
    assert!(!scene.take_boxes_dirty());
    assert!(!scene.take_mesh_dirty());

    scene.set_transform(NodeKey::Printer("P1"), Vec3::new(10.0, 0.0, 0.0), Vec3::ONE);
    assert!(scene.take_boxes_dirty());
    assert_eq!(scene.box_node("P1").unwrap().position.x, 10.0);

    scene.remove_node(NodeKey::Printer("P1"));
    assert!(scene.take_boxes_dirty());
    assert!(scene.box_node("P1").is_none());
}

#[test]
fn reference_mesh_bumps_generation() {
    let mut scene = WebScene::new();
    assert_eq!(scene.mesh_generation(), 0);
    scene.add_mesh(NodeKey::Reference, &cube_mesh(Vec3::ZERO, Vec3::ONE), &style());
    assert_eq!(scene.mesh_generation(), 1);
    assert!(scene.take_mesh_dirty());

    scene.set_visible(NodeKey::Reference, false);
    assert!(!scene.reference().unwrap().visible);
    assert!(scene.take_mesh_dirty());
    assert_eq!(scene.mesh_generation(), 1);

    scene.remove_node(NodeKey::Reference);
    assert!(scene.reference().is_none());
}

#[test]
fn boxes_are_listed_by_name() {
    let mut scene = WebScene::new();
    for name in ["Voron", "Ender", "Prusa"] {
        scene.add_box(name, Vec3::splat(100.0), &style());
    }
    let names: Vec<&str> = scene.boxes().iter().map(|(n, _)| *n).collect();
    assert_eq!(names, ["Ender", "Prusa", "Voron"]);
}

#[test]
fn labels_track_placement() {
    let mut scene = WebScene::new();
    scene.add_label("P1", "P1");
    assert!(!scene.label("P1").unwrap().visible);
    scene.place_label("P1", Vec3::new(1.0, 2.0, 3.0), true, 0.78);
    let label = scene.label("P1").unwrap();
    assert_eq!(label.position, Vec3::new(1.0, 2.0, 3.0));
    assert!(label.visible);
    assert_eq!(label.opacity, 0.78);
    // unknown labels are ignored
    scene.place_label("missing", Vec3::ZERO, true, 1.0);
    scene.remove_label("P1");
    assert_eq!(scene.labels().count(), 0);
}

#[test]
fn box_extent_scales_about_base_center() {
    let node = BoxNode {
        size: Vec3::new(200.0, 100.0, 300.0),
        position: Vec3::new(50.0, -20.0, 0.0),
        scale: Vec3::new(1.0, 1.0, 0.001),
        visible: true,
        style: style(),
    };
    let (min, max) = box_extent(&node);
    assert_eq!(min, Vec3::new(-50.0, -70.0, 0.0));
    assert_eq!(max.x, 150.0);
    assert_eq!(max.y, 30.0);
    assert!((max.z - 0.3).abs() < 1e-4);
}

#[test]
fn box_buffers_have_fixed_sizes() {
    let node = BoxNode {
        size: Vec3::splat(100.0),
        position: Vec3::ZERO,
        scale: Vec3::ONE,
        visible: true,
        style: style(),
    };
    let mut fill = Vec::new();
    push_box_fill(&mut fill, &node);
    assert_eq!(fill.len(), 36);
    let mut edges = Vec::new();
    push_box_edges(&mut edges, &node);
    assert_eq!(edges.len(), 24);
    assert_eq!(edges[0].color[3], style().edge_opacity);
}

#[test]
fn cube_feature_edges_skip_face_diagonals() {
    let mesh = cube_mesh(Vec3::ZERO, Vec3::splat(10.0));
    let edges = feature_edges(&mesh, 1.0);
    assert_eq!(edges.len(), 12);
    for (a, b) in edges {
        // every cube edge runs along exactly one axis
        let d = (b - a).abs();
        let axes = [d.x, d.y, d.z].iter().filter(|c| **c > 1e-4).count();
        assert_eq!(axes, 1);
    }
}

#[test]
fn open_mesh_keeps_boundary_edges() {
    let mut mesh = cube_mesh(Vec3::ZERO, Vec3::splat(10.0));
    mesh.vertices.truncate(3);
    assert_eq!(feature_edges(&mesh, 1.0).len(), 3);
}

#[test]
fn grid_center_lines_use_major_color() {
    let major = Rgb::from_u32(0xff0000);
    let minor = Rgb::from_u32(0x0000ff);
    let lines = grid_lines(
        GridSpec {
            size: 600.0,
            divisions: 24,
        },
        major,
        minor,
    );
    assert_eq!(lines.len(), 25 * 4);
    let majors = lines.iter().filter(|v| v.color[0] == 1.0).count();
    assert_eq!(majors, 4);
    assert!(lines.iter().all(|v| v.position[2] == 0.0));
    assert!(lines.iter().all(|v| v.position[0].abs() <= 300.0 && v.position[1].abs() <= 300.0));
}

#[test]
fn axis_arrows_reach_guide_length() {
    let guide = AxisGuide {
        length: 200.0,
        head_length: 24.0,
        head_width: 9.6,
    };
    let lines = axis_lines(
        guide,
        [
            Rgb::from_u32(0xff0000),
            Rgb::from_u32(0x00ff00),
            Rgb::from_u32(0x0000ff),
        ],
    );
    assert_eq!(lines.len(), 3 * 10);
    let tip = lines
        .iter()
        .map(|v| Vec3::from_array(v.position).length())
        .fold(0.0f32, f32::max);
    assert!((tip - 200.0).abs() < 1e-3);
}
