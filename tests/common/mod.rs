// Shared fixtures for host-side tests.
#![allow(dead_code)]

use buildvolume_core::{NodeKey, NodeStyle, Printer, Rgb, SceneGraph, TriangleMesh};
use glam::Vec3;
use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq)]
pub struct BoxRecord {
    pub size: Vec3,
    pub position: Vec3,
    pub scale: Vec3,
    pub visible: bool,
    pub style: NodeStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MeshRecord {
    pub triangles: usize,
    pub position: Vec3,
    pub scale: Vec3,
    pub visible: bool,
    pub style: NodeStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelRecord {
    pub text: String,
    pub position: Vec3,
    pub visible: bool,
    pub opacity: f32,
}

/// In-memory scene that keeps the latest state of every node.
#[derive(Default, Debug)]
pub struct RecordingScene {
    pub boxes: HashMap<String, BoxRecord>,
    pub reference: Option<MeshRecord>,
    pub labels: HashMap<String, LabelRecord>,
    pub add_box_calls: usize,
}

impl SceneGraph for RecordingScene {
    fn add_box(&mut self, name: &str, size: Vec3, style: &NodeStyle) {
        self.add_box_calls += 1;
        self.boxes.insert(
            name.to_string(),
            BoxRecord {
                size,
                position: Vec3::ZERO,
                scale: Vec3::ONE,
                visible: true,
                style: *style,
            },
        );
    }

    fn add_mesh(&mut self, key: NodeKey<'_>, mesh: &TriangleMesh, style: &NodeStyle) {
        assert_eq!(key, NodeKey::Reference);
        self.reference = Some(MeshRecord {
            triangles: mesh.triangle_count(),
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            visible: true,
            style: *style,
        });
    }

    fn remove_node(&mut self, key: NodeKey<'_>) {
        match key {
            NodeKey::Printer(name) => {
                self.boxes.remove(name);
            }
            NodeKey::Reference => self.reference = None,
        }
    }

    fn set_transform(&mut self, key: NodeKey<'_>, position: Vec3, scale: Vec3) {
        match key {
            NodeKey::Printer(name) => {
                let node = self.boxes.get_mut(name).expect("transform on missing box");
                node.position = position;
                node.scale = scale;
            }
            NodeKey::Reference => {
                let node = self.reference.as_mut().expect("transform on missing mesh");
                node.position = position;
                node.scale = scale;
            }
        }
    }

    fn set_visible(&mut self, key: NodeKey<'_>, visible: bool) {
        match key {
            NodeKey::Printer(name) => {
                self.boxes.get_mut(name).expect("missing box").visible = visible;
            }
            NodeKey::Reference => {
                self.reference.as_mut().expect("missing mesh").visible = visible;
            }
        }
    }

    fn set_style(&mut self, key: NodeKey<'_>, style: &NodeStyle) {
        match key {
            NodeKey::Printer(name) => {
                self.boxes.get_mut(name).expect("missing box").style = *style;
            }
            NodeKey::Reference => {
                self.reference.as_mut().expect("missing mesh").style = *style;
            }
        }
    }

    fn add_label(&mut self, name: &str, text: &str) {
        self.labels.insert(
            name.to_string(),
            LabelRecord {
                text: text.to_string(),
                position: Vec3::ZERO,
                visible: false,
                opacity: 1.0,
            },
        );
    }

    fn remove_label(&mut self, name: &str) {
        self.labels.remove(name);
    }

    fn place_label(&mut self, name: &str, position: Vec3, visible: bool, opacity: f32) {
        let label = self.labels.get_mut(name).expect("missing label");
        label.position = position;
        label.visible = visible;
        label.opacity = opacity;
    }
}

pub fn printer(name: &str, x: f32, y: f32, z: f32) -> Printer {
    Printer::new(name, "Test", Vec3::new(x, y, z), Rgb::from_u32(0x3fa7d6))
}

/// Axis-aligned cube from `lo` to `lo + size`, as 12 triangles.
pub fn cube_mesh(lo: Vec3, size: Vec3) -> TriangleMesh {
    let c = |i: usize| {
        lo + Vec3::new(
            if i & 1 == 0 { 0.0 } else { size.x },
            if i & 2 == 0 { 0.0 } else { size.y },
            if i & 4 == 0 { 0.0 } else { size.z },
        )
    };
    let faces: [[usize; 4]; 6] = [
        [0, 1, 3, 2],
        [4, 6, 7, 5],
        [0, 4, 5, 1],
        [2, 3, 7, 6],
        [0, 2, 6, 4],
        [1, 5, 7, 3],
    ];
    let mut vertices = Vec::with_capacity(36);
    for [a, b, cc, d] in faces {
        vertices.extend_from_slice(&[c(a), c(b), c(cc), c(a), c(cc), c(d)]);
    }
    TriangleMesh { vertices }
}

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

pub fn approx_vec3(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).abs().max_element() <= eps
}
