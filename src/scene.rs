// Retained scene the renderer and label overlay draw from.
//
// The viewer mutates it through the `SceneGraph` port. Geometry changes set
// dirty flags so GPU buffers are only rebuilt when something moved.

use buildvolume_core::{NodeKey, NodeStyle, SceneGraph, TriangleMesh};
use fnv::FnvHashMap;
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct BoxNode {
    pub size: Vec3,
    pub position: Vec3,
    pub scale: Vec3,
    pub visible: bool,
    pub style: NodeStyle,
}

#[derive(Clone, Debug)]
pub struct MeshNode {
    pub mesh: TriangleMesh,
    pub position: Vec3,
    pub scale: Vec3,
    pub visible: bool,
    pub style: NodeStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelNode {
    pub text: String,
    pub position: Vec3,
    pub visible: bool,
    pub opacity: f32,
}

#[derive(Default)]
pub struct WebScene {
    boxes: FnvHashMap<String, BoxNode>,
    reference: Option<MeshNode>,
    labels: FnvHashMap<String, LabelNode>,
    boxes_dirty: bool,
    mesh_dirty: bool,
    mesh_generation: u64,
}

impl WebScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn box_node(&self, name: &str) -> Option<&BoxNode> {
        self.boxes.get(name)
    }

    /// Boxes sorted by name so draw order is stable between frames.
    pub fn boxes(&self) -> Vec<(&str, &BoxNode)> {
        let mut out: Vec<(&str, &BoxNode)> =
            self.boxes.iter().map(|(k, v)| (k.as_str(), v)).collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    pub fn reference(&self) -> Option<&MeshNode> {
        self.reference.as_ref()
    }

    pub fn labels(&self) -> impl Iterator<Item = (&str, &LabelNode)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn label(&self, name: &str) -> Option<&LabelNode> {
        self.labels.get(name)
    }

    /// Bumped whenever a new reference mesh is added.
    pub fn mesh_generation(&self) -> u64 {
        self.mesh_generation
    }

    /// Returns and clears the box-geometry dirty flag.
    pub fn take_boxes_dirty(&mut self) -> bool {
        std::mem::take(&mut self.boxes_dirty)
    }

    /// Returns and clears the reference-mesh dirty flag.
    pub fn take_mesh_dirty(&mut self) -> bool {
        std::mem::take(&mut self.mesh_dirty)
    }

    fn mark(&mut self, key: NodeKey<'_>) {
        match key {
            NodeKey::Printer(_) => self.boxes_dirty = true,
            NodeKey::Reference => self.mesh_dirty = true,
        }
    }
}

impl SceneGraph for WebScene {
    fn add_box(&mut self, name: &str, size: Vec3, style: &NodeStyle) {
        self.boxes.insert(
            name.to_string(),
            BoxNode {
                size,
                position: Vec3::ZERO,
                scale: Vec3::ONE,
                visible: true,
                style: *style,
            },
        );
        self.boxes_dirty = true;
    }

    fn add_mesh(&mut self, key: NodeKey<'_>, mesh: &TriangleMesh, style: &NodeStyle) {
        match key {
            NodeKey::Reference => {
                self.reference = Some(MeshNode {
                    mesh: mesh.clone(),
                    position: Vec3::ZERO,
                    scale: Vec3::ONE,
                    visible: true,
                    style: *style,
                });
                self.mesh_generation += 1;
                self.mesh_dirty = true;
            }
            NodeKey::Printer(name) => {
                log::warn!("[scene] mesh nodes for printers unsupported: {}", name)
            }
        }
    }

    fn remove_node(&mut self, key: NodeKey<'_>) {
        match key {
            NodeKey::Printer(name) => {
                self.boxes.remove(name);
            }
            NodeKey::Reference => self.reference = None,
        }
        self.mark(key);
    }

    fn set_transform(&mut self, key: NodeKey<'_>, position: Vec3, scale: Vec3) {
        match key {
            NodeKey::Printer(name) => {
                if let Some(node) = self.boxes.get_mut(name) {
                    node.position = position;
                    node.scale = scale;
                }
            }
            NodeKey::Reference => {
                if let Some(node) = self.reference.as_mut() {
                    node.position = position;
                    node.scale = scale;
                }
            }
        }
        self.mark(key);
    }

    fn set_visible(&mut self, key: NodeKey<'_>, visible: bool) {
        match key {
            NodeKey::Printer(name) => {
                if let Some(node) = self.boxes.get_mut(name) {
                    node.visible = visible;
                }
            }
            NodeKey::Reference => {
                if let Some(node) = self.reference.as_mut() {
                    node.visible = visible;
                }
            }
        }
        self.mark(key);
    }

    fn set_style(&mut self, key: NodeKey<'_>, style: &NodeStyle) {
        match key {
            NodeKey::Printer(name) => {
                if let Some(node) = self.boxes.get_mut(name) {
                    node.style = *style;
                }
            }
            NodeKey::Reference => {
                if let Some(node) = self.reference.as_mut() {
                    node.style = *style;
                }
            }
        }
        self.mark(key);
    }

    fn add_label(&mut self, name: &str, text: &str) {
        self.labels.insert(
            name.to_string(),
            LabelNode {
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
        if let Some(label) = self.labels.get_mut(name) {
            label.position = position;
            label.visible = visible;
            label.opacity = opacity;
        }
    }
}
