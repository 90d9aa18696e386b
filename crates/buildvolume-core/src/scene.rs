//! Scene-graph port.
//!
//! The core never touches renderer types. Front-ends implement [`SceneGraph`]
//! over whatever retained scene they draw from; the registry and the viewer
//! only issue these calls.

use crate::color::Rgb;
use crate::constants::FLATTEN_THIN_SCALE;
use crate::stl::TriangleMesh;
use glam::Vec3;

/// Addresses a node in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKey<'a> {
    Printer(&'a str),
    Reference,
}

/// Fill/edge styling of a box or mesh node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeStyle {
    pub fill_color: Rgb,
    pub fill_opacity: f32,
    pub edge_color: Rgb,
    pub edge_opacity: f32,
}

/// Axis along which every object is squashed for footprint views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlattenAxis {
    X,
    Y,
    Z,
}

impl FlattenAxis {
    /// Scale vector for an optional flatten; `None` is identity.
    pub fn scale(axis: Option<FlattenAxis>) -> Vec3 {
        match axis {
            None => Vec3::ONE,
            Some(FlattenAxis::X) => Vec3::new(FLATTEN_THIN_SCALE, 1.0, 1.0),
            Some(FlattenAxis::Y) => Vec3::new(1.0, FLATTEN_THIN_SCALE, 1.0),
            Some(FlattenAxis::Z) => Vec3::new(1.0, 1.0, FLATTEN_THIN_SCALE),
        }
    }

    /// Dominant axis of a view direction. Ties resolve x, then y, then z.
    pub fn from_view(view: Vec3) -> FlattenAxis {
        let a = view.normalize_or_zero().abs();
        if a.x >= a.y && a.x >= a.z {
            FlattenAxis::X
        } else if a.y >= a.z {
            FlattenAxis::Y
        } else {
            FlattenAxis::Z
        }
    }
}

/// Capabilities the core needs from a retained scene graph.
///
/// Boxes are sized in millimeters with their base on `z = 0` and are centered
/// on the node position in XY; scaling happens about the base center.
pub trait SceneGraph {
    fn add_box(&mut self, name: &str, size: Vec3, style: &NodeStyle);
    fn add_mesh(&mut self, key: NodeKey<'_>, mesh: &TriangleMesh, style: &NodeStyle);
    fn remove_node(&mut self, key: NodeKey<'_>);
    fn set_transform(&mut self, key: NodeKey<'_>, position: Vec3, scale: Vec3);
    fn set_visible(&mut self, key: NodeKey<'_>, visible: bool);
    fn set_style(&mut self, key: NodeKey<'_>, style: &NodeStyle);

    fn add_label(&mut self, name: &str, text: &str);
    fn remove_label(&mut self, name: &str);
    fn place_label(&mut self, name: &str, position: Vec3, visible: bool, opacity: f32);
}
