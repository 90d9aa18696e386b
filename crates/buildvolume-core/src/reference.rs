use crate::color::Rgb;
use crate::constants::{REFERENCE_EDGE_LIGHTEN, REFERENCE_FILL_OPACITY, EDGE_OPACITY};
use crate::scene::NodeStyle;
use crate::stl::TriangleMesh;
use glam::Vec3;

/// Calibration prints available as a size anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReferenceModelKind {
    #[default]
    Benchy,
    VoronCube,
}

impl ReferenceModelKind {
    /// Maps the `model-select` value; anything unknown is a Benchy.
    pub fn from_key(key: &str) -> Self {
        match key {
            "voron" => Self::VoronCube,
            _ => Self::Benchy,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Benchy => "benchy",
            Self::VoronCube => "voron",
        }
    }

    pub fn asset_path(self) -> &'static str {
        match self {
            Self::Benchy => "assets/3DBenchy.stl",
            Self::VoronCube => "assets/Voron_Design_Cube_v7(R2).stl",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Benchy => "Benchy",
            Self::VoronCube => "Voron Cube",
        }
    }
}

/// A loaded reference model placed in the scene.
#[derive(Clone, Debug)]
pub struct ReferenceModel {
    pub kind: ReferenceModelKind,
    pub mesh: TriangleMesh,
    pub size: Vec3,
    pub position: Vec3,
}

impl ReferenceModel {
    /// Wrap a decoded mesh, re-centering it on its base.
    pub fn new(kind: ReferenceModelKind, mut mesh: TriangleMesh) -> Self {
        mesh.center_on_base();
        let size = mesh.size();
        Self {
            kind,
            mesh,
            size,
            position: Vec3::ZERO,
        }
    }
}

pub fn reference_style(color: Rgb) -> NodeStyle {
    NodeStyle {
        fill_color: color,
        fill_opacity: REFERENCE_FILL_OPACITY,
        edge_color: color.lighten(REFERENCE_EDGE_LIGHTEN),
        edge_opacity: EDGE_OPACITY,
    }
}
