//! Scene layout, camera framing and label placement for comparing 3D-printer
//! build volumes.
//!
//! Everything in this crate is platform independent. Front-ends implement
//! [`SceneGraph`] and drive a [`Viewer`] from their event and frame loops.

pub mod bounds;
pub mod camera;
pub mod color;
pub mod constants;
pub mod error;
pub mod gizmo;
pub mod labels;
pub mod layout;
pub mod printer;
pub mod reference;
pub mod registry;
pub mod scene;
pub mod state;
pub mod stl;
pub mod theme;

pub use bounds::*;
pub use camera::*;
pub use color::Rgb;
pub use constants::*;
pub use error::{Error, Result};
pub use gizmo::*;
pub use labels::*;
pub use layout::*;
pub use printer::*;
pub use reference::*;
pub use registry::*;
pub use scene::*;
pub use state::*;
pub use stl::TriangleMesh;
pub use theme::*;
