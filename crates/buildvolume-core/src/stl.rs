//! STL decoding for reference models.
//!
//! Parsing is delegated to `stl_io`; the indexed result is flattened into a
//! triangle list where three consecutive vertices form one triangle.

use crate::error::{Error, Result};
use glam::Vec3;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    pub vertices: Vec<Vec3>,
}

impl TriangleMesh {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Axis-aligned `(min, max)`; `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))),
        )
    }

    pub fn size(&self) -> Vec3 {
        self.bounding_box()
            .map(|(lo, hi)| hi - lo)
            .unwrap_or(Vec3::ZERO)
    }

    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    /// Move the mesh so its XY center is at the origin and its base on `z = 0`.
    pub fn center_on_base(&mut self) {
        if let Some((lo, hi)) = self.bounding_box() {
            let center = (lo + hi) * 0.5;
            self.translate(Vec3::new(-center.x, -center.y, -lo.z));
        }
    }

    /// Per-triangle face normals, one per vertex.
    pub fn flat_normals(&self) -> Vec<Vec3> {
        self.vertices
            .chunks_exact(3)
            .flat_map(|tri| {
                let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
                [n, n, n]
            })
            .collect()
    }
}

/// Decode an STL file from memory, binary or ASCII.
pub fn decode(bytes: &[u8]) -> Result<TriangleMesh> {
    let indexed = stl_io::read_stl(&mut std::io::Cursor::new(bytes))
        .map_err(|e| Error::Model(format!("failed to parse STL data: {e}")))?;
    log::debug!("[stl] {} faces, {} vertices", indexed.faces.len(), indexed.vertices.len());
    let mesh = from_indexed(&indexed);
    if mesh.is_empty() {
        return Err(Error::Model("no triangles found in STL data".into()));
    }
    Ok(mesh)
}

// Faces referencing missing vertices are dropped.
fn from_indexed(indexed: &stl_io::IndexedMesh) -> TriangleMesh {
    let mut vertices = Vec::with_capacity(indexed.faces.len() * 3);
    for face in &indexed.faces {
        let corners: Option<Vec<Vec3>> = face
            .vertices
            .iter()
            .map(|&i| indexed.vertices.get(i).map(|v| Vec3::new(v[0], v[1], v[2])))
            .collect();
        if let Some(corners) = corners {
            vertices.extend(corners);
        }
    }
    TriangleMesh { vertices }
}
