// CPU-side vertex generation for boxes, guides and the reference mesh.

use crate::scene::{BoxNode, MeshNode};
use buildvolume_core::{AxisGuide, GridSpec, Rgb, TriangleMesh};
use fnv::FnvHashMap;
use glam::{Vec3, Vec4};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

#[inline]
fn rgba(color: Rgb, alpha: f32) -> [f32; 4] {
    [color.r, color.g, color.b, alpha]
}

#[inline]
fn line(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, color: [f32; 4]) {
    out.push(LineVertex {
        position: a.to_array(),
        color,
    });
    out.push(LineVertex {
        position: b.to_array(),
        color,
    });
}

/// World-space `(min, max)` of a box node. Scaling is about the base center,
/// so a flattened box keeps its footprint on the ground.
pub fn box_extent(node: &BoxNode) -> (Vec3, Vec3) {
    let size = node.size * node.scale;
    let half = Vec3::new(size.x * 0.5, size.y * 0.5, 0.0);
    let min = node.position - half;
    let max = node.position + Vec3::new(half.x, half.y, size.z);
    (min, max)
}

// Faces as (normal, four corner indices wound counter-clockwise from outside).
// Corner index bits: x = bit 0, y = bit 1, z = bit 2.
const FACES: [([f32; 3], [usize; 4]); 6] = [
    ([0.0, 0.0, -1.0], [0, 2, 3, 1]),
    ([0.0, 0.0, 1.0], [4, 5, 7, 6]),
    ([0.0, -1.0, 0.0], [0, 1, 5, 4]),
    ([0.0, 1.0, 0.0], [2, 6, 7, 3]),
    ([-1.0, 0.0, 0.0], [0, 4, 6, 2]),
    ([1.0, 0.0, 0.0], [1, 3, 7, 5]),
];

const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

fn corners(min: Vec3, max: Vec3) -> [Vec3; 8] {
    let mut out = [Vec3::ZERO; 8];
    for (i, c) in out.iter_mut().enumerate() {
        *c = Vec3::new(
            if i & 1 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 4 == 0 { min.z } else { max.z },
        );
    }
    out
}

/// Translucent fill: 12 triangles.
pub fn push_box_fill(out: &mut Vec<LitVertex>, node: &BoxNode) {
    let (min, max) = box_extent(node);
    let c = corners(min, max);
    let color = rgba(node.style.fill_color, node.style.fill_opacity);
    for (normal, idx) in FACES {
        for i in [0, 1, 2, 0, 2, 3] {
            out.push(LitVertex {
                position: c[idx[i]].to_array(),
                normal,
                color,
            });
        }
    }
}

/// Outline: 12 line segments.
pub fn push_box_edges(out: &mut Vec<LineVertex>, node: &BoxNode) {
    let (min, max) = box_extent(node);
    let c = corners(min, max);
    let color = rgba(node.style.edge_color, node.style.edge_opacity);
    for (a, b) in EDGES {
        line(out, c[a], c[b], color);
    }
}

/// Ground grid on `z = 0` centered at the origin. The two center lines use
/// the major color, the rest the minor color.
pub fn grid_lines(spec: GridSpec, major: Rgb, minor: Rgb) -> Vec<LineVertex> {
    let divisions = spec.divisions.max(1);
    let half = spec.size * 0.5;
    let step = spec.size / divisions as f32;
    let center = divisions / 2;
    let mut out = Vec::with_capacity((divisions as usize + 1) * 4);
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if i == center {
            rgba(major, 1.0)
        } else {
            rgba(minor, 1.0)
        };
        line(&mut out, Vec3::new(-half, k, 0.0), Vec3::new(half, k, 0.0), color);
        line(&mut out, Vec3::new(k, -half, 0.0), Vec3::new(k, half, 0.0), color);
    }
    out
}

/// X/Y/Z arrows from the origin with wire arrowheads.
pub fn axis_lines(guide: AxisGuide, colors: [Rgb; 3]) -> Vec<LineVertex> {
    let mut out = Vec::with_capacity(3 * 10);
    let dirs = [Vec3::X, Vec3::Y, Vec3::Z];
    for (dir, color) in dirs.into_iter().zip(colors) {
        let color = rgba(color, 1.0);
        let tip = dir * guide.length;
        let base = dir * (guide.length - guide.head_length);
        line(&mut out, Vec3::ZERO, base, color);
        let side_a = dir.any_orthonormal_vector();
        let side_b = dir.cross(side_a);
        let r = guide.head_width * 0.5;
        for side in [side_a, -side_a, side_b, -side_b] {
            line(&mut out, tip, base + side * r, color);
        }
    }
    out
}

#[inline]
fn transform(node: &MeshNode, v: Vec3) -> Vec3 {
    node.position + v * node.scale
}

/// Lit triangles for the reference mesh with flat normals.
pub fn mesh_vertices(node: &MeshNode) -> Vec<LitVertex> {
    let color = rgba(node.style.fill_color, node.style.fill_opacity);
    let normals = node.mesh.flat_normals();
    node.mesh
        .vertices
        .iter()
        .zip(normals)
        .map(|(v, n)| LitVertex {
            position: transform(node, *v).to_array(),
            normal: n.to_array(),
            color,
        })
        .collect()
}

/// Mesh edges whose neighbouring faces meet at more than `threshold_deg`,
/// plus open (boundary) edges. Vertices are welded on a 1e-4 grid.
pub fn feature_edges(mesh: &TriangleMesh, threshold_deg: f32) -> Vec<(Vec3, Vec3)> {
    type Key = [i64; 3];
    let key = |v: Vec3| -> Key {
        let q = (v * 1e4).round();
        [q.x as i64, q.y as i64, q.z as i64]
    };
    let cos_threshold = threshold_deg.to_radians().cos();
    let mut open: FnvHashMap<(Key, Key), (Vec3, Vec3, Vec3)> = FnvHashMap::default();
    let mut out = Vec::new();
    for tri in mesh.vertices.chunks_exact(3) {
        let normal = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
        if normal == Vec3::ZERO {
            continue;
        }
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let (ka, kb) = (key(a), key(b));
            if ka == kb {
                continue;
            }
            let edge = if ka < kb { (ka, kb) } else { (kb, ka) };
            match open.remove(&edge) {
                Some((pa, pb, other)) => {
                    if normal.dot(other) <= cos_threshold {
                        out.push((pa, pb));
                    }
                }
                None => {
                    open.insert(edge, (a, b, normal));
                }
            }
        }
    }
    out.extend(open.into_values().map(|(a, b, _)| (a, b)));
    out
}

/// Outline segments for the reference mesh, transformed into the world.
pub fn mesh_edge_lines(node: &MeshNode, edges: &[(Vec3, Vec3)]) -> Vec<LineVertex> {
    let color = rgba(node.style.edge_color, node.style.edge_opacity);
    let mut out = Vec::with_capacity(edges.len() * 2);
    for (a, b) in edges {
        line(&mut out, transform(node, *a), transform(node, *b), color);
    }
    out
}

/// Linear color to the clear value wgpu expects.
#[inline]
pub fn clear_color(color: Rgb) -> Vec4 {
    Vec4::new(color.r, color.g, color.b, 1.0)
}
