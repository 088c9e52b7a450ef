//! Torus swept around the vertical axis.

use glam::Vec3;

use crate::geometry::{normalize_or, orbit, tube};
use crate::mesh::{Mesh, VertexAttribute};

/// Distance from the origin to every tube center.
pub const TORUS_RADIUS: f32 = 1.0;

/// Tube radius.
pub const TORUS_THICKNESS: f32 = 0.3;

/// Builds a torus around Z. Assumes `rings >= 1` and `slices >= 3`.
///
/// Vertex `(slice, ring)` lives at `slice * rings + ring`. The normal is the
/// unit vector from the vertex toward its slice center. Both indices wrap.
pub fn torus_mesh(rings: u32, slices: u32) -> Mesh {
    let vertex_count = (rings * slices) as usize;
    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);

    for slice in 0..slices {
        let frame = orbit(slice, slices, TORUS_RADIUS);
        let center = frame.transform_point3(Vec3::ZERO);
        for ring in 0..rings {
            let point = tube(frame, ring, rings, TORUS_THICKNESS).transform_point3(Vec3::ZERO);
            positions.push(point);
            normals.push(normalize_or(center - point, Vec3::Z));
        }
    }

    let index = |slice: u32, ring: u32| (slice % slices) * rings + ring % rings;
    let mut triangles = Vec::with_capacity(2 * vertex_count);
    for i in 0..slices {
        for j in 0..rings {
            let a = index(i, j);
            let b = index(i + 1, j);
            let c = index(i, j + 1);
            let d = index(i + 1, j + 1);
            triangles.push([a, c, d]);
            triangles.push([a, d, b]);
        }
    }

    Mesh::new(
        vec![
            VertexAttribute::positions(positions),
            VertexAttribute::normals(normals),
        ],
        triangles,
    )
}
