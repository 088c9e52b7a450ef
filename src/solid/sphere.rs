//! Unit sphere swept from the bottom pole.

use glam::Vec3;

use crate::geometry::latitude_longitude;
use crate::mesh::{Mesh, VertexAttribute};

const BOTTOM: Vec3 = Vec3::new(0.0, 0.0, -1.0);
const TOP: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Index of slice `slice` on ring `ring` (1-based).
fn ring_vertex(ring: u32, slice: u32, slices: u32) -> u32 {
    1 + (ring - 1) * slices + slice % slices
}

/// Builds a unit sphere. Assumes `rings >= 1` and `slices >= 3`.
///
/// Vertex 0 is the bottom pole, followed by `rings` rings of `slices`
/// vertices from bottom to top, and the top pole last. Normals equal
/// positions.
pub fn sphere_mesh(rings: u32, slices: u32) -> Mesh {
    let vertex_count = 2 + (rings * slices) as usize;
    let mut positions = Vec::with_capacity(vertex_count);

    positions.push(BOTTOM);
    for ring in 1..=rings {
        for slice in 0..slices {
            let transform = latitude_longitude(ring, rings, slice, slices);
            positions.push(transform.transform_point3(BOTTOM));
        }
    }
    positions.push(TOP);

    let bottom = 0u32;
    let top = vertex_count as u32 - 1;
    let mut triangles = Vec::with_capacity((2 * slices + 2 * (rings - 1) * slices) as usize);

    for s in 0..slices {
        triangles.push([
            bottom,
            ring_vertex(1, s + 1, slices),
            ring_vertex(1, s, slices),
        ]);
    }

    for ring in 1..rings {
        for s in 0..slices {
            let a = ring_vertex(ring, s, slices);
            let b = ring_vertex(ring, s + 1, slices);
            let c = ring_vertex(ring + 1, s, slices);
            let d = ring_vertex(ring + 1, s + 1, slices);
            triangles.push([a, b, c]);
            triangles.push([b, d, c]);
        }
    }

    for s in 0..slices {
        triangles.push([
            top,
            ring_vertex(rings, s, slices),
            ring_vertex(rings, s + 1, slices),
        ]);
    }

    let normals = positions.clone();
    Mesh::new(
        vec![
            VertexAttribute::positions(positions),
            VertexAttribute::normals(normals),
        ],
        triangles,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_counts() {
        for (rings, slices) in [(1, 3), (2, 5), (7, 12), (16, 32)] {
            let mesh = sphere_mesh(rings, slices);
            assert_eq!(mesh.vertex_count(), (2 + rings * slices) as usize);
            assert_eq!(
                mesh.triangle_count(),
                (2 * slices + 2 * (rings - 1) * slices) as usize
            );
            assert!(mesh.validate().is_ok());
        }
    }

    #[test]
    fn test_poles() {
        let mesh = sphere_mesh(4, 6);
        let positions = mesh.positions().unwrap();
        assert_eq!(positions[0], BOTTOM);
        assert_eq!(positions[positions.len() - 1], TOP);
    }

    #[test]
    fn test_unit_positions_and_normals() {
        let mesh = sphere_mesh(9, 17);
        for (p, n) in mesh
            .positions()
            .unwrap()
            .iter()
            .zip(mesh.normals().unwrap())
        {
            assert!((p.length() - 1.0).abs() < 1e-5);
            assert!((*n - *p).length() < 1e-6);
        }
    }

    #[test]
    fn test_rings_climb() {
        let rings = 5;
        let slices = 4;
        let mesh = sphere_mesh(rings, slices);
        let positions = mesh.positions().unwrap();
        let mut last = -1.0;
        for ring in 1..=rings {
            let z = positions[ring_vertex(ring, 0, slices) as usize].z;
            assert!(z > last);
            for s in 1..slices {
                let other = positions[ring_vertex(ring, s, slices) as usize].z;
                assert!((other - z).abs() < 1e-5);
            }
            last = z;
        }
    }

    #[test]
    fn test_outward_winding() {
        let mesh = sphere_mesh(6, 10);
        let positions = mesh.positions().unwrap();
        for [a, b, c] in &mesh.triangles {
            let (pa, pb, pc) = (
                positions[*a as usize],
                positions[*b as usize],
                positions[*c as usize],
            );
            let face_normal = (pb - pa).cross(pc - pa);
            let centroid = (pa + pb + pc) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }
}
