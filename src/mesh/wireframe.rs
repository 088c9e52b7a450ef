//! Edge extraction for wireframe rendering.

use std::collections::BTreeSet;

use super::Mesh;

impl Mesh {
    /// Returns the unique undirected edges of the triangle list.
    ///
    /// Each edge is stored as `[low, high]` and the list is sorted, so a line
    /// renderer can draw it directly with no duplicate segments.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut edges = BTreeSet::new();
        for &[a, b, c] in &self.triangles {
            for (p, q) in [(a, b), (b, c), (c, a)] {
                edges.insert([p.min(q), p.max(q)]);
            }
        }
        edges.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::mesh::{Mesh, VertexAttribute};
    use glam::Vec3;

    #[test]
    fn test_shared_edge_counted_once() {
        let mesh = Mesh::new(
            vec![VertexAttribute::positions(vec![Vec3::ZERO; 4])],
            vec![[0, 1, 2], [1, 3, 2]],
        );

        let edges = mesh.edges();
        assert_eq!(edges, vec![[0, 1], [0, 2], [1, 2], [1, 3], [2, 3]]);
    }

    #[test]
    fn test_empty_mesh_has_no_edges() {
        assert!(Mesh::default().edges().is_empty());
    }
}
