//! Square vertex grid used while building a terrain mesh.

use glam::{Vec2, Vec3};

use crate::geometry::grid_index;
use crate::mesh::{Mesh, VertexAttribute};

/// A `size x size` grid of terrain vertices.
///
/// Vertex `(x, y)` lives at flat index `x * size + y` and starts at
/// `(x/size*2-1, y/size*2-1, 0)` with a zero normal. The grid only exists
/// while a mesh is being generated.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    /// Vertex positions; Z is the height.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals (zero until recomputed).
    pub normals: Vec<Vec3>,
}

impl Grid {
    /// Creates a flat grid with `size * size` vertices.
    pub fn new(size: usize) -> Self {
        debug_assert!(size >= 2);
        let scale = size as f32;
        let mut positions = Vec::with_capacity(size * size);
        for x in 0..size {
            for y in 0..size {
                positions.push(Vec3::new(
                    x as f32 / scale * 2.0 - 1.0,
                    y as f32 / scale * 2.0 - 1.0,
                    0.0,
                ));
            }
        }

        Self {
            size,
            normals: vec![Vec3::ZERO; positions.len()],
            positions,
        }
    }

    /// Vertices per side.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Flat index of `(x, y)`.
    pub fn index(&self, x: usize, y: usize) -> usize {
        grid_index(self.size, x, y)
    }

    /// Height (Z) of vertex `(x, y)`.
    pub fn height(&self, x: usize, y: usize) -> f32 {
        self.positions[self.index(x, y)].z
    }

    /// Sets the height (Z) of vertex `(x, y)`.
    pub fn set_height(&mut self, x: usize, y: usize, height: f32) {
        let i = self.index(x, y);
        self.positions[i].z = height;
    }

    /// Returns `(min, max)` over all heights.
    pub fn height_range(&self) -> (f32, f32) {
        self.positions
            .iter()
            .fold((f32::MAX, f32::MIN), |(min, max), p| (min.min(p.z), max.max(p.z)))
    }

    /// Iterates all `(x, y)` coordinates in index order.
    pub fn coords(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        (0..size).flat_map(move |x| (0..size).map(move |y| (x, y)))
    }

    /// Texture coordinate of `(x, y)`, spanning `[0, 1]` corner to corner.
    pub fn uv(&self, x: usize, y: usize) -> Vec2 {
        let last = (self.size - 1) as f32;
        Vec2::new(x as f32 / last, y as f32 / last)
    }

    /// Two triangles per cell, skipping the last row and column.
    ///
    /// Cell `(x, y)` yields `(x,y),(x+1,y),(x,y+1)` and
    /// `(x+1,y),(x+1,y+1),(x,y+1)`.
    pub fn triangles(&self) -> Vec<[u32; 3]> {
        let cells = self.size - 1;
        let mut triangles = Vec::with_capacity(2 * cells * cells);
        for x in 0..cells {
            for y in 0..cells {
                let here = self.index(x, y) as u32;
                let right = self.index(x + 1, y) as u32;
                let up = self.index(x, y + 1) as u32;
                let diagonal = self.index(x + 1, y + 1) as u32;

                triangles.push([here, right, up]);
                triangles.push([right, diagonal, up]);
            }
        }
        triangles
    }

    /// Converts the grid into a mesh: positions, normals and optionally UVs.
    pub fn into_mesh(self, with_uv: bool) -> Mesh {
        let triangles = self.triangles();
        let uvs: Option<Vec<Vec2>> =
            with_uv.then(|| self.coords().map(|(x, y)| self.uv(x, y)).collect());

        let mut attributes = vec![
            VertexAttribute::positions(self.positions),
            VertexAttribute::normals(self.normals),
        ];
        if let Some(uvs) = uvs {
            attributes.push(VertexAttribute::tex_coords(uvs));
        }

        Mesh::new(attributes, triangles)
    }
}
