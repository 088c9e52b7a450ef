//! Mesh, vertex attribute arrays and invariant checks.

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`Mesh::validate`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Attribute '{kind}' has {got} entries, expected {expected}")]
    AttributeLengthMismatch {
        kind: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("Attribute '{kind}' has a non-finite value at vertex {vertex}")]
    NonFinite { kind: &'static str, vertex: usize },
    #[error("Mesh has no '{0}' attribute")]
    MissingAttribute(&'static str),
}

/// What an attribute array describes. Purely descriptive; the backend binds
/// arrays by their position in [`Mesh::attributes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Position,
    Normal,
    TexCoord,
    Color,
}

impl AttributeKind {
    /// Returns a short lowercase name (e.g. "position").
    pub const fn name(self) -> &'static str {
        match self {
            AttributeKind::Position => "position",
            AttributeKind::Normal => "normal",
            AttributeKind::TexCoord => "texcoord",
            AttributeKind::Color => "color",
        }
    }
}

/// One float vector per vertex, arity 1 to 4.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeData {
    Float(Vec<f32>),
    Vec2(Vec<Vec2>),
    Vec3(Vec<Vec3>),
    Vec4(Vec<Vec4>),
}

impl AttributeData {
    /// Number of vertices described by this array.
    pub fn len(&self) -> usize {
        match self {
            AttributeData::Float(v) => v.len(),
            AttributeData::Vec2(v) => v.len(),
            AttributeData::Vec3(v) => v.len(),
            AttributeData::Vec4(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Components per vertex.
    pub const fn arity(&self) -> usize {
        match self {
            AttributeData::Float(_) => 1,
            AttributeData::Vec2(_) => 2,
            AttributeData::Vec3(_) => 3,
            AttributeData::Vec4(_) => 4,
        }
    }

    /// Tightly packed component bytes, ready for a vertex buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AttributeData::Float(v) => bytemuck::cast_slice(v),
            AttributeData::Vec2(v) => bytemuck::cast_slice(v),
            AttributeData::Vec3(v) => bytemuck::cast_slice(v),
            AttributeData::Vec4(v) => bytemuck::cast_slice(v),
        }
    }

    /// Components of vertex `i` as a slice of `arity()` floats.
    pub fn components(&self, i: usize) -> &[f32] {
        match self {
            AttributeData::Float(v) => std::slice::from_ref(&v[i]),
            AttributeData::Vec2(v) => bytemuck::cast_slice(std::slice::from_ref(&v[i])),
            AttributeData::Vec3(v) => bytemuck::cast_slice(std::slice::from_ref(&v[i])),
            AttributeData::Vec4(v) => bytemuck::cast_slice(std::slice::from_ref(&v[i])),
        }
    }

    /// Index of the first vertex with a NaN or infinite component.
    fn first_non_finite(&self) -> Option<usize> {
        (0..self.len()).find(|&i| self.components(i).iter().any(|c| !c.is_finite()))
    }
}

/// A named per-vertex attribute array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexAttribute {
    pub kind: AttributeKind,
    pub data: AttributeData,
}

impl VertexAttribute {
    pub fn new(kind: AttributeKind, data: AttributeData) -> Self {
        Self { kind, data }
    }

    pub fn positions(data: Vec<Vec3>) -> Self {
        Self::new(AttributeKind::Position, AttributeData::Vec3(data))
    }

    pub fn normals(data: Vec<Vec3>) -> Self {
        Self::new(AttributeKind::Normal, AttributeData::Vec3(data))
    }

    pub fn tex_coords(data: Vec<Vec2>) -> Self {
        Self::new(AttributeKind::TexCoord, AttributeData::Vec2(data))
    }
}

/// Vertex attributes plus a triangulated index list.
///
/// Invariants (checked by [`Mesh::validate`]):
/// - every attribute array has the same length, the vertex count;
/// - every triangle index is below the vertex count;
/// - no attribute holds NaN or infinity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub attributes: Vec<VertexAttribute>,
    pub triangles: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a mesh from attribute arrays and triangles.
    pub fn new(attributes: Vec<VertexAttribute>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            attributes,
            triangles,
        }
    }

    /// Number of vertices (length of the first attribute array).
    pub fn vertex_count(&self) -> usize {
        self.attributes.first().map(|a| a.data.len()).unwrap_or(0)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the first attribute of the given kind.
    pub fn attribute(&self, kind: AttributeKind) -> Option<&AttributeData> {
        self.attributes
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| &a.data)
    }

    /// Returns the 3-component attribute of the given kind, if present.
    pub fn vec3_attribute(&self, kind: AttributeKind) -> Option<&[Vec3]> {
        match self.attribute(kind) {
            Some(AttributeData::Vec3(v)) => Some(v),
            _ => None,
        }
    }

    /// Vertex positions.
    pub fn positions(&self) -> Result<&[Vec3], MeshError> {
        self.vec3_attribute(AttributeKind::Position)
            .ok_or(MeshError::MissingAttribute(AttributeKind::Position.name()))
    }

    /// Vertex normals.
    pub fn normals(&self) -> Result<&[Vec3], MeshError> {
        self.vec3_attribute(AttributeKind::Normal)
            .ok_or(MeshError::MissingAttribute(AttributeKind::Normal.name()))
    }

    /// Texture coordinates, if the mesh carries them.
    pub fn tex_coords(&self) -> Option<&[Vec2]> {
        match self.attribute(AttributeKind::TexCoord) {
            Some(AttributeData::Vec2(v)) => Some(v),
            _ => None,
        }
    }

    /// Flattened index list as bytes (three `u32` per triangle).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }

    /// Checks the mesh invariants.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertex_count = self.vertex_count();

        for attribute in &self.attributes {
            let got = attribute.data.len();
            if got != vertex_count {
                return Err(MeshError::AttributeLengthMismatch {
                    kind: attribute.kind.name(),
                    expected: vertex_count,
                    got,
                });
            }
            if let Some(vertex) = attribute.data.first_non_finite() {
                return Err(MeshError::NonFinite {
                    kind: attribute.kind.name(),
                    vertex,
                });
            }
        }

        for (triangle, indices) in self.triangles.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(MeshError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::new(
            vec![
                VertexAttribute::positions(vec![
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(1.0, 0.0, 0.0),
                    Vec3::new(0.0, 1.0, 0.0),
                    Vec3::new(1.0, 1.0, 0.0),
                ]),
                VertexAttribute::normals(vec![Vec3::Z; 4]),
            ],
            vec![[0, 1, 2], [1, 3, 2]],
        )
    }

    #[test]
    fn test_valid_mesh() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_length_mismatch() {
        let mut mesh = quad();
        mesh.attributes[1] = VertexAttribute::normals(vec![Vec3::Z; 3]);

        let err = mesh.validate().unwrap_err();
        assert_eq!(
            err,
            MeshError::AttributeLengthMismatch {
                kind: "normal",
                expected: 4,
                got: 3,
            }
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let mut mesh = quad();
        mesh.triangles.push([0, 2, 4]);

        let err = mesh.validate().unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfRange {
                triangle: 2,
                index: 4,
                vertex_count: 4
            }
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let mut mesh = quad();
        mesh.attributes[1] = VertexAttribute::normals(vec![
            Vec3::Z,
            Vec3::Z,
            Vec3::new(f32::NAN, 0.0, 1.0),
            Vec3::Z,
        ]);

        let err = mesh.validate().unwrap_err();
        assert_eq!(err, MeshError::NonFinite { kind: "normal", vertex: 2 });
    }

    #[test]
    fn test_byte_views() {
        let mesh = quad();
        let positions = mesh.attribute(AttributeKind::Position).unwrap();
        assert_eq!(positions.arity(), 3);
        assert_eq!(positions.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(positions.components(3), &[1.0, 1.0, 0.0]);
        assert_eq!(mesh.index_bytes().len(), 2 * 3 * 4);
    }

    #[test]
    fn test_missing_attribute() {
        let mesh = Mesh::new(
            vec![VertexAttribute::positions(vec![Vec3::ZERO])],
            Vec::new(),
        );
        assert!(mesh.normals().is_err());
        assert!(mesh.tex_coords().is_none());
        assert_eq!(mesh.positions().unwrap().len(), 1);
    }

    #[test]
    fn test_serde_roundtrip_keeps_layout() {
        let mesh = quad();
        let json = serde_json::to_string(&mesh).unwrap();
        assert!(json.contains("\"position\""));
        let back: Mesh = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mesh);
    }
}
