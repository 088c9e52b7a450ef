//! Parameters for parametric solids.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::MeshError;

/// Fewest latitude rings a sphere can have.
pub const MIN_RINGS: u32 = 1;

/// Fewest slices that still enclose a volume.
pub const MIN_SLICES: u32 = 3;

/// Errors that can occur while generating a solid.
#[derive(Error, Debug)]
pub enum SolidError {
    #[error("Ring count {0} is too small (minimum 1)")]
    TooFewRings(u32),
    #[error("Slice count {0} is too small (minimum 3)")]
    TooFewSlices(u32),
    #[error("Solid would have {0} vertices, more than a u32 index can address")]
    TooManyVertices(u64),
    #[error("Generated solid is malformed: {0}")]
    Mesh(#[from] MeshError),
}

/// Which sweep to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolidKind {
    /// Unit sphere with poles on the Z axis.
    #[default]
    Sphere,
    /// Torus around the Z axis.
    Torus,
}

impl SolidKind {
    pub fn name(&self) -> &'static str {
        match self {
            SolidKind::Sphere => "sphere",
            SolidKind::Torus => "torus",
        }
    }
}

/// Parameters for [`generate_solid`](super::generate_solid).
///
/// For a sphere, `rings` counts latitude rings between the poles. For a
/// torus, `rings` counts points around the tube and `slices` counts tube
/// cross-sections around the Z axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolidConfig {
    pub kind: SolidKind,
    pub rings: u32,
    pub slices: u32,
}

impl Default for SolidConfig {
    fn default() -> Self {
        Self {
            kind: SolidKind::Sphere,
            rings: 16,
            slices: 32,
        }
    }
}

impl SolidConfig {
    pub fn sphere(rings: u32, slices: u32) -> Self {
        Self {
            kind: SolidKind::Sphere,
            rings,
            slices,
        }
    }

    pub fn torus(rings: u32, slices: u32) -> Self {
        Self {
            kind: SolidKind::Torus,
            rings,
            slices,
        }
    }

    /// Number of vertices the generated mesh will have.
    pub fn vertex_count(&self) -> u64 {
        let grid = self.rings as u64 * self.slices as u64;
        match self.kind {
            SolidKind::Sphere => grid + 2,
            SolidKind::Torus => grid,
        }
    }

    /// Number of triangles the generated mesh will have.
    pub fn triangle_count(&self) -> u64 {
        let slices = self.slices as u64;
        let rings = self.rings as u64;
        match self.kind {
            SolidKind::Sphere => 2 * slices + 2 * rings.saturating_sub(1) * slices,
            SolidKind::Torus => 2 * rings * slices,
        }
    }

    /// Rejects counts below the minimums, or too large to index with `u32`.
    pub fn validate(&self) -> Result<(), SolidError> {
        if self.rings < MIN_RINGS {
            return Err(SolidError::TooFewRings(self.rings));
        }
        if self.slices < MIN_SLICES {
            return Err(SolidError::TooFewSlices(self.slices));
        }
        let vertices = self.vertex_count();
        if vertices > u32::MAX as u64 {
            return Err(SolidError::TooManyVertices(vertices));
        }
        Ok(())
    }
}
