//! Configuration for fault-line terrain generation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::MeshError;
use crate::pipeline::PipelineError;

/// Peak-to-trough height span after renormalization.
pub const HIGHEST_PEAK: f32 = 1.0;

/// Smallest grid that still has a cell to triangulate.
pub const MIN_GRID_SIZE: usize = 2;

/// Largest grid whose vertex indices all fit in `u32`.
pub const MAX_GRID_SIZE: usize = 65_535;

/// Errors that can occur during terrain generation.
#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("Grid size {0} is too small (minimum 2)")]
    GridTooSmall(usize),
    #[error("Grid size {0} is too large (maximum 65535)")]
    GridTooLarge(usize),
    #[error("Invalid highest peak: {0} (must be finite and > 0)")]
    InvalidPeak(f32),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("Generated terrain is malformed: {0}")]
    Mesh(#[from] MeshError),
}

/// Parameters for [`generate_terrain`](super::generate_terrain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Vertices per grid side (the grid has `grid_size^2` vertices).
    pub grid_size: usize,
    /// Number of random fault displacements to apply.
    pub fault_count: usize,
    /// Random seed for reproducible fault placement.
    pub seed: u64,
    /// Emit a UV attribute `(x/(n-1), y/(n-1))` after positions and normals.
    pub with_uv: bool,
    /// Height span after renormalization.
    pub highest_peak: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            grid_size: 64,
            fault_count: 100,
            seed: 42,
            with_uv: false,
            highest_peak: HIGHEST_PEAK,
        }
    }
}

impl TerrainConfig {
    /// Creates a configuration with the given grid size and fault count.
    pub fn new(grid_size: usize, fault_count: usize) -> Self {
        Self {
            grid_size,
            fault_count,
            ..Default::default()
        }
    }

    /// Same as [`TerrainConfig::new`], with texture coordinates enabled.
    pub fn textured(grid_size: usize, fault_count: usize) -> Self {
        Self {
            with_uv: true,
            ..Self::new(grid_size, fault_count)
        }
    }

    /// Returns this configuration with a different seed.
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Checks that the parameters describe a well-defined mesh.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(TerrainError::GridTooSmall(self.grid_size));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(TerrainError::GridTooLarge(self.grid_size));
        }
        if !self.highest_peak.is_finite() || self.highest_peak <= 0.0 {
            return Err(TerrainError::InvalidPeak(self.highest_peak));
        }
        Ok(())
    }

    /// Number of vertices the generated mesh will have.
    pub fn vertex_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Number of triangles the generated mesh will have.
    pub fn triangle_count(&self) -> usize {
        let cells = self.grid_size.saturating_sub(1);
        2 * cells * cells
    }
}
