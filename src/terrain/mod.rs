//! Fault-line terrain generation.
//!
//! Builds a square vertex grid, displaces it with random planar faults,
//! renormalizes the height range and recomputes normals from grid
//! neighbors. The grid is discarded once the [`Mesh`](crate::mesh::Mesh) is
//! produced.

mod config;
mod fault;
mod grid;
mod heightmap;

pub use config::{TerrainConfig, TerrainError, HIGHEST_PEAK, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use fault::{apply_faults, fault_delta, Fault};
pub use grid::Grid;
pub use heightmap::{generate_terrain, recompute_normals, renormalize_heights};
