//! Height renormalization, normal recomputation and the terrain entry point.

use crate::geometry::{neighbor_4, safe_normalize, DEGENERATE_LENGTH};
use crate::mesh::Mesh;
use crate::pipeline::Pipeline;

use super::config::{TerrainConfig, TerrainError};
use super::grid::Grid;

/// Rescales heights so they are centered on zero and span `highest_peak`:
/// `z' = (z - (max+min)/2) / (max-min) * highest_peak`.
///
/// A flat grid (`max - min <= EPSILON`) has no range to rescale; every
/// height is set to `0.0` instead. Returns `false` in that case.
pub fn renormalize_heights(grid: &mut Grid, highest_peak: f32) -> bool {
    let (min, max) = grid.height_range();
    let range = max - min;

    if !(range > f32::EPSILON) {
        log::warn!(
            "terrain height range is {range} (flat grid); clamping all heights to 0"
        );
        for position in &mut grid.positions {
            position.z = 0.0;
        }
        return false;
    }

    let mid = 0.5 * (max + min);
    for position in &mut grid.positions {
        position.z = (position.z - mid) / range * highest_peak;
    }
    true
}

/// Recomputes every normal from the four grid neighbors as
/// `normalize(cross(north - south, west - east))`.
///
/// Border vertices use themselves in place of a missing neighbor.
/// Returns how many normals were degenerate and fell back to up.
pub fn recompute_normals(grid: &mut Grid) -> usize {
    let size = grid.size();
    let mut degenerate = 0;

    for x in 0..size {
        for y in 0..size {
            let n = neighbor_4(size, x, y);
            let north = grid.positions[n.north];
            let south = grid.positions[n.south];
            let east = grid.positions[n.east];
            let west = grid.positions[n.west];

            let raw = (north - south).cross(west - east);
            if !raw.is_finite() || raw.length() < DEGENERATE_LENGTH {
                degenerate += 1;
            }
            let i = grid.index(x, y);
            grid.normals[i] = safe_normalize(raw);
        }
    }

    if degenerate > 0 {
        log::warn!("{degenerate} terrain normals were degenerate; used up vector");
    }
    degenerate
}

/// Generates a fault-displaced terrain mesh.
///
/// Runs the standard pipeline (faults, renormalize, normals) on a fresh grid
/// and returns positions, normals and, if requested, UVs.
///
/// # Errors
/// Returns [`TerrainError`] if the configuration is out of range.
pub fn generate_terrain(config: &TerrainConfig) -> Result<Mesh, TerrainError> {
    config.validate()?;

    let mut grid = Grid::new(config.grid_size);
    Pipeline::standard(config.clone()).run(&mut grid)?;

    let mesh = grid.into_mesh(config.with_uv);
    mesh.validate()?;

    log::debug!(
        "generated terrain: grid {}x{}, {} faults, {} vertices, {} triangles",
        config.grid_size,
        config.grid_size,
        config.fault_count,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
