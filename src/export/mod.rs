//! Writers for generated meshes: Wavefront OBJ, JSON, and 16-bit heightmap
//! and RGB normal-map PNGs for terrain grids.

mod json;
mod normal_map;
mod obj;
mod png;

pub use json::export_mesh_json;
pub use normal_map::{encode_normal_rgb8, export_normal_map_png};
pub use obj::{export_mesh_obj, write_obj};
pub use png::{export_heightmap_png, PngExportOptions};

use thiserror::Error;

use crate::mesh::{Mesh, MeshError};

/// Errors that can occur during export.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error("Mesh with {0} vertices is not a square terrain grid")]
    NotAGrid(usize),
    #[error("Invalid height range: min ({0}) >= max ({1})")]
    InvalidHeightRange(f32, f32),
}

/// XY distance a position may drift from its grid slot and still count.
const GRID_TOLERANCE: f32 = 1e-5;

/// Side length of the square grid a terrain mesh was built from.
///
/// Fails unless the vertex count is `n * n` with `n >= 2` and vertex
/// `x * n + y` sits at `(x/n*2-1, y/n*2-1)` in XY.
pub fn grid_side(mesh: &Mesh) -> Result<u32, ExportError> {
    let count = mesh.vertex_count();
    let mut side = (count as f64).sqrt().round() as usize;
    while side * side > count {
        side -= 1;
    }
    if side < 2 || side * side != count || side > u32::MAX as usize {
        return Err(ExportError::NotAGrid(count));
    }

    let positions = mesh.positions()?;
    let scale = side as f32;
    for x in 0..side {
        for y in 0..side {
            let p = positions[x * side + y];
            let expected_x = x as f32 / scale * 2.0 - 1.0;
            let expected_y = y as f32 / scale * 2.0 - 1.0;
            if (p.x - expected_x).abs() > GRID_TOLERANCE
                || (p.y - expected_y).abs() > GRID_TOLERANCE
            {
                return Err(ExportError::NotAGrid(count));
            }
        }
    }
    Ok(side as u32)
}
