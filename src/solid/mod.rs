//! Parametric solids: a unit sphere and a torus, both built by sweeping
//! points with composed 4x4 transforms.

mod config;
mod sphere;
mod torus;

pub use config::{SolidConfig, SolidError, SolidKind, MIN_RINGS, MIN_SLICES};
pub use sphere::sphere_mesh;
pub use torus::{torus_mesh, TORUS_RADIUS, TORUS_THICKNESS};

use crate::mesh::Mesh;

/// Generates a sphere or torus mesh with position and normal attributes.
///
/// # Errors
/// Returns [`SolidError`] if `rings < 1`, `slices < 3`, or the vertex count
/// does not fit a `u32` index.
pub fn generate_solid(config: &SolidConfig) -> Result<Mesh, SolidError> {
    config.validate()?;

    let mesh = match config.kind {
        SolidKind::Sphere => sphere_mesh(config.rings, config.slices),
        SolidKind::Torus => torus_mesh(config.rings, config.slices),
    };
    mesh.validate()?;

    log::debug!(
        "generated {}: {} rings, {} slices, {} vertices, {} triangles",
        config.kind.name(),
        config.rings,
        config.slices,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
