//! Wavefront OBJ export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::mesh::Mesh;

use super::ExportError;

/// Writes `mesh` as OBJ text: `v`, then `vn` and `vt` when present, then
/// 1-based `f` records.
pub fn write_obj<W: Write>(mesh: &Mesh, out: &mut W) -> Result<(), ExportError> {
    let positions = mesh.positions()?;
    let normals = mesh.normals().ok();
    let tex_coords = mesh.tex_coords();

    writeln!(
        out,
        "# procmesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    for p in positions {
        writeln!(out, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for n in normals.unwrap_or_default() {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for t in tex_coords.unwrap_or_default() {
        writeln!(out, "vt {} {}", t.x, t.y)?;
    }

    for triangle in &mesh.triangles {
        write!(out, "f")?;
        for &i in triangle {
            let i = i + 1;
            match (normals.is_some(), tex_coords.is_some()) {
                (true, true) => write!(out, " {i}/{i}/{i}")?,
                (true, false) => write!(out, " {i}//{i}")?,
                (false, true) => write!(out, " {i}/{i}")?,
                (false, false) => write!(out, " {i}")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes `mesh` to an OBJ file at `path`.
pub fn export_mesh_obj(mesh: &Mesh, path: &Path) -> Result<(), ExportError> {
    mesh.validate()?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    log::debug!("wrote OBJ to {}", path.display());
    Ok(())
}
