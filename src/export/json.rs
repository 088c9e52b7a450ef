//! JSON mesh export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::mesh::Mesh;

use super::ExportError;

/// Writes `mesh` as pretty-printed JSON. The file deserializes back into an
/// identical [`Mesh`].
pub fn export_mesh_json(mesh: &Mesh, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, mesh)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{generate_terrain, TerrainConfig};
    use tempfile::tempdir;

    #[test]
    fn test_export_mesh_json() {
        let mesh = generate_terrain(&TerrainConfig::textured(5, 7)).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("terrain.json");
        export_mesh_json(&mesh, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let loaded: Mesh = serde_json::from_str(&text).unwrap();
        assert_eq!(loaded.vertex_count(), 25);
        assert_eq!(loaded.triangles, mesh.triangles);
        assert_eq!(loaded.attributes.len(), 3);
    }
}
