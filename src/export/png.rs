//! 16-bit grayscale heightmap export for terrain meshes.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Luma};

use crate::mesh::Mesh;
use crate::terrain::HIGHEST_PEAK;

use super::{grid_side, ExportError};

/// Options for heightmap export.
#[derive(Debug, Clone)]
pub struct PngExportOptions {
    /// Height mapped to black.
    pub min_height: f32,
    /// Height mapped to white.
    pub max_height: f32,
    pub compression: CompressionType,
    pub filter: FilterType,
}

impl Default for PngExportOptions {
    /// The span of a renormalized terrain with the default peak.
    fn default() -> Self {
        Self::for_peak(HIGHEST_PEAK)
    }
}

impl PngExportOptions {
    /// Range `[-peak/2, peak/2]`, which renormalized terrain always fills.
    pub fn for_peak(highest_peak: f32) -> Self {
        Self {
            min_height: -0.5 * highest_peak,
            max_height: 0.5 * highest_peak,
            compression: CompressionType::Default,
            filter: FilterType::Adaptive,
        }
    }

    /// Creates options with the height range taken from the mesh.
    pub fn auto_range(mesh: &Mesh) -> Result<Self, ExportError> {
        let (min, max) = mesh
            .positions()?
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.z), hi.max(p.z)));
        Ok(Self {
            min_height: min,
            max_height: max,
            ..Default::default()
        })
    }
}

/// Exports the Z of a terrain mesh as a 16-bit PNG heightmap.
///
/// Grid vertex `(x, y)` becomes pixel `(x, side - 1 - y)` so +Y points up in
/// the image. Heights outside the option range are clamped.
pub fn export_heightmap_png(
    mesh: &Mesh,
    path: &Path,
    options: &PngExportOptions,
) -> Result<(), ExportError> {
    let min = options.min_height;
    let max = options.max_height;
    if !(min < max) {
        return Err(ExportError::InvalidHeightRange(min, max));
    }

    let side = grid_side(mesh)?;
    let positions = mesh.positions()?;
    let range = max - min;

    let mut img: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::new(side, side);
    for x in 0..side {
        for y in 0..side {
            let height = positions[(x * side + y) as usize].z;
            let normalized = ((height - min) / range).clamp(0.0, 1.0);
            let value = (normalized * 65535.0) as u16;
            img.put_pixel(x, side - 1 - y, Luma([value]));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, options.compression, options.filter);

    let byte_slice: &[u8] = bytemuck::cast_slice(img.as_raw());
    encoder.write_image(byte_slice, side, side, image::ExtendedColorType::L16)?;

    log::debug!("wrote {side}x{side} heightmap to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solid::{generate_solid, SolidConfig};
    use crate::terrain::{generate_terrain, TerrainConfig};
    use tempfile::tempdir;

    #[test]
    fn test_export_heightmap_png() {
        let mesh = generate_terrain(&TerrainConfig::new(32, 50)).unwrap();
        let dir = tempdir().unwrap();
        let path = dir.path().join("height.png");

        export_heightmap_png(&mesh, &path, &PngExportOptions::default()).unwrap();

        let img = image::open(&path).unwrap().into_luma16();
        assert_eq!(img.dimensions(), (32, 32));
        let values: Vec<u16> = img.pixels().map(|p| p.0[0]).collect();
        // Renormalized terrain fills the default range.
        assert!(values.iter().copied().max().unwrap() >= 65534);
        assert!(values.iter().copied().min().unwrap() <= 1);
    }

    #[test]
    fn test_auto_range() {
        let mesh = generate_terrain(&TerrainConfig::new(8, 10)).unwrap();
        let options = PngExportOptions::auto_range(&mesh).unwrap();
        assert!((options.max_height - options.min_height - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_rejects_non_grid_mesh() {
        let sphere = generate_solid(&SolidConfig::sphere(3, 5)).unwrap();
        let dir = tempdir().unwrap();
        let result = export_heightmap_png(
            &sphere,
            &dir.path().join("sphere.png"),
            &PngExportOptions::default(),
        );
        assert!(matches!(result, Err(ExportError::NotAGrid(_))));
    }

    #[test]
    fn test_rejects_empty_range() {
        let mesh = generate_terrain(&TerrainConfig::new(4, 0)).unwrap();
        let options = PngExportOptions {
            min_height: 0.0,
            max_height: 0.0,
            ..Default::default()
        };
        let dir = tempdir().unwrap();
        let result = export_heightmap_png(&mesh, &dir.path().join("flat.png"), &options);
        assert!(matches!(result, Err(ExportError::InvalidHeightRange(..))));
    }
}
