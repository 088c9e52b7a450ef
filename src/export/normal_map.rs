//! RGB normal-map export for terrain meshes.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use glam::Vec3;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageBuffer, ImageEncoder, Rgb};

use crate::mesh::Mesh;

use super::{grid_side, ExportError};

/// Maps a unit normal from `[-1, 1]` to `[0, 255]` per channel.
pub fn encode_normal_rgb8(n: Vec3) -> [u8; 3] {
    let c = (n * 0.5) + Vec3::splat(0.5);
    [
        (c.x.clamp(0.0, 1.0) * 255.0) as u8,
        (c.y.clamp(0.0, 1.0) * 255.0) as u8,
        (c.z.clamp(0.0, 1.0) * 255.0) as u8,
    ]
}

/// Writes a terrain mesh's normals as an RGB PNG, using the same pixel
/// layout as [`export_heightmap_png`](super::export_heightmap_png).
pub fn export_normal_map_png(mesh: &Mesh, path: &Path) -> Result<(), ExportError> {
    let side = grid_side(mesh)?;
    let normals = mesh.normals()?;

    let mut img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(side, side);
    for x in 0..side {
        for y in 0..side {
            let n = normals[(x * side + y) as usize];
            img.put_pixel(x, side - 1 - y, Rgb(encode_normal_rgb8(n)));
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(img.as_raw(), side, side, image::ExtendedColorType::Rgb8)?;

    log::debug!("wrote {side}x{side} normal map to {}", path.display());
    Ok(())
}
