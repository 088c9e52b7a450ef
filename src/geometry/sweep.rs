//! Homogeneous transforms for rotation sweeps.
//!
//! Every vertex transform is composed from its own ring/slice index
//! (`index * step`), never by multiplying the previous vertex's matrix by
//! another step, so rounding error does not accumulate along a sweep.

use glam::{Mat4, Vec3};
use std::f32::consts::{PI, TAU};

/// Angle of sweep position `index` when a full turn of `full` radians is cut
/// into `count` equal steps.
#[inline]
pub fn sweep_angle(index: u32, count: u32, full: f32) -> f32 {
    debug_assert!(count > 0);
    full * index as f32 / count as f32
}

/// Latitude transform for ring `ring` (1-based) of a pole-to-pole sweep with
/// `rings` intermediate rings, followed by the longitude rotation for `slice`.
///
/// Applied to the bottom pole `(0, 0, -1)`, ring `r` sits at latitude angle
/// `r * PI / (rings + 1)` above it.
pub fn latitude_longitude(ring: u32, rings: u32, slice: u32, slices: u32) -> Mat4 {
    let latitude = sweep_angle(ring, rings + 1, PI);
    let longitude = sweep_angle(slice, slices, TAU);
    Mat4::from_rotation_z(longitude) * Mat4::from_rotation_x(latitude)
}

/// Places a tube center: translate out by `radius` along X, then rotate about
/// the vertical (Z) axis. Rotating first would leave the center on the X axis.
pub fn orbit(slice: u32, slices: u32, radius: f32) -> Mat4 {
    let angle = sweep_angle(slice, slices, TAU);
    Mat4::from_rotation_z(angle) * Mat4::from_translation(Vec3::new(radius, 0.0, 0.0))
}

/// Places a tube point relative to its slice frame: translate out by
/// `thickness`, then rotate about the slice's local ring axis (Y).
pub fn tube(slice_frame: Mat4, ring: u32, rings: u32, thickness: f32) -> Mat4 {
    let angle = sweep_angle(ring, rings, TAU);
    slice_frame
        * Mat4::from_rotation_y(angle)
        * Mat4::from_translation(Vec3::new(thickness, 0.0, 0.0))
}
