//! Fail-safe vector normalization.

use glam::Vec3;

/// Fallback normal for degenerate input: +Z, the terrain's up direction.
pub const UP: Vec3 = Vec3::Z;

/// Vectors shorter than this are treated as zero-length.
pub const DEGENERATE_LENGTH: f32 = 1e-6;

/// Normalizes `v`, returning `fallback` when `v` is (near) zero or not finite.
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    let length = v.length();
    if !length.is_finite() || length < DEGENERATE_LENGTH {
        fallback
    } else {
        v / length
    }
}

/// Normalizes `v`, falling back to [`UP`].
pub fn safe_normalize(v: Vec3) -> Vec3 {
    normalize_or(v, UP)
}
