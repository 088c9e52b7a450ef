//! Geometry helpers shared by the generators.
//!
//! Grid neighbor lookup, fail-safe normalization and the homogeneous
//! transforms used by rotation sweeps.

pub mod neighbors;
mod normal;
mod sweep;

pub use neighbors::{grid_index, neighbor_4, neighbor_clamped, Neighbors4};
pub use normal::{normalize_or, safe_normalize, DEGENERATE_LENGTH, UP};
pub use sweep::{latitude_longitude, orbit, sweep_angle, tube};
