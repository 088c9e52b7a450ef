//! Random planar faults that raise one side of the grid and lower the other.

use glam::Vec3;
use rand::Rng;

use super::grid::Grid;

/// Displacement of fault `i` (0-based). Later faults move the surface less,
/// which gives the summed height field its fractal look.
pub fn fault_delta(i: usize) -> f32 {
    1.0 / (i as f32 + 5.0)
}

/// A vertical plane through `point` with horizontal normal `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fault {
    /// A point on the fault line, in `[-1, 1]^2 x {0}`.
    pub point: Vec3,
    /// Fault normal, in `[-1, 1]^2 x {0}` (not necessarily unit length).
    pub normal: Vec3,
}

impl Fault {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Picks a uniformly random point and normal in the XY square.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let point = Vec3::new(
            rng.random::<f32>() * 2.0 - 1.0,
            rng.random::<f32>() * 2.0 - 1.0,
            0.0,
        );
        let normal = Vec3::new(
            rng.random::<f32>() * 2.0 - 1.0,
            rng.random::<f32>() * 2.0 - 1.0,
            0.0,
        );
        Self { point, normal }
    }

    /// `+1.0` on the side the normal points to, `-1.0` otherwise.
    ///
    /// Only X and Y take part; the vertex's current height is ignored.
    pub fn side(&self, vertex: Vec3) -> f32 {
        let offset = Vec3::new(vertex.x - self.point.x, vertex.y - self.point.y, 0.0);
        if offset.dot(self.normal) > 0.0 {
            1.0
        } else {
            -1.0
        }
    }

    /// Moves every vertex up or down by `delta` depending on its side.
    pub fn apply(&self, grid: &mut Grid, delta: f32) {
        for position in &mut grid.positions {
            position.z += self.side(*position) * delta;
        }
    }
}

/// Applies `count` random faults in sequence, fault `i` with
/// [`fault_delta`]`(i)`.
pub fn apply_faults<R: Rng>(grid: &mut Grid, count: usize, rng: &mut R) {
    for i in 0..count {
        let fault = Fault::random(rng);
        fault.apply(grid, fault_delta(i));
    }
}
