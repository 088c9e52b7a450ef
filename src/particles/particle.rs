//! A single simulated sphere.

use glam::{Mat4, Vec3, Vec4};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A sphere moving inside the simulation box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub radius: f32,
    pub position: Vec3,
    pub velocity: Vec3,
    /// RGBA, alpha always 1.
    pub color: Vec4,
}

impl Particle {
    /// A white particle at rest.
    pub fn new(radius: f32, position: Vec3) -> Self {
        Self {
            radius,
            position,
            velocity: Vec3::ZERO,
            color: Vec4::ONE,
        }
    }

    pub fn with_velocity(self, velocity: Vec3) -> Self {
        Self { velocity, ..self }
    }

    /// Random position in `[-half_extent, half_extent]^3`, zero velocity and
    /// a random opaque color.
    pub fn random<R: Rng>(radius: f32, half_extent: f32, rng: &mut R) -> Self {
        let mut coord = || (rng.random::<f32>() * 2.0 - 1.0) * half_extent;
        let position = Vec3::new(coord(), coord(), coord());
        let color = Vec4::new(rng.random(), rng.random(), rng.random(), 1.0);
        Self {
            radius,
            position,
            velocity: Vec3::ZERO,
            color,
        }
    }

    /// Mass of a uniform-density sphere, up to a constant factor.
    pub fn mass(&self) -> f32 {
        self.radius * self.radius * self.radius
    }

    pub fn inv_mass(&self) -> f32 {
        let mass = self.mass();
        if mass > 0.0 {
            1.0 / mass
        } else {
            0.0
        }
    }

    /// Scale by radius, then translate to position. Places the unit sphere
    /// mesh for this particle's draw call.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(self.radius))
    }
}

/// Spawns `count` random particles of equal radius.
pub fn spawn_batch<R: Rng>(count: usize, radius: f32, half_extent: f32, rng: &mut R) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle::random(radius, half_extent, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_inside_box() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for p in spawn_batch(200, 0.1, 1.0, &mut rng) {
            assert!(p.position.abs().max_element() <= 1.0);
            assert_eq!(p.velocity, Vec3::ZERO);
            assert_eq!(p.color.w, 1.0);
            assert!(p.color.truncate().max_element() <= 1.0);
        }
    }

    #[test]
    fn test_mass_scales_with_volume() {
        let small = Particle::new(0.1, Vec3::ZERO);
        let large = Particle::new(0.2, Vec3::ZERO);
        assert!((large.mass() / small.mass() - 8.0).abs() < 1e-4);
        assert!((small.inv_mass() * small.mass() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_model_matrix() {
        let p = Particle::new(0.5, Vec3::new(1.0, 2.0, 3.0));
        let m = p.model_matrix();
        let top = m.transform_point3(Vec3::Z);
        assert!((top - Vec3::new(1.0, 2.0, 3.5)).length() < 1e-6);
        assert!((m.transform_point3(Vec3::ZERO) - p.position).length() < 1e-6);
    }
}
