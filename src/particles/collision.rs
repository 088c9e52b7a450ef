//! Stepping, sphere-sphere contacts and wall bounces.

use glam::Vec3;

use crate::geometry::{normalize_or, UP};

use super::config::PhysicsConfig;
use super::particle::Particle;

/// What one [`advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepReport {
    /// Time step actually integrated, after clamping.
    pub applied_dt: f32,
    /// Overlapping pairs found this step.
    pub contacts: usize,
}

/// Clamps a frame delta to `[0, max_time_step]`. NaN and negative deltas
/// become zero.
pub fn clamp_time_step(delta_time: f32, max_time_step: f32) -> f32 {
    if delta_time.is_nan() || delta_time <= 0.0 {
        0.0
    } else {
        delta_time.min(max_time_step)
    }
}

/// True when the two spheres overlap.
pub fn is_colliding(a: &Particle, b: &Particle) -> bool {
    let reach = a.radius + b.radius;
    a.position.distance_squared(b.position) < reach * reach
}

/// Resolves an overlapping pair in place.
///
/// An impulse along the contact normal is applied if the spheres are
/// approaching, then both are pushed apart along the normal in proportion to
/// their inverse mass so they no longer overlap. Returns whether an impulse
/// was applied.
pub fn resolve_collision(a: &mut Particle, b: &mut Particle, restitution: f32) -> bool {
    let inv_mass_a = a.inv_mass();
    let inv_mass_b = b.inv_mass();
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    if inv_mass_sum <= 0.0 {
        return false;
    }

    let delta = b.position - a.position;
    let normal = normalize_or(delta, UP);
    let penetration = a.radius + b.radius - delta.length();

    let rel_normal = (b.velocity - a.velocity).dot(normal);
    let approaching = rel_normal < 0.0;
    if approaching {
        let impulse = normal * (-(1.0 + restitution) * rel_normal / inv_mass_sum);
        a.velocity -= impulse * inv_mass_a;
        b.velocity += impulse * inv_mass_b;
    }

    if penetration > 0.0 {
        let correction = normal * (penetration / inv_mass_sum);
        a.position -= correction * inv_mass_a;
        b.position += correction * inv_mass_b;
    }

    approaching
}

/// Keeps a particle inside `[-half_extent, half_extent]^3`.
///
/// Each axis is handled on its own: past a wall, the position is clamped to
/// the wall and that velocity component is reversed and scaled by `damping`.
pub fn bounce_off_walls(particle: &mut Particle, half_extent: f32, damping: f32) {
    for axis in 0..3 {
        let p = particle.position[axis];
        if p.abs() > half_extent {
            particle.position[axis] = p.clamp(-half_extent, half_extent);
            particle.velocity[axis] = -particle.velocity[axis] * damping;
        }
    }
}

/// Advances every particle by one step.
///
/// In order: clamp the step, apply gravity, resolve sphere-sphere contacts
/// (each unordered pair once), integrate positions, bounce off the box walls.
pub fn advance(
    particles: &mut [Particle],
    delta_time: f32,
    gravity: Vec3,
    physics: &PhysicsConfig,
) -> StepReport {
    let dt = clamp_time_step(delta_time, physics.max_time_step);

    for particle in particles.iter_mut() {
        particle.velocity += gravity * dt;
    }

    let mut contacts = 0;
    let count = particles.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let (left, right) = particles.split_at_mut(j);
            let a = &mut left[i];
            let b = &mut right[0];
            if is_colliding(a, b) {
                contacts += 1;
                resolve_collision(a, b, physics.restitution);
            }
        }
    }

    for particle in particles.iter_mut() {
        particle.position += particle.velocity * dt;
        bounce_off_walls(particle, physics.half_extent, physics.wall_damping);
    }

    if contacts > 0 {
        log::trace!("step dt={dt}: {contacts} contacts");
    }
    StepReport {
        applied_dt: dt,
        contacts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn momentum(particles: &[Particle]) -> Vec3 {
        particles.iter().map(|p| p.velocity * p.mass()).sum()
    }

    #[test]
    fn test_clamp_time_step() {
        assert_eq!(clamp_time_step(0.2, 0.1), 0.1);
        assert_eq!(clamp_time_step(0.05, 0.1), 0.05);
        assert_eq!(clamp_time_step(-1.0, 0.1), 0.0);
        assert_eq!(clamp_time_step(f32::NAN, 0.1), 0.0);
    }

    #[test]
    fn test_advance_clamps_step() {
        let mut particles = vec![Particle::new(0.1, Vec3::ZERO)];
        let report = advance(
            &mut particles,
            0.2,
            Vec3::new(0.0, 0.0, -10.0),
            &PhysicsConfig::default(),
        );
        assert_eq!(report.applied_dt, 0.1);
        assert!((particles[0].velocity.z + 1.0).abs() < 1e-5);
        assert!((particles[0].position.z + 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_wall_reflect_and_damp() {
        let mut particles =
            vec![Particle::new(0.1, Vec3::new(1.05, 0.0, 0.0)).with_velocity(Vec3::X)];
        advance(
            &mut particles,
            0.016,
            Vec3::new(0.0, 0.0, -9.81),
            &PhysicsConfig::default(),
        );
        assert_eq!(particles[0].position.x, 1.0);
        assert!((particles[0].velocity.x + 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_walls_per_axis() {
        let mut p = Particle::new(0.1, Vec3::new(-1.2, 0.5, 1.5))
            .with_velocity(Vec3::new(-2.0, 1.0, 3.0));
        bounce_off_walls(&mut p, 1.0, 0.5);
        assert_eq!(p.position, Vec3::new(-1.0, 0.5, 1.0));
        assert_eq!(p.velocity, Vec3::new(1.0, 1.0, -1.5));
    }

    #[test]
    fn test_is_colliding() {
        let a = Particle::new(0.1, Vec3::ZERO);
        let b = Particle::new(0.1, Vec3::new(0.15, 0.0, 0.0));
        let c = Particle::new(0.1, Vec3::new(0.25, 0.0, 0.0));
        assert!(is_colliding(&a, &b));
        assert!(!is_colliding(&a, &c));
    }

    #[test]
    fn test_equal_mass_elastic_swap() {
        let mut a = Particle::new(0.1, Vec3::ZERO).with_velocity(Vec3::X);
        let mut b = Particle::new(0.1, Vec3::new(0.15, 0.0, 0.0)).with_velocity(-Vec3::X);

        assert!(resolve_collision(&mut a, &mut b, 1.0));
        assert!((a.velocity - -Vec3::X).length() < 1e-5);
        assert!((b.velocity - Vec3::X).length() < 1e-5);
        // Pushed apart to exactly touching.
        assert!((a.position.distance(b.position) - 0.2).abs() < 1e-5);
        assert!((a.position.x + 0.025).abs() < 1e-5);
    }

    #[test]
    fn test_momentum_conserved() {
        let mut a = Particle::new(0.1, Vec3::ZERO).with_velocity(Vec3::new(2.0, 0.5, 0.0));
        let mut b = Particle::new(0.2, Vec3::new(0.2, 0.1, 0.0))
            .with_velocity(Vec3::new(-1.0, 0.0, 0.3));
        let before = momentum(&[a, b]);

        assert!(resolve_collision(&mut a, &mut b, 0.9));
        let after = momentum(&[a, b]);
        assert!((before - after).length() < 1e-5);
        // No longer approaching along the contact normal.
        let normal = (b.position - a.position).normalize();
        assert!((b.velocity - a.velocity).dot(normal) >= 0.0);
    }

    #[test]
    fn test_separating_pair_keeps_velocity() {
        let mut a = Particle::new(0.1, Vec3::ZERO).with_velocity(-Vec3::X);
        let mut b = Particle::new(0.1, Vec3::new(0.1, 0.0, 0.0)).with_velocity(Vec3::X);
        assert!(!resolve_collision(&mut a, &mut b, 0.9));
        assert_eq!(a.velocity, -Vec3::X);
        assert_eq!(b.velocity, Vec3::X);
        assert!(a.position.distance(b.position) >= 0.2 - 1e-5);
    }

    #[test]
    fn test_coincident_spheres_separate() {
        let mut a = Particle::new(0.1, Vec3::ZERO);
        let mut b = Particle::new(0.1, Vec3::ZERO);
        resolve_collision(&mut a, &mut b, 0.9);
        assert!(a.position.is_finite() && b.position.is_finite());
        assert!((b.position.z - a.position.z - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_advance_counts_each_pair_once() {
        let mut particles = vec![
            Particle::new(0.1, Vec3::ZERO),
            Particle::new(0.1, Vec3::new(0.05, 0.0, 0.0)),
            Particle::new(0.1, Vec3::new(0.9, 0.9, 0.9)),
        ];
        let report = advance(&mut particles, 0.01, Vec3::ZERO, &PhysicsConfig::default());
        assert_eq!(report.contacts, 1);
    }

    #[test]
    fn test_advance_zero_step_is_inert() {
        let start = Particle::new(0.1, Vec3::new(0.3, -0.2, 0.1)).with_velocity(Vec3::Y);
        let mut particles = vec![start];
        let gravity = Vec3::new(0.0, 0.0, -9.81);
        let report = advance(&mut particles, 0.0, gravity, &PhysicsConfig::default());
        assert_eq!(report.applied_dt, 0.0);
        assert_eq!(particles[0], start);
    }
}
