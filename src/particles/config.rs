//! Physics and session parameters for the bouncing-spheres simulation.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Spheres per batch.
pub const NUMBER_OF_SPHERES: usize = 10;
/// Radius of every sphere.
pub const SPHERE_RADIUS: f32 = 0.1;
/// Simulated seconds before the whole batch is replaced.
pub const RESET_WINDOW: f32 = 5.0;
/// Largest time step a single `advance` call will apply.
pub const MAX_TIME_STEP: f32 = 0.1;
/// Velocity kept (and reversed) on a wall bounce.
pub const WALL_DAMPING: f32 = 0.9;
/// Coefficient of restitution for sphere-sphere contacts.
pub const RESTITUTION: f32 = 0.9;
/// Half the side of the bounding box, centered on the origin.
pub const HALF_EXTENT: f32 = 1.0;
/// Default gravity; Z is up.
pub const GRAVITY: Vec3 = Vec3::new(0.0, 0.0, -9.81);

/// Errors reported when validating simulation parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid max time step: {0} (must be finite and > 0)")]
    InvalidTimeStep(f32),
    #[error("Invalid box half extent: {0} (must be finite and > 0)")]
    InvalidExtent(f32),
    #[error("Invalid wall damping: {0} (must be in [0, 1])")]
    InvalidDamping(f32),
    #[error("Invalid restitution: {0} (must be in [0, 1])")]
    InvalidRestitution(f32),
    #[error("Invalid sphere radius: {0} (must be finite and > 0)")]
    InvalidRadius(f32),
    #[error("Invalid reset window: {0} (must be finite and > 0)")]
    InvalidResetWindow(f32),
    #[error("Gravity must be finite, got {0}")]
    InvalidGravity(Vec3),
}

/// Parameters of a single `advance` step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub max_time_step: f32,
    pub half_extent: f32,
    pub wall_damping: f32,
    pub restitution: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            max_time_step: MAX_TIME_STEP,
            half_extent: HALF_EXTENT,
            wall_damping: WALL_DAMPING,
            restitution: RESTITUTION,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.max_time_step.is_finite() || self.max_time_step <= 0.0 {
            return Err(SimulationError::InvalidTimeStep(self.max_time_step));
        }
        if !self.half_extent.is_finite() || self.half_extent <= 0.0 {
            return Err(SimulationError::InvalidExtent(self.half_extent));
        }
        if !(0.0..=1.0).contains(&self.wall_damping) {
            return Err(SimulationError::InvalidDamping(self.wall_damping));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SimulationError::InvalidRestitution(self.restitution));
        }
        Ok(())
    }
}

/// Parameters of a [`Simulation`](super::Simulation) session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub sphere_count: usize,
    pub sphere_radius: f32,
    /// Simulated seconds per batch.
    pub reset_window: f32,
    pub gravity: Vec3,
    /// Seed for spawn positions and colors.
    pub seed: u64,
    pub physics: PhysicsConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sphere_count: NUMBER_OF_SPHERES,
            sphere_radius: SPHERE_RADIUS,
            reset_window: RESET_WINDOW,
            gravity: GRAVITY,
            seed: 42,
            physics: PhysicsConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Default session with a specific seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        self.physics.validate()?;
        if !self.sphere_radius.is_finite() || self.sphere_radius <= 0.0 {
            return Err(SimulationError::InvalidRadius(self.sphere_radius));
        }
        if !self.reset_window.is_finite() || self.reset_window <= 0.0 {
            return Err(SimulationError::InvalidResetWindow(self.reset_window));
        }
        if !self.gravity.is_finite() {
            return Err(SimulationError::InvalidGravity(self.gravity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.sphere_count, 10);
        assert_eq!(config.physics.max_time_step, 0.1);
        assert_eq!(config.gravity.z, -9.81);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_physics() {
        let mut config = SimulationConfig::default();
        config.physics.wall_damping = 1.5;
        assert_eq!(config.validate(), Err(SimulationError::InvalidDamping(1.5)));

        let physics = PhysicsConfig {
            max_time_step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            physics.validate(),
            Err(SimulationError::InvalidTimeStep(_))
        ));
    }

    #[test]
    fn test_rejects_bad_session() {
        let config = SimulationConfig {
            reset_window: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidResetWindow(_))
        ));

        let config = SimulationConfig {
            gravity: Vec3::new(0.0, f32::NAN, 0.0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SimulationError::InvalidGravity(_))));
    }

    #[test]
    fn test_partial_json() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"sphere_count": 3, "physics": {"restitution": 1.0}}"#)
                .unwrap();
        assert_eq!(config.sphere_count, 3);
        assert_eq!(config.physics.restitution, 1.0);
        assert_eq!(config.physics.wall_damping, WALL_DAMPING);
        assert_eq!(config.sphere_radius, SPHERE_RADIUS);
    }
}
