//! Bouncing spheres in a box.
//!
//! [`advance`] is a pure step over a particle slice; [`Simulation`] wraps it
//! with the batch timer that respawns every sphere when the window runs out.

mod collision;
mod config;
mod particle;
mod simulation;

pub use collision::{advance, bounce_off_walls, clamp_time_step, is_colliding, resolve_collision, StepReport};
pub use config::{
    PhysicsConfig, SimulationConfig, SimulationError, GRAVITY, HALF_EXTENT, MAX_TIME_STEP,
    NUMBER_OF_SPHERES, RESET_WINDOW, RESTITUTION, SPHERE_RADIUS, WALL_DAMPING,
};
pub use particle::{spawn_batch, Particle};
pub use simulation::{Simulation, TickReport};
