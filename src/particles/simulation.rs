//! Windowed batch restart: a session that replaces its whole particle set
//! every `reset_window` simulated seconds.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::collision::{advance, StepReport};
use super::config::{SimulationConfig, SimulationError};
use super::particle::{spawn_batch, Particle};

/// What one [`Simulation::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub step: StepReport,
    /// A new batch was spawned at the end of this tick.
    pub restarted: bool,
}

/// Owns the particles of the running batch and the window timer.
///
/// Callers drive it with one [`tick`](Self::tick) per frame; nothing is
/// shared between sessions.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    rng: ChaCha8Rng,
    particles: Vec<Particle>,
    window_elapsed: f32,
    batch: u64,
}

impl Simulation {
    /// Validates `config` and spawns batch 0.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let particles = spawn_batch(
            config.sphere_count,
            config.sphere_radius,
            config.physics.half_extent,
            &mut rng,
        );
        Ok(Self {
            config,
            rng,
            particles,
            window_elapsed: 0.0,
            batch: 0,
        })
    }

    /// Advances the batch by one frame and restarts it once the window has
    /// elapsed.
    pub fn tick(&mut self, delta_time: f32) -> TickReport {
        let step = advance(
            &mut self.particles,
            delta_time,
            self.config.gravity,
            &self.config.physics,
        );
        self.window_elapsed += step.applied_dt;

        let restarted = self.window_elapsed >= self.config.reset_window;
        if restarted {
            self.restart();
        }
        TickReport { step, restarted }
    }

    /// Discards every particle and spawns a fresh batch.
    pub fn restart(&mut self) {
        self.particles = spawn_batch(
            self.config.sphere_count,
            self.config.sphere_radius,
            self.config.physics.half_extent,
            &mut self.rng,
        );
        self.batch += 1;
        log::info!(
            "batch {} spawned after {:.2}s ({} spheres)",
            self.batch,
            self.window_elapsed,
            self.particles.len()
        );
        self.window_elapsed = 0.0;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Index of the current batch, starting at 0.
    pub fn batch(&self) -> u64 {
        self.batch
    }

    /// Simulated seconds since the current batch was spawned.
    pub fn window_elapsed(&self) -> f32 {
        self.window_elapsed
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
