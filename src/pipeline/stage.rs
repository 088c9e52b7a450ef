//! Terrain stage trait and pipeline orchestration.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::terrain::{apply_faults, recompute_normals, renormalize_heights, Grid, TerrainConfig};

/// Unique identifier for terrain stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Random fault displacement.
    Faults,
    /// Height rescaling to the configured peak.
    Renormalize,
    /// Normal recomputation from grid neighbors.
    Normals,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Faults => "faults",
            StageId::Renormalize => "renormalize",
            StageId::Normals => "normals",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{0}' failed: {1}")]
    StageFailed(String, String),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
}

/// A step that transforms the terrain grid in place.
///
/// Stages run in insertion order; each may declare stages that must have
/// completed before it.
pub trait TerrainStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the stage, modifying the grid in place.
    fn execute(&self, grid: &mut Grid, config: &TerrainConfig) -> Result<(), PipelineError>;
}

/// Runs terrain stages in order against one grid.
pub struct Pipeline {
    stages: Vec<Box<dyn TerrainStage>>,
    config: TerrainConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: TerrainConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Faults, then renormalize, then normals.
    pub fn standard(config: TerrainConfig) -> Self {
        let mut pipeline = Self::new(config);
        pipeline
            .add_stage(FaultStage)
            .add_stage(RenormalizeStage)
            .add_stage(NormalStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: TerrainStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Executes all stages in order on the given grid.
    pub fn run(&self, grid: &mut Grid) -> Result<(), PipelineError> {
        self.run_with_callbacks(grid, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `grid` - The grid to transform
    /// * `on_stage_start` - Called with `(name, index, total)` as each stage begins
    /// * `on_stage_complete` - Called with `(name, index, total)` as each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        grid: &mut Grid,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            log::trace!("running terrain stage '{}' ({}/{})", stage.name(), i + 1, total);
            stage.execute(grid, &self.config)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Applies `fault_count` random faults, seeded from the configuration.
pub struct FaultStage;

impl TerrainStage for FaultStage {
    fn id(&self) -> StageId {
        StageId::Faults
    }

    fn name(&self) -> &str {
        "Fault Displacement"
    }

    fn execute(&self, grid: &mut Grid, config: &TerrainConfig) -> Result<(), PipelineError> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        apply_faults(grid, config.fault_count, &mut rng);
        Ok(())
    }
}

/// Rescales heights to span `highest_peak`, centered on zero.
pub struct RenormalizeStage;

impl TerrainStage for RenormalizeStage {
    fn id(&self) -> StageId {
        StageId::Renormalize
    }

    fn name(&self) -> &str {
        "Height Renormalization"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Faults]
    }

    fn execute(&self, grid: &mut Grid, config: &TerrainConfig) -> Result<(), PipelineError> {
        let (min, max) = grid.height_range();
        if !min.is_finite() || !max.is_finite() {
            return Err(PipelineError::StageFailed(
                self.name().to_string(),
                format!("non-finite height range [{min}, {max}]"),
            ));
        }
        renormalize_heights(grid, config.highest_peak);
        Ok(())
    }
}

/// Recomputes normals once heights are final.
pub struct NormalStage;

impl TerrainStage for NormalStage {
    fn id(&self) -> StageId {
        StageId::Normals
    }

    fn name(&self) -> &str {
        "Normal Recomputation"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Renormalize]
    }

    fn execute(&self, grid: &mut Grid, _config: &TerrainConfig) -> Result<(), PipelineError> {
        recompute_normals(grid);
        Ok(())
    }
}
