//! Ordered stages that turn a flat grid into finished terrain.
//!
//! Each stage declares the stages it depends on; the pipeline refuses to run
//! a stage whose dependencies have not completed.

mod stage;

pub use stage::{
    FaultStage, NormalStage, Pipeline, PipelineError, RenormalizeStage, StageId, TerrainStage,
};
