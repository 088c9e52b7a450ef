//! Procedural meshes and a small sphere simulation.
//!
//! This crate generates fault-line terrain grids and parametric solids
//! (sphere, torus) as flat vertex/index buffers ready for upload, and steps
//! a box of bouncing spheres with gravity, contacts and damped wall bounces.

pub mod export;
pub mod geometry;
pub mod logging;
pub mod mesh;
pub mod particles;
pub mod pipeline;
pub mod request;
pub mod solid;
pub mod terrain;

pub use logging::{init_logging, LoggingConfig};
pub use mesh::{AttributeData, AttributeKind, Mesh, MeshError, VertexAttribute};
pub use particles::{advance, Particle, PhysicsConfig, Simulation, SimulationConfig, StepReport};
pub use pipeline::{Pipeline, PipelineError, StageId, TerrainStage};
pub use request::{GenerateError, MeshRequest};
pub use solid::{generate_solid, SolidConfig, SolidError, SolidKind};
pub use terrain::{generate_terrain, TerrainConfig, TerrainError};
