//! Request/response boundary between a UI layer and the generators.
//!
//! A UI sends one [`MeshRequest`] per regeneration and gets back a [`Mesh`]
//! or a [`GenerateError`]. No state is shared between requests.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mesh::Mesh;
use crate::solid::{generate_solid, SolidConfig, SolidError};
use crate::terrain::{generate_terrain, TerrainConfig, TerrainError};

/// Errors returned for a [`MeshRequest`].
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Terrain generation failed: {0}")]
    Terrain(#[from] TerrainError),
    #[error("Solid generation failed: {0}")]
    Solid(#[from] SolidError),
    #[error("Malformed request: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One mesh to generate, tagged by `type`.
///
/// ```json
/// {"type": "terrain", "grid_size": 64, "fault_count": 200}
/// {"type": "solid", "kind": "torus", "rings": 16, "slices": 32}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MeshRequest {
    Terrain(TerrainConfig),
    Solid(SolidConfig),
}

impl MeshRequest {
    /// Parses a request from JSON. Negative counts are rejected here since
    /// every count field is unsigned.
    pub fn from_json(text: &str) -> Result<Self, GenerateError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn generate(&self) -> Result<Mesh, GenerateError> {
        let mesh = match self {
            MeshRequest::Terrain(config) => generate_terrain(config)?,
            MeshRequest::Solid(config) => generate_solid(config)?,
        };
        Ok(mesh)
    }
}

impl From<TerrainConfig> for MeshRequest {
    fn from(config: TerrainConfig) -> Self {
        MeshRequest::Terrain(config)
    }
}

impl From<SolidConfig> for MeshRequest {
    fn from(config: SolidConfig) -> Self {
        MeshRequest::Solid(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solid::SolidKind;

    #[test]
    fn test_parse_terrain() {
        let request =
            MeshRequest::from_json(r#"{"type":"terrain","grid_size":12,"fault_count":30}"#)
                .unwrap();
        match &request {
            MeshRequest::Terrain(config) => {
                assert_eq!(config.grid_size, 12);
                assert_eq!(config.fault_count, 30);
                assert_eq!(config.seed, TerrainConfig::default().seed);
            }
            other => panic!("unexpected request: {other:?}"),
        }
        assert_eq!(request.generate().unwrap().vertex_count(), 144);
    }

    #[test]
    fn test_parse_solid() {
        let request =
            MeshRequest::from_json(r#"{"type":"solid","kind":"torus","rings":4,"slices":5}"#)
                .unwrap();
        assert_eq!(request, MeshRequest::Solid(SolidConfig::torus(4, 5)));
        assert_eq!(request.generate().unwrap().triangle_count(), 40);
        assert_eq!(SolidConfig::torus(4, 5).kind, SolidKind::Torus);
    }

    #[test]
    fn test_negative_count_rejected() {
        let result = MeshRequest::from_json(r#"{"type":"terrain","fault_count":-3}"#);
        assert!(matches!(result, Err(GenerateError::Parse(_))));
    }

    #[test]
    fn test_invalid_parameters_surface() {
        let request = MeshRequest::from(TerrainConfig::new(1, 0));
        assert!(matches!(
            request.generate(),
            Err(GenerateError::Terrain(TerrainError::GridTooSmall(1)))
        ));

        let request = MeshRequest::from(SolidConfig::sphere(2, 2));
        assert!(matches!(
            request.generate(),
            Err(GenerateError::Solid(SolidError::TooFewSlices(2)))
        ));
    }

    #[test]
    fn test_serialize_tag() {
        let text = serde_json::to_string(&MeshRequest::from(SolidConfig::sphere(3, 8))).unwrap();
        assert!(text.contains(r#""type":"solid""#));
        assert!(text.contains(r#""kind":"sphere""#));
    }
}
