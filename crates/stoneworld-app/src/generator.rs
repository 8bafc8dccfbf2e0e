//! Synchronous world generator with a configure / generate / clear lifecycle.

use stoneworld_config::{ConfigurationError, GenerationParameters};
use stoneworld_mesh::{MeshBuffers, TerrainMeshBuilder};

/// Owns the active generation parameters and the most recent mesh.
///
/// Parameters only change through [`configure`](Self::configure) or
/// [`set_world_parameters`](Self::set_world_parameters), so they are always
/// clamped and meshable.
#[derive(Debug)]
pub struct WorldGenerator {
    params: GenerationParameters,
    builder: TerrainMeshBuilder,
    mesh: Option<MeshBuffers>,
}

impl Default for WorldGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldGenerator {
    /// A generator with default parameters and one worker per CPU.
    pub fn new() -> Self {
        Self::with_builder(TerrainMeshBuilder::new())
    }

    /// A generator with default parameters and a custom mesh builder.
    pub fn with_builder(builder: TerrainMeshBuilder) -> Self {
        Self {
            params: GenerationParameters::default(),
            builder,
            mesh: None,
        }
    }

    /// Clamp and store new parameters.
    ///
    /// On success any cached mesh is discarded. On error the previous
    /// parameters and mesh are kept.
    pub fn configure(
        &mut self,
        mut params: GenerationParameters,
    ) -> Result<&GenerationParameters, ConfigurationError> {
        params.configure()?;
        tracing::debug!(?params, "Configured world generator");
        self.params = params;
        self.mesh = None;
        Ok(&self.params)
    }

    /// Clamp and store the world extent, grid resolution, and height
    /// variation, keeping every other parameter.
    pub fn set_world_parameters(
        &mut self,
        size_x: f64,
        size_y: f64,
        resolution: f64,
        height_variation: f64,
    ) -> Result<(), ConfigurationError> {
        let mut params = self.params.clone();
        params.set_world_parameters(size_x, size_y, resolution, height_variation)?;
        self.configure(params).map(|_| ())
    }

    /// Build the mesh for the current parameters, replacing any previous one.
    pub fn generate(&mut self) -> Result<&MeshBuffers, ConfigurationError> {
        self.mesh = None;
        let mesh = self.builder.build(&self.params)?;
        Ok(self.mesh.insert(mesh))
    }

    /// Discard the cached mesh.
    pub fn clear(&mut self) {
        if self.mesh.take().is_some() {
            tracing::debug!("Cleared generated mesh");
        }
    }

    /// The active parameters.
    pub fn parameters(&self) -> &GenerationParameters {
        &self.params
    }

    /// The most recently generated mesh, if any.
    pub fn mesh(&self) -> Option<&MeshBuffers> {
        self.mesh.as_ref()
    }
}
