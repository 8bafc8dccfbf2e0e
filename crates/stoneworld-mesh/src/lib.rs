//! Heightfield meshing: turns generation parameters into indexed triangle
//! buffers with smooth normals, tangents, UVs, and biome vertex colors.

mod builder;
mod buffers;
mod tangents;
mod vertex;

pub use buffers::MeshBuffers;
pub use builder::{TerrainMeshBuilder, UV_TILING};
pub use tangents::{compute_smooth_normals, compute_tangents};
pub use vertex::TerrainVertex;
