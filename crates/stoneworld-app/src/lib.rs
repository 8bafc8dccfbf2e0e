//! Host-facing Stoneworld API: the world generator lifecycle, background
//! generation, and preview export.

pub mod async_generation;
pub mod error;
pub mod export;
pub mod generator;

pub use async_generation::{AsyncWorldGenerator, GeneratedWorld, JobId};
pub use error::AppError;
pub use export::{PreviewPaths, encode_png, write_png, write_previews};
pub use generator::WorldGenerator;
