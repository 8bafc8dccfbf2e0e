//! Terrain debug visualization: top-down images of generated heights and biomes.
//!
//! Used by the preview export to diagnose generation parameters without a
//! renderer.

mod image;
mod renderers;

pub use self::image::DebugImage;
pub use renderers::{height_to_color, render_biome_debug, render_heightmap_debug};
