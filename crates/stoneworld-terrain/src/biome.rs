//! Biome system: the constant biome table and climate-driven classification.
//!
//! Biomes are a closed set of twelve categories. Each one carries static
//! shaping parameters (height multiplier, base offset, roughness) and a tint;
//! the classifier maps climate fields plus a mountain-range field onto that set.

mod classifier;
mod def;

pub use classifier::{BiomeClassifier, BiomeSample, classify_climate};
pub use def::{BIOME_TABLE, Biome, BiomeDef, ParseBiomeError};
