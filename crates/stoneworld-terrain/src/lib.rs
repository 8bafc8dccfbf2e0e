//! Procedural terrain generation: gradient noise, fractal heightfields, climate fields,
//! biome classification, and biome-aware height shaping and vertex coloring.

mod climate;
mod heightmap;
mod noise_field;
mod sampler;
mod shading;

pub mod biome;
pub mod debug_viz;

pub use biome::{
    BIOME_TABLE, Biome, BiomeClassifier, BiomeDef, BiomeSample, ParseBiomeError,
    classify_climate,
};
pub use climate::{ClimateField, ClimateParams, ClimateSample};
pub use heightmap::{HeightmapParams, HeightmapSampler, OCTAVE_OFFSET_SPACING};
pub use noise_field::NoiseField;
pub use sampler::{BiomeMode, TerrainSample, TerrainSampler, WorldExtent};
pub use shading::{
    BLEND_NEIGHBOR_DISTANCE, BiomeShader, ROUGHNESS_GAIN, ROUGHNESS_SCALE, blend_color,
    color_to_rgba8, height_brightness,
};
