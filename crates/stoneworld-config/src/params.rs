//! World generation parameters and their clamping rules.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use stoneworld_terrain::{BiomeMode, ClimateParams, HeightmapParams, WorldExtent};

use crate::error::ConfigurationError;

const SIZE_RANGE: RangeInclusive<f64> = 100.0..=100_000.0;
const RESOLUTION_RANGE: RangeInclusive<f64> = 10.0..=1_000.0;
const HEIGHT_VARIATION_RANGE: RangeInclusive<f64> = 0.0..=500.0;
const NOISE_SCALE_RANGE: RangeInclusive<f64> = 0.001..=1.0;
const OCTAVES_RANGE: RangeInclusive<u32> = 1..=8;
const PERSISTENCE_RANGE: RangeInclusive<f64> = 0.1..=1.0;
const LACUNARITY_RANGE: RangeInclusive<f64> = 1.0..=4.0;
const CLIMATE_SCALE_RANGE: RangeInclusive<f64> = 0.00001..=0.01;
const BLEND_FACTOR_RANGE: RangeInclusive<f64> = 0.0..=1.0;
const BIOME_SIZE_RANGE: RangeInclusive<f64> = 0.1..=10.0;

/// Everything that determines a generated world.
///
/// Values loaded from disk or built by hand may be out of range; call
/// [`GenerationParameters::configure`] before generating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationParameters {
    /// World extent along X, in world units.
    pub size_x: f64,
    /// World extent along Y, in world units.
    pub size_y: f64,
    /// Spacing between grid vertices, in world units.
    pub resolution: f64,
    /// Peak fBm height before biome shaping.
    pub height_variation: f64,
    /// Frequency of the first fBm octave.
    pub noise_scale: f64,
    /// Number of fBm octaves.
    pub octaves: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// World seed.
    pub seed: i32,
    /// How biomes shape and color the terrain.
    pub biomes: BiomeMode,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            size_x: 10_000.0,
            size_y: 10_000.0,
            resolution: 100.0,
            height_variation: 50.0,
            noise_scale: 0.01,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
            seed: 12345,
            biomes: BiomeMode::default(),
        }
    }
}

fn clamp_f64(field: &'static str, value: f64, range: RangeInclusive<f64>) -> f64 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        log::warn!("{field} {value} out of range, clamped to {clamped}");
    }
    clamped
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::NonFinite { field })
    }
}

fn clamp_climate(params: &ClimateParams) -> ClimateParams {
    ClimateParams {
        temperature_scale: clamp_f64(
            "temperature_scale",
            params.temperature_scale,
            CLIMATE_SCALE_RANGE,
        ),
        moisture_scale: clamp_f64("moisture_scale", params.moisture_scale, CLIMATE_SCALE_RANGE),
        continental_scale: clamp_f64(
            "continental_scale",
            params.continental_scale,
            CLIMATE_SCALE_RANGE,
        ),
        blend_factor: clamp_f64("blend_factor", params.blend_factor, BLEND_FACTOR_RANGE),
        biome_size_multiplier: clamp_f64(
            "biome_size_multiplier",
            params.biome_size_multiplier,
            BIOME_SIZE_RANGE,
        ),
    }
}

impl GenerationParameters {
    /// Clamp every field into its valid range and check that the result can
    /// be meshed.
    ///
    /// Non-finite values are rejected rather than clamped. On error `self`
    /// is left unchanged.
    pub fn configure(&mut self) -> Result<(), ConfigurationError> {
        self.check_finite()?;

        let mut clamped = self.clone();
        clamped.size_x = clamp_f64("size_x", self.size_x, SIZE_RANGE);
        clamped.size_y = clamp_f64("size_y", self.size_y, SIZE_RANGE);
        clamped.resolution = clamp_f64("resolution", self.resolution, RESOLUTION_RANGE);
        clamped.height_variation =
            clamp_f64("height_variation", self.height_variation, HEIGHT_VARIATION_RANGE);
        clamped.noise_scale = clamp_f64("noise_scale", self.noise_scale, NOISE_SCALE_RANGE);
        clamped.octaves = self
            .octaves
            .clamp(*OCTAVES_RANGE.start(), *OCTAVES_RANGE.end());
        if clamped.octaves != self.octaves {
            log::warn!(
                "octaves {} out of range, clamped to {}",
                self.octaves,
                clamped.octaves
            );
        }
        clamped.persistence = clamp_f64("persistence", self.persistence, PERSISTENCE_RANGE);
        clamped.lacunarity = clamp_f64("lacunarity", self.lacunarity, LACUNARITY_RANGE);
        if let BiomeMode::Climate(climate) = &self.biomes {
            clamped.biomes = BiomeMode::Climate(clamp_climate(climate));
        }

        clamped.validate()?;
        *self = clamped;
        Ok(())
    }

    /// Clamp and store the four geometric knobs, leaving noise and biome
    /// settings untouched.
    pub fn set_world_parameters(
        &mut self,
        size_x: f64,
        size_y: f64,
        resolution: f64,
        height_variation: f64,
    ) -> Result<(), ConfigurationError> {
        require_finite("size_x", size_x)?;
        require_finite("size_y", size_y)?;
        require_finite("resolution", resolution)?;
        require_finite("height_variation", height_variation)?;

        self.size_x = clamp_f64("size_x", size_x, SIZE_RANGE);
        self.size_y = clamp_f64("size_y", size_y, SIZE_RANGE);
        self.resolution = clamp_f64("resolution", resolution, RESOLUTION_RANGE);
        self.height_variation =
            clamp_f64("height_variation", height_variation, HEIGHT_VARIATION_RANGE);
        log::info!(
            "World parameters set: {} x {}, resolution {}, height variation {}",
            self.size_x,
            self.size_y,
            self.resolution,
            self.height_variation
        );
        Ok(())
    }

    /// Grid vertex counts `(vertices_x, vertices_y)`:
    /// `ceil(size / resolution) + 1` per axis.
    ///
    /// Does not clamp. Fails when either axis has fewer than two vertices,
    /// when the vertex count does not fit `u32` indices, or when the extent
    /// or resolution is not finite.
    pub fn grid_dimensions(&self) -> Result<(u32, u32), ConfigurationError> {
        require_finite("size_x", self.size_x)?;
        require_finite("size_y", self.size_y)?;
        require_finite("resolution", self.resolution)?;

        let vx = axis_vertices(self.size_x, self.resolution);
        let vy = axis_vertices(self.size_y, self.resolution);
        if vx < 2 || vy < 2 {
            return Err(ConfigurationError::DegenerateGrid {
                vertices_x: vx,
                vertices_y: vy,
            });
        }
        match (u32::try_from(vx), u32::try_from(vy)) {
            (Ok(x), Ok(y)) if vx.checked_mul(vy).is_some_and(|n| n <= u64::from(u32::MAX)) => {
                Ok((x, y))
            }
            _ => Err(ConfigurationError::GridTooLarge {
                vertices_x: vx,
                vertices_y: vy,
            }),
        }
    }

    /// Check that the parameters can be meshed as they are, without clamping.
    ///
    /// Returns the grid vertex counts on success.
    pub fn validate(&self) -> Result<(u32, u32), ConfigurationError> {
        self.check_finite()?;
        self.grid_dimensions()
    }

    /// fBm settings for the heightmap sampler.
    pub fn heightmap_params(&self) -> HeightmapParams {
        HeightmapParams {
            seed: self.seed,
            octaves: self.octaves,
            base_scale: self.noise_scale,
            persistence: self.persistence,
            lacunarity: self.lacunarity,
            amplitude: self.height_variation,
        }
    }

    /// The world extent, centered on the origin.
    pub fn extent(&self) -> WorldExtent {
        WorldExtent {
            size_x: self.size_x,
            size_y: self.size_y,
        }
    }

    fn check_finite(&self) -> Result<(), ConfigurationError> {
        require_finite("size_x", self.size_x)?;
        require_finite("size_y", self.size_y)?;
        require_finite("resolution", self.resolution)?;
        require_finite("height_variation", self.height_variation)?;
        require_finite("noise_scale", self.noise_scale)?;
        require_finite("persistence", self.persistence)?;
        require_finite("lacunarity", self.lacunarity)?;
        if let BiomeMode::Climate(climate) = &self.biomes {
            require_finite("temperature_scale", climate.temperature_scale)?;
            require_finite("moisture_scale", climate.moisture_scale)?;
            require_finite("continental_scale", climate.continental_scale)?;
            require_finite("blend_factor", climate.blend_factor)?;
            require_finite("biome_size_multiplier", climate.biome_size_multiplier)?;
        }
        Ok(())
    }
}

/// `ceil(size / resolution) + 1`, saturating; zero for non-positive inputs.
fn axis_vertices(size: f64, resolution: f64) -> u64 {
    if size <= 0.0 || resolution <= 0.0 {
        return 0;
    }
    // Float-to-int `as` saturates.
    ((size / resolution).ceil() as u64).saturating_add(1)
}
