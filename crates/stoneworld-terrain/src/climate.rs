//! Large-scale climate fields: temperature and moisture per world position.

use serde::{Deserialize, Serialize};

use crate::noise_field::{NoiseField, seed_offsets};

/// Weight of the noise term in the temperature blend.
const TEMPERATURE_NOISE_WEIGHT: f64 = 0.6;
/// Weight of the latitude term in the temperature blend.
const TEMPERATURE_LATITUDE_WEIGHT: f64 = 0.4;

/// Z-planes of the shared noise field reserved for each climate layer.
const TEMPERATURE_PLANE: f64 = 1_000.0;
const MOISTURE_PLANE: f64 = 2_000.0;
pub(crate) const MOUNTAIN_PLANE: f64 = 3_000.0;

/// Tuning knobs for climate-driven biome generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateParams {
    /// Frequency of the temperature noise, in cycles per world unit.
    pub temperature_scale: f64,
    /// Frequency of the moisture noise.
    pub moisture_scale: f64,
    /// Frequency controlling the size of biome regions (mountain ranges
    /// sample at twice this).
    pub continental_scale: f64,
    /// Strength of color blending across biome boundaries, in `[0, 1]`.
    /// `0` disables neighbor sampling entirely.
    pub blend_factor: f64,
    /// Divides every climate frequency; larger values make larger biomes.
    pub biome_size_multiplier: f64,
}

impl Default for ClimateParams {
    fn default() -> Self {
        Self {
            temperature_scale: 0.0003,
            moisture_scale: 0.0004,
            continental_scale: 0.0002,
            blend_factor: 0.3,
            biome_size_multiplier: 3.0,
        }
    }
}

impl ClimateParams {
    /// Temperature frequency after applying the biome size multiplier.
    pub fn effective_temperature_scale(&self) -> f64 {
        self.temperature_scale / self.biome_size_multiplier
    }

    /// Moisture frequency after applying the biome size multiplier.
    pub fn effective_moisture_scale(&self) -> f64 {
        self.moisture_scale / self.biome_size_multiplier
    }

    /// Continental frequency after applying the biome size multiplier.
    pub fn effective_continental_scale(&self) -> f64 {
        self.continental_scale / self.biome_size_multiplier
    }
}

/// Temperature and moisture at a single position, both in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClimateSample {
    /// 0 is polar, 1 is equatorial heat.
    pub temperature: f64,
    /// 0 is arid, 1 is saturated.
    pub moisture: f64,
}

impl ClimateSample {
    /// Construct a sample, clamping both components into `[0, 1]`.
    pub fn new(temperature: f64, moisture: f64) -> Self {
        Self {
            temperature: temperature.clamp(0.0, 1.0),
            moisture: moisture.clamp(0.0, 1.0),
        }
    }
}

/// Derives temperature and moisture from large-scale noise plus a latitude
/// gradient running along the world's Y axis.
pub struct ClimateField {
    noise: NoiseField,
    seed_offset: [f64; 3],
    temperature_scale: f64,
    moisture_scale: f64,
    world_size_y: f64,
}

impl ClimateField {
    /// Create a climate field for a world whose Y extent is `world_size_y`.
    pub fn new(seed: i32, params: &ClimateParams, world_size_y: f64) -> Self {
        Self {
            noise: NoiseField::new(),
            seed_offset: seed_offsets(seed),
            temperature_scale: params.effective_temperature_scale(),
            moisture_scale: params.effective_moisture_scale(),
            world_size_y,
        }
    }

    /// Temperature at `(x, y)`: 60% noise, 40% latitude. Poles are cold, the
    /// equator (`y = 0`) is warm.
    pub fn temperature(&self, x: f64, y: f64) -> f64 {
        let [sx, sy, sz] = self.seed_offset;
        let noise = self.noise.sample_3d_unit(
            x * self.temperature_scale + sx,
            y * self.temperature_scale + sy,
            sz + TEMPERATURE_PLANE,
        );
        let blended =
            noise * TEMPERATURE_NOISE_WEIGHT + self.latitude(y) * TEMPERATURE_LATITUDE_WEIGHT;
        blended.clamp(0.0, 1.0)
    }

    /// Moisture at `(x, y)`: pure noise, no geographic bias.
    pub fn moisture(&self, x: f64, y: f64) -> f64 {
        let [sx, sy, sz] = self.seed_offset;
        self.noise.sample_3d_unit(
            x * self.moisture_scale + sx,
            y * self.moisture_scale + sy,
            sz + MOISTURE_PLANE,
        )
    }

    /// Both climate scalars at `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> ClimateSample {
        ClimateSample::new(self.temperature(x, y), self.moisture(x, y))
    }

    /// `1 - (|y| / size_y)^2`, clamped to `[0, 1]`.
    fn latitude(&self, y: f64) -> f64 {
        if self.world_size_y <= 0.0 {
            return 1.0;
        }
        let t = y.abs() / self.world_size_y;
        (1.0 - t * t).clamp(0.0, 1.0)
    }
}
