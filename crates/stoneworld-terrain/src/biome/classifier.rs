//! Climate-driven biome classification.

use super::Biome;
use crate::climate::{ClimateField, ClimateParams, ClimateSample, MOUNTAIN_PLANE};
use crate::noise_field::{NoiseField, seed_offsets};

/// Mountain noise above this always yields [`Biome::Mountains`].
const MOUNTAIN_THRESHOLD: f64 = 0.6;
/// Mountain noise above this lets hot, dry land become badlands.
const BADLANDS_RIDGE_THRESHOLD: f64 = 0.3;

/// Result of classifying a position, with the fields that drove it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeSample {
    /// The classified biome.
    pub biome: Biome,
    /// Climate at the sampled position.
    pub climate: ClimateSample,
    /// Mountain-range noise in `[0, 1]`.
    pub mountain: f64,
}

/// Map climate and mountain noise to a biome. First matching rule wins:
///
/// 1. mountain noise above 0.6 is always mountains;
/// 2. hot (> 0.8), dry (< 0.3) land on a ridge (> 0.3) is badlands;
/// 3. otherwise temperature bands crossed with moisture thresholds.
///
/// Every finite input maps to a biome; non-finite climate falls back to
/// grasslands.
pub fn classify_climate(climate: ClimateSample, mountain: f64) -> Biome {
    let ClimateSample {
        temperature: t,
        moisture: m,
    } = climate;

    if mountain > MOUNTAIN_THRESHOLD {
        return Biome::Mountains;
    }
    if t > 0.8 && m < 0.3 && mountain > BADLANDS_RIDGE_THRESHOLD {
        return Biome::RockyBadlands;
    }

    match t {
        t if t < 0.2 => {
            if m < 0.3 {
                Biome::Tundra
            } else {
                Biome::ArcticSnow
            }
        }
        t if t < 0.4 => {
            if m < 0.3 {
                Biome::Grasslands
            } else if m < 0.7 {
                Biome::BorealTaiga
            } else {
                Biome::Swampland
            }
        }
        t if t < 0.6 => {
            if m < 0.4 {
                Biome::Grasslands
            } else if m < 0.7 {
                Biome::TemperateForest
            } else {
                Biome::Swampland
            }
        }
        t if t < 0.8 => {
            if m < 0.3 {
                Biome::Desert
            } else if m < 0.6 {
                Biome::Savanna
            } else {
                Biome::TropicalJungle
            }
        }
        t if t >= 0.8 => {
            if m < 0.4 {
                Biome::VolcanicWasteland
            } else if m < 0.7 {
                Biome::Savanna
            } else {
                Biome::TropicalJungle
            }
        }
        // NaN temperature.
        _ => Biome::Grasslands,
    }
}

/// Classifies world positions using a [`ClimateField`] and a dedicated
/// mountain-range noise field.
pub struct BiomeClassifier {
    climate: ClimateField,
    noise: NoiseField,
    seed_offset: [f64; 3],
    mountain_scale: f64,
}

impl BiomeClassifier {
    /// Create a classifier for the given seed, climate tuning, and world Y extent.
    pub fn new(seed: i32, params: &ClimateParams, world_size_y: f64) -> Self {
        Self {
            climate: ClimateField::new(seed, params, world_size_y),
            noise: NoiseField::new(),
            seed_offset: seed_offsets(seed),
            mountain_scale: params.effective_continental_scale() * 2.0,
        }
    }

    /// Mountain-range noise at `(x, y)`, remapped to `[0, 1]`.
    pub fn mountain_noise(&self, x: f64, y: f64) -> f64 {
        let [sx, sy, sz] = self.seed_offset;
        self.noise.sample_3d_unit(
            x * self.mountain_scale + sx,
            y * self.mountain_scale + sy,
            sz + MOUNTAIN_PLANE,
        )
    }

    /// Classify the biome at `(x, y)`.
    pub fn classify(&self, x: f64, y: f64) -> Biome {
        self.sample(x, y).biome
    }

    /// Classify `(x, y)` and return the driving climate and mountain values.
    pub fn sample(&self, x: f64, y: f64) -> BiomeSample {
        let climate = self.climate.sample(x, y);
        let mountain = self.mountain_noise(x, y);
        BiomeSample {
            biome: classify_climate(climate, mountain),
            climate,
            mountain,
        }
    }
}
