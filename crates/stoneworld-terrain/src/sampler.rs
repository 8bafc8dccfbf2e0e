//! Full per-position terrain pipeline: fBm height, biome classification,
//! biome shaping, and vertex color.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::biome::{Biome, BiomeClassifier};
use crate::climate::ClimateParams;
use crate::heightmap::{HeightmapParams, HeightmapSampler};
use crate::shading::{BiomeShader, height_brightness};

/// How biomes participate in generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomeMode {
    /// Plain fBm terrain with a neutral tint.
    Off,
    /// One biome's shaping and tint everywhere.
    Fixed(Biome),
    /// Biomes classified from temperature, moisture, and mountain fields.
    Climate(ClimateParams),
}

impl Default for BiomeMode {
    fn default() -> Self {
        Self::Climate(ClimateParams::default())
    }
}

/// World extent in world units, centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldExtent {
    pub size_x: f64,
    pub size_y: f64,
}

impl WorldExtent {
    /// `(min_x, min_y, max_x, max_y)` of the extent.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (hx, hy) = (self.size_x * 0.5, self.size_y * 0.5);
        (-hx, -hy, hx, hy)
    }
}

/// Terrain attributes at one position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSample {
    /// Final shaped height.
    pub height: f64,
    /// Linear RGB vertex color.
    pub color: Vec3,
    /// The biome at this position, `None` when biomes are off.
    pub biome: Option<Biome>,
}

enum BiomeStage {
    Off,
    Fixed(Biome),
    Climate(BiomeClassifier),
}

/// Evaluates the whole height/color pipeline for arbitrary world positions.
///
/// Holds only immutable state, so one sampler can be shared by every worker
/// of a mesh build.
pub struct TerrainSampler {
    heightmap: HeightmapSampler,
    shader: BiomeShader,
    stage: BiomeStage,
}

impl TerrainSampler {
    /// Build a sampler for one generation run.
    pub fn new(heightmap: HeightmapParams, biomes: &BiomeMode, extent: WorldExtent) -> Self {
        let seed = heightmap.seed;
        let (stage, blend_factor) = match biomes {
            BiomeMode::Off => (BiomeStage::Off, 0.0),
            BiomeMode::Fixed(biome) => (BiomeStage::Fixed(*biome), 0.0),
            BiomeMode::Climate(params) => (
                BiomeStage::Climate(BiomeClassifier::new(seed, params, extent.size_y)),
                params.blend_factor,
            ),
        };
        Self {
            heightmap: HeightmapSampler::new(heightmap),
            shader: BiomeShader::new(seed, blend_factor),
            stage,
        }
    }

    /// Biome at `(x, y)`, `None` when biomes are off.
    pub fn biome_at(&self, x: f64, y: f64) -> Option<Biome> {
        match &self.stage {
            BiomeStage::Off => None,
            BiomeStage::Fixed(biome) => Some(*biome),
            BiomeStage::Climate(classifier) => Some(classifier.classify(x, y)),
        }
    }

    /// Shaped height and color at `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> TerrainSample {
        let base = self.heightmap.sample(x, y);
        match &self.stage {
            BiomeStage::Off => TerrainSample {
                height: base,
                color: Vec3::ONE * height_brightness(base),
                biome: None,
            },
            BiomeStage::Fixed(biome) => {
                let height = self.shader.shape_height(base, x, y, *biome);
                TerrainSample {
                    height,
                    color: biome.def().tint * height_brightness(height),
                    biome: Some(*biome),
                }
            }
            BiomeStage::Climate(classifier) => {
                let biome = classifier.classify(x, y);
                let height = self.shader.shape_height(base, x, y, biome);
                TerrainSample {
                    height,
                    color: self.shader.biome_color(classifier, biome, x, y, height),
                    biome: Some(biome),
                }
            }
        }
    }

    /// Upper bound on `|height|` for any position.
    ///
    /// `amplitude * max multiplier + max roughness gain + max |offset|` over
    /// the biomes this sampler can produce.
    pub fn height_bound(&self) -> f64 {
        let amplitude = self.heightmap.max_amplitude();
        let envelope = |biome: Biome| {
            let def = biome.def();
            let rough = (def.roughness - 1.0).max(0.0) * crate::shading::ROUGHNESS_GAIN;
            amplitude * def.height_multiplier + rough + def.base_offset.abs()
        };
        match &self.stage {
            BiomeStage::Off => amplitude,
            BiomeStage::Fixed(biome) => envelope(*biome),
            BiomeStage::Climate(_) => Biome::ALL.into_iter().map(envelope).fold(0.0, f64::max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXTENT: WorldExtent = WorldExtent {
        size_x: 10_000.0,
        size_y: 10_000.0,
    };

    fn sampler(mode: BiomeMode) -> TerrainSampler {
        TerrainSampler::new(HeightmapParams::default(), &mode, EXTENT)
    }

    #[test]
    fn test_off_mode_is_raw_fbm() {
        let s = sampler(BiomeMode::Off);
        let heightmap = HeightmapSampler::new(HeightmapParams::default());
        for i in 0..20 {
            let (x, y) = (i as f64 * 250.0 - 2_500.0, i as f64 * 90.0);
            let sample = s.sample(x, y);
            assert_eq!(sample.height, heightmap.sample(x, y));
            assert_eq!(sample.biome, None);
            assert_eq!(sample.color.x, sample.color.y);
        }
    }

    #[test]
    fn test_fixed_mode_uses_one_biome() {
        let s = sampler(BiomeMode::Fixed(Biome::Swampland));
        for i in 0..20 {
            let (x, y) = (i as f64 * 300.0, i as f64 * -300.0);
            let sample = s.sample(x, y);
            assert_eq!(sample.biome, Some(Biome::Swampland));
            assert_eq!(s.biome_at(x, y), Some(Biome::Swampland));
        }
    }

    #[test]
    fn test_climate_mode_heights_within_bound() {
        let s = sampler(BiomeMode::default());
        let bound = s.height_bound();
        // 50 * 3.0 + 40 + 100 for mountains.
        assert!((bound - 290.0).abs() < 1e-9, "bound {bound}");
        for ix in -25..=25 {
            for iy in -25..=25 {
                let sample = s.sample(ix as f64 * 200.0, iy as f64 * 200.0);
                assert!(sample.height.is_finite());
                assert!(sample.height.abs() <= bound, "height {} > {bound}", sample.height);
                assert!(sample.biome.is_some());
            }
        }
    }

    #[test]
    fn test_sampler_is_deterministic() {
        let a = sampler(BiomeMode::default());
        let b = sampler(BiomeMode::default());
        for i in 0..50 {
            let (x, y) = (i as f64 * 197.0 - 5_000.0, i as f64 * 61.0 - 1_000.0);
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn test_colors_are_unit_range() {
        let s = sampler(BiomeMode::default());
        for i in 0..100 {
            let c = s.sample(i as f64 * 97.0 - 4_000.0, i as f64 * 41.0 - 2_000.0).color;
            for v in c.to_array() {
                assert!((0.0..=1.0).contains(&v), "component {v}");
            }
        }
    }

    #[test]
    fn test_biome_mode_serde_shapes() {
        let fixed: BiomeMode = ron::from_str("fixed(desert)").unwrap();
        assert_eq!(fixed, BiomeMode::Fixed(Biome::Desert));
        let off: BiomeMode = ron::from_str("off").unwrap();
        assert_eq!(off, BiomeMode::Off);
        let climate: BiomeMode = ron::from_str("climate((blend_factor: 0.5))").unwrap();
        match climate {
            BiomeMode::Climate(p) => {
                assert_eq!(p.blend_factor, 0.5);
                assert_eq!(p.biome_size_multiplier, 3.0);
            }
            other => panic!("unexpected mode {other:?}"),
        }
    }

    #[test]
    fn test_extent_bounds_are_centered() {
        assert_eq!(EXTENT.bounds(), (-5_000.0, -5_000.0, 5_000.0, 5_000.0));
    }
}
