//! Multi-octave fractal Brownian motion (fBm) heightmap sampler.
//!
//! Composites octaves of gradient noise into a single height per `(x, y)`,
//! renormalized by the accumulated octave weight so the output range stays
//! `[-amplitude, amplitude]` whatever the octave count or persistence.

use crate::noise_field::{NoiseField, seed_offsets};

/// Coordinate offset between successive octaves, decorrelating octaves that
/// read the same noise field.
pub const OCTAVE_OFFSET_SPACING: f64 = 100.0;

/// Configuration for multi-octave fBm used in heightmap generation.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapParams {
    /// World seed for deterministic generation.
    pub seed: i32,
    /// Number of octaves to composite. `0` yields a flat heightfield.
    pub octaves: u32,
    /// Frequency of the first octave, in cycles per world unit.
    pub base_scale: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Peak height contribution in world units.
    pub amplitude: f64,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            seed: 12345,
            octaves: 4,
            base_scale: 0.01,
            persistence: 0.5,
            lacunarity: 2.0,
            amplitude: 50.0,
        }
    }
}

/// Generates terrain heights using fBm over a [`NoiseField`].
pub struct HeightmapSampler {
    noise: NoiseField,
    params: HeightmapParams,
    seed_offset: [f64; 3],
}

impl HeightmapSampler {
    /// Create a new sampler with the given parameters.
    pub fn new(params: HeightmapParams) -> Self {
        Self {
            noise: NoiseField::new(),
            seed_offset: seed_offsets(params.seed),
            params,
        }
    }

    /// Sample the heightfield at a world-space `(x, y)` position.
    ///
    /// Returns a height in `[-amplitude, amplitude]`, or `0.0` when the
    /// accumulated octave weight is zero.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let [sx, sy, sz] = self.seed_offset;
        let mut total = 0.0;
        let mut max_value = 0.0;
        let mut amplitude = self.params.amplitude;
        let mut frequency = self.params.base_scale;

        for octave in 0..self.params.octaves {
            let octave_offset = octave as f64 * OCTAVE_OFFSET_SPACING;
            let noise_val = self.noise.sample_3d(
                x * frequency + sx + octave_offset,
                y * frequency + sy + octave_offset,
                sz + octave_offset,
            );
            total += noise_val * amplitude;
            max_value += amplitude;

            amplitude *= self.params.persistence;
            frequency *= self.params.lacunarity;
        }

        if max_value > 0.0 {
            (total / max_value) * self.params.amplitude
        } else {
            0.0
        }
    }

    /// The largest absolute height [`Self::sample`] can return.
    pub fn max_amplitude(&self) -> f64 {
        if self.params.octaves == 0 {
            0.0
        } else {
            self.params.amplitude.abs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_field::{SEED_MULTIPLIER_X, SEED_MULTIPLIER_Y, SEED_MULTIPLIER_Z};

    #[test]
    fn test_determinism_same_seed_same_coord() {
        let a = HeightmapSampler::new(HeightmapParams::default());
        let b = HeightmapSampler::new(HeightmapParams::default());
        for i in 0..50 {
            let x = i as f64 * 37.5 - 900.0;
            let y = i as f64 * -21.25 + 400.0;
            assert_eq!(a.sample(x, y).to_bits(), b.sample(x, y).to_bits());
        }
    }

    #[test]
    fn test_different_seeds_diverge_at_first_octave() {
        let single_octave = |seed| {
            HeightmapSampler::new(HeightmapParams {
                seed,
                octaves: 1,
                ..Default::default()
            })
        };
        let a = single_octave(1);
        let b = single_octave(2);

        let differing = (0..20)
            .filter(|&i| {
                let x = i as f64 * 73.0;
                (a.sample(x, 31.0) - b.sample(x, 31.0)).abs() > 1e-9
            })
            .count();
        assert!(differing > 10, "seeds 1 and 2 barely differ: {differing}/20");
    }

    #[test]
    fn test_height_within_amplitude() {
        for octaves in 1..=8 {
            for persistence in [0.1, 0.5, 1.0] {
                let sampler = HeightmapSampler::new(HeightmapParams {
                    octaves,
                    persistence,
                    amplitude: 120.0,
                    ..Default::default()
                });
                for ix in -20..20 {
                    for iy in -20..20 {
                        let h = sampler.sample(ix as f64 * 53.0, iy as f64 * 47.0);
                        assert!(
                            h.abs() <= 120.0 + 1e-9,
                            "height {h} exceeds amplitude (octaves={octaves}, p={persistence})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_octaves_returns_zero() {
        let sampler = HeightmapSampler::new(HeightmapParams {
            octaves: 0,
            ..Default::default()
        });
        assert_eq!(sampler.sample(123.0, 456.0), 0.0);
        assert_eq!(sampler.max_amplitude(), 0.0);
    }

    #[test]
    fn test_zero_amplitude_returns_zero() {
        let sampler = HeightmapSampler::new(HeightmapParams {
            amplitude: 0.0,
            ..Default::default()
        });
        let h = sampler.sample(123.0, 456.0);
        assert_eq!(h, 0.0, "zero amplitude should produce zero height, got {h}");
    }

    #[test]
    fn test_single_octave_matches_scaled_noise() {
        let params = HeightmapParams {
            seed: 7,
            octaves: 1,
            base_scale: 0.02,
            amplitude: 10.0,
            ..Default::default()
        };
        let sampler = HeightmapSampler::new(params);
        let noise = NoiseField::new();

        let (x, y) = (250.0, -130.0);
        let expected = noise.sample_3d(
            x * 0.02 + 7.0 * SEED_MULTIPLIER_X,
            y * 0.02 + 7.0 * SEED_MULTIPLIER_Y,
            7.0 * SEED_MULTIPLIER_Z,
        ) * 10.0;
        assert!((sampler.sample(x, y) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_more_octaves_adds_detail() {
        let step = 2.0;
        let coarse = HeightmapSampler::new(HeightmapParams {
            octaves: 1,
            ..Default::default()
        });
        let fine = HeightmapSampler::new(HeightmapParams {
            octaves: 8,
            persistence: 0.8,
            ..Default::default()
        });

        let roughness = |s: &HeightmapSampler| {
            let mut sum = 0.0;
            for i in 0..1000 {
                let x = i as f64 * step;
                sum += (s.sample(x + step, 0.0) - s.sample(x, 0.0)).abs();
            }
            sum
        };

        assert!(
            roughness(&fine) > roughness(&coarse),
            "8 octaves should carry more high-frequency detail than 1"
        );
    }

    #[test]
    fn test_smooth_gradient_no_discontinuities() {
        let sampler = HeightmapSampler::new(HeightmapParams::default());
        let step = 0.5;
        let max_allowed_delta = sampler.max_amplitude() * 0.1;
        for i in 0..4_000 {
            let x = i as f64 * step;
            let delta = (sampler.sample(x + step, 10.0) - sampler.sample(x, 10.0)).abs();
            assert!(
                delta < max_allowed_delta,
                "discontinuity at x={x}: delta={delta} exceeds {max_allowed_delta}"
            );
        }
    }
}
