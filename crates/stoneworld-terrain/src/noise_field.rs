//! Deterministic gradient noise field shared by every terrain sampler.

use noise::{NoiseFn, Perlin};

/// Per-axis seed multipliers. Distinct irrational-looking factors make two
/// seeds diverge as soon as they are applied.
pub(crate) const SEED_MULTIPLIER_X: f64 = 0.1031;
pub(crate) const SEED_MULTIPLIER_Y: f64 = 0.1030;
pub(crate) const SEED_MULTIPLIER_Z: f64 = 0.0973;

/// Seed-derived coordinate offsets `[x, y, z]` shared by all seeded samplers.
pub(crate) fn seed_offsets(seed: i32) -> [f64; 3] {
    let seed = seed as f64;
    [
        seed * SEED_MULTIPLIER_X,
        seed * SEED_MULTIPLIER_Y,
        seed * SEED_MULTIPLIER_Z,
    ]
}

/// Classic Perlin gradient noise over continuous 2D/3D coordinates.
///
/// The permutation table is fixed; callers decorrelate fields and seeds by
/// offsetting the sample coordinates instead of reseeding. That keeps every
/// sampler in a generation run reading one immutable field.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Create the noise field with the fixed permutation table.
    pub fn new() -> Self {
        Self {
            perlin: Perlin::new(Perlin::DEFAULT_SEED),
        }
    }

    /// Sample the field at a 3D point. Always returns a value in `[-1, 1]`.
    #[inline]
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z]).clamp(-1.0, 1.0)
    }

    /// Sample the `z = 0` plane of the field.
    #[inline]
    pub fn sample_2d(&self, x: f64, y: f64) -> f64 {
        self.sample_3d(x, y, 0.0)
    }

    /// Sample the field and remap the result from `[-1, 1]` to `[0, 1]`.
    #[inline]
    pub fn sample_3d_unit(&self, x: f64, y: f64, z: f64) -> f64 {
        ((self.sample_3d(x, y, z) + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

impl Default for NoiseField {
    fn default() -> Self {
        Self::new()
    }
}
