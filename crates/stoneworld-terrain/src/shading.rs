//! Biome shaping and coloring: applies a biome's height parameters to raw fBm
//! height and blends vertex colors across biome boundaries.

use glam::Vec3;

use crate::biome::{Biome, BiomeClassifier};
use crate::noise_field::NoiseField;

/// Frequency of the roughness noise. Fixed, independent of world size.
pub const ROUGHNESS_SCALE: f64 = 0.05;
/// Height added per unit of roughness above `1.0` at full noise.
pub const ROUGHNESS_GAIN: f64 = 20.0;
/// Distance to the four cardinal neighbors sampled for color blending.
pub const BLEND_NEIGHBOR_DISTANCE: f64 = 500.0;

/// Brightness factor `0.5 + 0.5 * clamp((h + 100) / 200, 0, 1)`.
///
/// Valleys at or below -100 render at half brightness, peaks at or above
/// +100 at full brightness.
pub fn height_brightness(height: f64) -> f32 {
    let t = ((height + 100.0) / 200.0).clamp(0.0, 1.0);
    (0.5 + 0.5 * t) as f32
}

/// Quantize a linear RGB color to opaque RGBA8 without gamma conversion.
pub fn color_to_rgba8(color: Vec3) -> [u8; 4] {
    let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [q(color.x), q(color.y), q(color.z), 255]
}

/// Applies biome shaping to heights and computes blended biome colors.
#[derive(Clone, Debug)]
pub struct BiomeShader {
    noise: NoiseField,
    roughness_z: f64,
    blend_factor: f64,
}

impl BiomeShader {
    /// Create a shader for the given seed. `blend_factor` is clamped to `[0, 1]`.
    pub fn new(seed: i32, blend_factor: f64) -> Self {
        Self {
            noise: NoiseField::new(),
            roughness_z: seed as f64 * 0.5,
            blend_factor: blend_factor.clamp(0.0, 1.0),
        }
    }

    /// `base * multiplier + offset`, plus roughness noise sampled at
    /// `(x * 0.05, y * 0.05, seed * 0.5)` for biomes whose roughness
    /// exceeds `1.0`.
    pub fn shape_height(&self, base_height: f64, x: f64, y: f64, biome: Biome) -> f64 {
        let def = biome.def();
        let mut height = base_height * def.height_multiplier + def.base_offset;

        if def.roughness > 1.0 {
            let n = self
                .noise
                .sample_3d(x * ROUGHNESS_SCALE, y * ROUGHNESS_SCALE, self.roughness_z);
            height += n * ROUGHNESS_GAIN * (def.roughness - 1.0);
        }

        height
    }

    /// Linear RGB color at `(x, y)` for a vertex at `height`, classifying the
    /// center position with `classifier`.
    pub fn color_at(&self, classifier: &BiomeClassifier, x: f64, y: f64, height: f64) -> Vec3 {
        self.biome_color(classifier, classifier.classify(x, y), x, y, height)
    }

    /// Like [`Self::color_at`] for a center biome that is already known.
    pub fn biome_color(
        &self,
        classifier: &BiomeClassifier,
        center: Biome,
        x: f64,
        y: f64,
        height: f64,
    ) -> Vec3 {
        if self.blend_factor <= 0.0 {
            return center.def().tint * height_brightness(height);
        }

        let d = BLEND_NEIGHBOR_DISTANCE;
        let neighbors = [
            classifier.classify(x + d, y),
            classifier.classify(x - d, y),
            classifier.classify(x, y + d),
            classifier.classify(x, y - d),
        ];
        blend_color(center, &neighbors, self.blend_factor, height)
    }
}

/// Blend `center`'s tint towards the tints of differing `neighbors`.
///
/// The blend weight is `blend_factor * differing / neighbors.len()`; the
/// target is the mean of the center tint and every differing neighbor tint.
/// The height brightness factor is applied to the blended tint.
pub fn blend_color(center: Biome, neighbors: &[Biome], blend_factor: f64, height: f64) -> Vec3 {
    let center_tint = center.def().tint;
    let brightness = height_brightness(height);

    let (sum, differing) = neighbors
        .iter()
        .filter(|&&n| n != center)
        .fold((Vec3::ZERO, 0usize), |(sum, count), n| {
            (sum + n.def().tint, count + 1)
        });

    if differing == 0 || neighbors.is_empty() {
        return center_tint * brightness;
    }

    let weight = (blend_factor * differing as f64 / neighbors.len() as f64) as f32;
    let target = (center_tint + sum) / (differing + 1) as f32;
    center_tint.lerp(target, weight) * brightness
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::ClimateParams;

    #[test]
    fn test_color_quantization() {
        assert_eq!(color_to_rgba8(Vec3::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba8(Vec3::ONE), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba8(Vec3::new(0.5, 1.7, -0.2)), [128, 255, 0, 255]);
    }

    #[test]
    fn test_brightness_curve() {
        assert_eq!(height_brightness(-500.0), 0.5);
        assert_eq!(height_brightness(-100.0), 0.5);
        assert_eq!(height_brightness(0.0), 0.75);
        assert_eq!(height_brightness(100.0), 1.0);
        assert_eq!(height_brightness(900.0), 1.0);
    }

    #[test]
    fn test_smooth_biome_applies_multiplier_and_offset_only() {
        let shader = BiomeShader::new(12345, 0.0);
        // Grasslands roughness is 0.5, so no noise term.
        let h = shader.shape_height(40.0, 123.0, 456.0, Biome::Grasslands);
        assert_eq!(h, 20.0);
        // Savanna roughness is exactly 1.0: still no noise.
        let h = shader.shape_height(40.0, 123.0, 456.0, Biome::Savanna);
        assert_eq!(h, 32.0);
        // Tundra has no offset and a smooth surface.
        let h = shader.shape_height(0.0, 0.0, 0.0, Biome::Tundra);
        assert_eq!(h, 0.0);
    }

    #[test]
    fn test_rough_biome_stays_within_gain() {
        let shader = BiomeShader::new(7, 0.0);
        let def = Biome::Mountains.def();
        let max_gain = ROUGHNESS_GAIN * (def.roughness - 1.0);
        let mut varied = false;
        for i in 0..200 {
            let (x, y) = (i as f64 * 13.7, i as f64 * -7.3);
            let h = shader.shape_height(10.0, x, y, Biome::Mountains);
            let base = 10.0 * def.height_multiplier + def.base_offset;
            assert!((h - base).abs() <= max_gain + 1e-9);
            varied |= (h - base).abs() > 1e-6;
        }
        assert!(varied, "roughness noise never contributed");
    }

    #[test]
    fn test_roughness_reads_seed_plane() {
        let noise = NoiseField::new();
        let def = Biome::Mountains.def();
        for seed in [7, 8] {
            let shader = BiomeShader::new(seed, 0.0);
            let (x, y) = (310.0, -47.0);
            let expected = 10.0 * def.height_multiplier
                + def.base_offset
                + noise.sample_3d(x * 0.05, y * 0.05, seed as f64 * 0.5)
                    * ROUGHNESS_GAIN
                    * (def.roughness - 1.0);
            let h = shader.shape_height(10.0, x, y, Biome::Mountains);
            assert!((h - expected).abs() < 1e-9, "seed {seed}: {h} vs {expected}");
        }
    }

    #[test]
    fn test_no_blend_when_neighbors_match() {
        let c = blend_color(Biome::Desert, &[Biome::Desert; 4], 1.0, 100.0);
        assert_eq!(c, Biome::Desert.def().tint);
    }

    #[test]
    fn test_blend_weight_scales_with_differing_neighbors() {
        let center = Biome::Desert;
        let other = Biome::Savanna;
        let one = blend_color(center, &[other, center, center, center], 1.0, 100.0);
        let two = blend_color(center, &[other, other, center, center], 1.0, 100.0);
        let base = center.def().tint;
        assert!(one.distance(base) > 0.0);
        assert!(two.distance(base) > one.distance(base));
    }

    #[test]
    fn test_blend_factor_zero_matches_unblended() {
        let c = blend_color(Biome::Tundra, &[Biome::ArcticSnow; 4], 0.0, 0.0);
        assert_eq!(c, Biome::Tundra.def().tint * 0.75);
    }

    #[test]
    fn test_blend_narrows_boundary_jump() {
        let (a, b) = (Biome::Grasslands, Biome::Desert);
        let raw_jump = a.def().tint.distance(b.def().tint);
        // Two vertices straddling an a|b boundary along x.
        let left = blend_color(a, &[b, a, a, a], 1.0, 100.0);
        let right = blend_color(b, &[b, a, b, b], 1.0, 100.0);
        let blended_jump = left.distance(right);
        assert!(
            blended_jump < raw_jump,
            "blended jump {blended_jump} should be below raw jump {raw_jump}"
        );
    }

    #[test]
    fn test_field_boundaries_blend_while_classification_switches() {
        let params = ClimateParams::default();
        let classifier = BiomeClassifier::new(12345, &params, 100_000.0);
        let shader = BiomeShader::new(12345, 1.0);
        let d = BLEND_NEIGHBOR_DISTANCE;

        let mut checked = 0;
        for row in -20..=20 {
            let y = row as f64 * 1_900.0;
            let mut x = -45_000.0;
            while x < 45_000.0 && checked < 5 {
                let lo_biome = classifier.classify(x, y);
                if lo_biome != classifier.classify(x + 50.0, y) {
                    // Bisect down to a one-unit straddle.
                    let (mut lo, mut hi) = (x, x + 50.0);
                    while hi - lo > 1.0 {
                        let mid = 0.5 * (lo + hi);
                        if classifier.classify(mid, y) == lo_biome {
                            lo = mid;
                        } else {
                            hi = mid;
                        }
                    }
                    let (a, b) = (classifier.classify(lo, y), classifier.classify(hi, y));
                    let neighbors = |px: f64| {
                        [(px + d, y), (px - d, y), (px, y + d), (px, y - d)]
                            .map(|(nx, ny)| classifier.classify(nx, ny))
                    };
                    let (left_n, right_n) = (neighbors(lo), neighbors(hi));
                    let only_two = left_n.iter().chain(&right_n).all(|&n| n == a || n == b);
                    let blends = left_n.contains(&b) || right_n.contains(&a);
                    if a != b && only_two && blends {
                        let left = shader.biome_color(&classifier, a, lo, y, 0.0);
                        let right = shader.biome_color(&classifier, b, hi, y, 0.0);
                        let raw = (a.def().tint - b.def().tint).length() * height_brightness(0.0);
                        assert!(left.distance(right) < raw);
                        checked += 1;
                    }
                }
                x += 50.0;
            }
        }
        assert!(checked > 0, "no two-biome boundary found to check");
    }

    #[test]
    fn test_color_at_is_deterministic() {
        let classifier = BiomeClassifier::new(3, &ClimateParams::default(), 10_000.0);
        let shader = BiomeShader::new(3, 0.5);
        for i in 0..30 {
            let (x, y) = (i as f64 * 333.0 - 5_000.0, i as f64 * 111.0);
            assert_eq!(
                shader.color_at(&classifier, x, y, 12.0),
                shader.color_at(&classifier, x, y, 12.0)
            );
        }
    }
}
