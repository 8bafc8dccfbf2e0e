//! Debug renderers: color-coded heightmap and biome map over a world extent.

use glam::Vec3;

use super::image::DebugImage;
use crate::sampler::{TerrainSampler, WorldExtent};
use crate::shading::color_to_rgba8;

/// Pixel `(px, py)` center in world space.
fn pixel_to_world(extent: &WorldExtent, width: u32, height: u32, px: u32, py: u32) -> (f64, f64) {
    let (min_x, min_y, _, _) = extent.bounds();
    let u = (px as f64 + 0.5) / width as f64;
    let v = (py as f64 + 0.5) / height as f64;
    (min_x + u * extent.size_x, min_y + v * extent.size_y)
}

/// Render shaped terrain height over `extent` as a color-coded elevation map.
///
/// Heights are normalized by the sampler's height bound, so the full palette
/// spans the parameter-derived envelope rather than the observed range.
pub fn render_heightmap_debug(
    sampler: &TerrainSampler,
    extent: &WorldExtent,
    width: u32,
    height: u32,
) -> DebugImage {
    let mut image = DebugImage::new(width, height);
    let bound = sampler.height_bound();

    for py in 0..height {
        for px in 0..width {
            let (x, y) = pixel_to_world(extent, width, height, px, py);
            let h = sampler.sample(x, y).height;
            let normalized = if bound > 0.0 {
                ((h / bound + 1.0) * 0.5).clamp(0.0, 1.0)
            } else {
                0.5
            };
            let (r, g, b) = height_to_color(normalized);
            image.set_pixel(px, py, [r, g, b, 255]);
        }
    }

    image
}

/// Map a normalized height in `[0, 1]` to an RGB elevation color.
///
/// Bands: lowland green, upland brown, rock grey, snow white.
pub fn height_to_color(normalized: f64) -> (u8, u8, u8) {
    let n = normalized.clamp(0.0, 1.0);
    if n < 0.45 {
        let t = n / 0.45;
        (
            (20.0 + t * 70.0) as u8,
            (90.0 + t * 80.0) as u8,
            (30.0 + t * 20.0) as u8,
        )
    } else if n < 0.65 {
        let t = (n - 0.45) / 0.2;
        (
            (90.0 + t * 50.0) as u8,
            (170.0 - t * 80.0) as u8,
            (50.0 + t * 10.0) as u8,
        )
    } else if n < 0.85 {
        let t = (n - 0.65) / 0.2;
        let v = 110.0 + t * 50.0;
        (v as u8, v as u8, (v + 5.0) as u8)
    } else {
        let t = (n - 0.85) / 0.15;
        let v = 200.0 + t * 55.0;
        (v as u8, v as u8, v as u8)
    }
}

/// Render the classified biome over `extent` using each biome's tint.
///
/// Without biomes the image is uniform grey.
pub fn render_biome_debug(
    sampler: &TerrainSampler,
    extent: &WorldExtent,
    width: u32,
    height: u32,
) -> DebugImage {
    let mut image = DebugImage::new(width, height);

    for py in 0..height {
        for px in 0..width {
            let (x, y) = pixel_to_world(extent, width, height, px, py);
            let tint = sampler
                .biome_at(x, y)
                .map_or(Vec3::splat(0.5), |biome| biome.def().tint);
            image.set_pixel(px, py, color_to_rgba8(tint));
        }
    }

    image
}
