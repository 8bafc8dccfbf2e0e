//! PNG export of top-down preview images.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use stoneworld_config::GenerationParameters;
use stoneworld_terrain::TerrainSampler;
use stoneworld_terrain::debug_viz::{DebugImage, render_biome_debug, render_heightmap_debug};

use crate::error::AppError;

/// File name of the heightmap preview.
pub const HEIGHTMAP_FILE_NAME: &str = "heightmap.png";
/// File name of the biome preview.
pub const BIOMES_FILE_NAME: &str = "biomes.png";

/// Where [`write_previews`] put its images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewPaths {
    pub heightmap: PathBuf,
    pub biomes: PathBuf,
}

/// Encode `image` as an 8-bit RGBA PNG.
pub fn encode_png<W: Write>(image: &DebugImage, writer: W) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(writer, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.pixels)?;
    writer.finish()
}

/// Encode `image` into a new file at `path`.
pub fn write_png(image: &DebugImage, path: &Path) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    encode_png(image, BufWriter::new(file)).map_err(|source| AppError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Render heightmap and biome previews of the world described by `params`
/// into `dir`, creating it if needed.
pub fn write_previews(
    params: &GenerationParameters,
    dir: &Path,
    width: u32,
    height: u32,
) -> Result<PreviewPaths, AppError> {
    std::fs::create_dir_all(dir).map_err(|source| AppError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let extent = params.extent();
    let sampler = TerrainSampler::new(params.heightmap_params(), &params.biomes, extent);
    let (width, height) = (width.max(1), height.max(1));

    let paths = PreviewPaths {
        heightmap: dir.join(HEIGHTMAP_FILE_NAME),
        biomes: dir.join(BIOMES_FILE_NAME),
    };
    write_png(
        &render_heightmap_debug(&sampler, &extent, width, height),
        &paths.heightmap,
    )?;
    write_png(
        &render_biome_debug(&sampler, &extent, width, height),
        &paths.biomes,
    )?;
    tracing::info!(
        heightmap = %paths.heightmap.display(),
        biomes = %paths.biomes.display(),
        "Wrote previews"
    );
    Ok(paths)
}
