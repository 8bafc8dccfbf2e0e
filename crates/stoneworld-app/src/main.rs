//! The `stoneworld` command-line generator.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use stoneworld_app::{AppError, WorldGenerator, write_previews};
use stoneworld_config::{CliArgs, Config, default_config_dir};
use stoneworld_log::init_logging;
use stoneworld_mesh::TerrainMeshBuilder;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let loaded = load_config(&args);
    let (log_dir, log_config) = match &loaded {
        Ok((config, dir)) => (Some(dir.join("logs")), Some(config)),
        Err(_) => (None, None),
    };
    init_logging(log_dir.as_deref(), cfg!(debug_assertions), log_config);

    match loaded.and_then(|(config, _)| run(&config, &args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Load `config.ron` and apply command-line overrides.
fn load_config(args: &CliArgs) -> Result<(Config, PathBuf), AppError> {
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir().ok_or(AppError::NoConfigDir)?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    Ok((config, config_dir))
}

fn run(config: &Config, args: &CliArgs) -> Result<(), AppError> {
    let builder = match args.threads {
        Some(threads) => TerrainMeshBuilder::with_threads(threads),
        None => TerrainMeshBuilder::new(),
    };
    let threads = builder.threads();
    let mut generator = WorldGenerator::with_builder(builder);
    let params = generator.configure(config.world.clone())?;
    tracing::info!(
        threads,
        seed = params.seed,
        size_x = params.size_x,
        size_y = params.size_y,
        resolution = params.resolution,
        "Generating world"
    );

    let start = Instant::now();
    let mesh = generator.generate()?;
    let (min_h, max_h) = mesh.height_range().unwrap_or_default();
    tracing::info!(
        vertices_x = mesh.vertices_x,
        vertices_y = mesh.vertices_y,
        min_height = min_h,
        max_height = max_h,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Mesh ready"
    );

    if let Some(dir) = &args.preview {
        write_previews(
            generator.parameters(),
            dir,
            config.preview.width,
            config.preview.height,
        )?;
    }
    Ok(())
}
