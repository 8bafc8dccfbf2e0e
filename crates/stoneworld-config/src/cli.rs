//! Command-line argument parsing for the `stoneworld` tool.

use std::path::PathBuf;

use clap::Parser;
use stoneworld_terrain::{Biome, BiomeMode, ClimateParams};

use crate::Config;

/// Stoneworld command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "stoneworld", about = "Procedural biome terrain generator")]
pub struct CliArgs {
    /// World seed.
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i32>,

    /// World extent along X in world units.
    #[arg(long)]
    pub size_x: Option<f64>,

    /// World extent along Y in world units.
    #[arg(long)]
    pub size_y: Option<f64>,

    /// Grid spacing in world units.
    #[arg(long)]
    pub resolution: Option<f64>,

    /// Peak fBm height before biome shaping.
    #[arg(long)]
    pub height_variation: Option<f64>,

    /// Number of fBm octaves.
    #[arg(long)]
    pub octaves: Option<u32>,

    /// Biome mode: `off`, `climate`, or a biome key such as `desert`.
    #[arg(long, value_parser = parse_biome_mode)]
    pub biome: Option<BiomeMode>,

    /// Worker threads for the mesh build (defaults to the CPU count).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Write `heightmap.png` and `biomes.png` previews into this directory.
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse `off`, `climate`, or a biome key/name into a [`BiomeMode`].
///
/// `climate` yields default climate parameters.
pub fn parse_biome_mode(s: &str) -> Result<BiomeMode, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => Ok(BiomeMode::Off),
        "climate" => Ok(BiomeMode::Climate(ClimateParams::default())),
        _ => s
            .parse::<Biome>()
            .map(BiomeMode::Fixed)
            .map_err(|e| e.to_string()),
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    ///
    /// `--biome climate` keeps already-configured climate parameters.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        let world = &mut self.world;
        if let Some(seed) = args.seed {
            world.seed = seed;
        }
        if let Some(x) = args.size_x {
            world.size_x = x;
        }
        if let Some(y) = args.size_y {
            world.size_y = y;
        }
        if let Some(res) = args.resolution {
            world.resolution = res;
        }
        if let Some(hv) = args.height_variation {
            world.height_variation = hv;
        }
        if let Some(octaves) = args.octaves {
            world.octaves = octaves;
        }
        if let Some(ref mode) = args.biome {
            let keep_climate = matches!(
                (&world.biomes, mode),
                (BiomeMode::Climate(_), BiomeMode::Climate(_))
            );
            if !keep_climate {
                world.biomes = mode.clone();
            }
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(-4),
            resolution: Some(50.0),
            biome: Some(BiomeMode::Fixed(Biome::Tundra)),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.seed, -4);
        assert_eq!(config.world.resolution, 50.0);
        assert_eq!(config.world.biomes, BiomeMode::Fixed(Biome::Tundra));
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.world.size_x, 10_000.0);
        assert_eq!(config.world.octaves, 4);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_climate_override_keeps_tuning() {
        let mut config = Config::default();
        let tuned = ClimateParams {
            blend_factor: 0.9,
            ..Default::default()
        };
        config.world.biomes = BiomeMode::Climate(tuned.clone());
        let args = CliArgs {
            biome: Some(BiomeMode::Climate(ClimateParams::default())),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.world.biomes, BiomeMode::Climate(tuned));
    }

    #[test]
    fn test_parse_biome_mode() {
        assert_eq!(parse_biome_mode("off"), Ok(BiomeMode::Off));
        assert_eq!(
            parse_biome_mode("Climate"),
            Ok(BiomeMode::Climate(ClimateParams::default()))
        );
        assert_eq!(
            parse_biome_mode("volcanic_wasteland"),
            Ok(BiomeMode::Fixed(Biome::VolcanicWasteland))
        );
        assert!(parse_biome_mode("ocean").is_err());
    }

    #[test]
    fn test_parse_command_line() {
        let args = CliArgs::parse_from([
            "stoneworld",
            "--seed",
            "-12",
            "--size-x",
            "2000",
            "--biome",
            "desert",
            "--preview",
            "out",
        ]);
        assert_eq!(args.seed, Some(-12));
        assert_eq!(args.size_x, Some(2_000.0));
        assert_eq!(args.biome, Some(BiomeMode::Fixed(Biome::Desert)));
        assert_eq!(args.preview, Some(PathBuf::from("out")));
        assert!(args.config.is_none());
    }
}
