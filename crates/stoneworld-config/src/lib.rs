//! Configuration for Stoneworld terrain generation.
//!
//! Holds the generation parameters and their clamping rules, the RON-persisted
//! host configuration, and CLI overrides via clap.

mod cli;
mod config;
mod error;
mod params;

pub use cli::{CliArgs, parse_biome_mode};
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, PreviewConfig, default_config_dir};
pub use error::{ConfigError, ConfigurationError};
pub use params::GenerationParameters;
