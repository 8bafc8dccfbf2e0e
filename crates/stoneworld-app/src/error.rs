//! Errors surfaced by the `stoneworld` tool.

use std::path::PathBuf;

use stoneworld_config::{ConfigError, ConfigurationError};

/// Everything that can stop a generation run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The OS did not provide a configuration directory and none was given.
    #[error("could not determine a configuration directory; pass --config")]
    NoConfigDir,

    /// Loading or saving `config.ron` failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The world parameters cannot be generated.
    #[error("generation failed: {0}")]
    Generation(#[from] ConfigurationError),

    /// A preview file could not be created.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG encoding failed.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: png::EncodingError,
    },
}
