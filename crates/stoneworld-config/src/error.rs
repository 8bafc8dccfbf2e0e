//! Configuration error types.

/// Generation parameters that cannot produce a mesh, even after clamping.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// The grid has fewer than two vertices along an axis.
    #[error("degenerate grid: {vertices_x} x {vertices_y} vertices (need at least 2 x 2)")]
    DegenerateGrid { vertices_x: u64, vertices_y: u64 },

    /// The grid has more vertices than a `u32` index buffer can address.
    #[error("grid too large: {vertices_x} x {vertices_y} vertices exceeds u32 indices")]
    GridTooLarge { vertices_x: u64, vertices_y: u64 },

    /// A floating-point parameter is NaN or infinite.
    #[error("parameter `{field}` is not finite")]
    NonFinite { field: &'static str },
}

/// Errors that can occur when loading, saving, or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// The loaded world parameters cannot be generated.
    #[error("invalid world parameters: {0}")]
    Invalid(#[from] ConfigurationError),
}
