//! Error types for the raycaster

/// Result type alias
pub type Result<T> = std::result::Result<T, RaycastError>;

#[derive(Debug, thiserror::Error)]
pub enum RaycastError {
    /// Map layout does not contain `width * height` cells
    #[error("map layout has {actual} cells, expected {expected} ({width}x{height})")]
    MapShape {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Viewer start position is not inside an open cell
    #[error("viewer start ({x}, {y}) is not inside an open cell")]
    BlockedStart { x: f32, y: f32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Window or presentation surface failure
    #[error("window error: {0}")]
    Window(String),
}
