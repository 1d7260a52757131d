//! Error types shared by the map crates.
//!
//! Each crate wraps these in its own error enum (`MapError`, `SaveError`).

use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Map dimensions must both be positive
    #[error("Invalid map dimensions {width}x{height}: width and height must be positive")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },
}

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serialization failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Deserialization failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Body decompression failed
    #[error("Decompression failed: {0}")]
    CompressionFailed(String),

    /// Invalid magic bytes
    #[error("Invalid snapshot format")]
    InvalidFormat,

    /// Schema version mismatch
    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch {
        /// Expected version
        expected: String,
        /// Actual version found
        actual: String,
    },

    /// A grid in the snapshot does not match the configured dimensions
    #[error("Grid {grid} has {actual} cells, expected {expected}")]
    GridSizeMismatch {
        /// Name of the offending grid
        grid: &'static str,
        /// Cell count implied by the config
        expected: usize,
        /// Cell count found
        actual: usize,
    },

    /// The snapshot config itself is invalid
    #[error("Invalid snapshot config: {0}")]
    InvalidConfig(#[from] ConfigError),
}
