//! Error types for inr_io operations.

use thiserror::Error;

/// Errors that can occur while loading signals or persisting artifacts.
#[derive(Error, Debug)]
pub enum IoError {
    /// Underlying filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Raster image could not be decoded.
    #[error("image decode error: {0}")]
    Decode(#[from] image::ImageError),

    /// The loaded signal's rank does not match the expected dimensionality.
    #[error("rank mismatch: expected a {expected}D signal, got {got}D")]
    RankMismatch {
        /// Expected dimensionality (2 or 3).
        expected: usize,
        /// Actual dimensionality found in the file.
        got: usize,
    },

    /// Invalid container format during deserialization.
    #[error("invalid volume format: {message}")]
    InvalidFormat {
        /// Description of the format error.
        message: &'static str,
    },

    /// File ended before the declared payload was read.
    #[error("truncated volume payload: expected {expected} values, got {got}")]
    Truncated {
        /// Expected number of values.
        expected: usize,
        /// Number of values actually present.
        got: usize,
    },

    /// Bounding-box crop found no samples above the threshold.
    #[error("no samples above threshold {threshold}, cannot crop")]
    EmptyCrop {
        /// The occupancy threshold used for the crop.
        threshold: f32,
    },

    /// Metrics serialization failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for inr_io operations.
pub type Result<T> = std::result::Result<T, IoError>;
