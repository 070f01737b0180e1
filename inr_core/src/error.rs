//! Error types for inr_core.

use thiserror::Error;

/// Errors that can occur in the pure algorithm layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Buffer length does not match the declared grid shape.
    #[error("shape mismatch: expected {expected} samples, got {got}")]
    ShapeMismatch {
        /// Expected sample count.
        expected: usize,
        /// Actual sample count.
        got: usize,
    },

    /// Marching cubes found no cell crossing the iso-value.
    #[error("no isosurface crosses threshold {threshold}")]
    NoIsosurface {
        /// The threshold that produced no crossings.
        threshold: f32,
    },

    /// A volume axis is too small to contain a single marching-cubes cell.
    #[error("volume too small for mesh extraction: dims ({h}, {w}, {t})")]
    DegenerateVolume {
        /// First axis size.
        h: usize,
        /// Second axis size.
        w: usize,
        /// Third axis size.
        t: usize,
    },
}

/// Result type alias for inr_core operations.
pub type Result<T> = core::result::Result<T, CoreError>;
