//! Error types for neural_inr.

use thiserror::Error;

/// Errors that can occur during INR training and postprocessing.
#[derive(Error, Debug)]
pub enum NeuralInrError {
    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the configuration error.
        message: String,
    },

    /// Training produced a non-finite loss and was aborted.
    #[error("training diverged: non-finite loss {loss} at epoch {epoch}")]
    TrainingDiverged {
        /// Epoch at which the loss became non-finite.
        epoch: usize,
        /// The offending loss value.
        loss: f32,
    },

    /// Isosurface extraction failed.
    #[error("mesh extraction failed: {0}")]
    MeshExtraction(#[from] inr_core::CoreError),

    /// Signal loading or artifact persistence failed.
    #[error("load error: {0}")]
    Load(#[from] inr_io::IoError),

    /// Checkpoint recording failed.
    #[error("checkpoint error: {message}")]
    Checkpoint {
        /// Description of the error.
        message: String,
    },

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata serialization failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl NeuralInrError {
    /// Shorthand for an [`NeuralInrError::InvalidConfig`] with a formatted message.
    pub fn config<S: Into<String>>(message: S) -> Self {
        NeuralInrError::InvalidConfig {
            message: message.into(),
        }
    }
}

/// Result type alias for neural_inr operations.
pub type Result<T> = std::result::Result<T, NeuralInrError>;
