//! # neural_inr
//!
//! Implicit neural representation training with Burn.
//!
//! This crate fits coordinate-to-value networks to individual signals: a 2D
//! image observed under sensor noise, or a 3D occupancy volume. It wires
//! together the nonlinearity families, a batched SGD trainer over randomly
//! permuted coordinate indices, per-epoch PSNR/IoU tracking, checkpointing,
//! and isosurface postprocessing, on top of `inr_core` and `inr_io`.
//!
//! ## Features
//!
//! - **Model families**: Wire (Gabor), Siren, Gauss, MFN, ReLU with
//!   optional positional encoding, selected at construction time
//! - **Batched trainer**: fresh index permutation per epoch, remainder-size
//!   final minibatch, exponential learning-rate decay
//! - **Best-snapshot tracking**: the reconstruction buffer is snapshotted
//!   whenever the tracked metric strictly improves
//! - **Noise synthesis**: Poisson photon noise plus Gaussian readout noise
//! - **Best-effort tracking**: JSONL scalar streams that never abort a run
//!
//! ## Quick Start
//!
//! ```ignore
//! use burn::backend::{Autodiff, NdArray};
//! use neural_inr::prelude::*;
//!
//! type B = Autodiff<NdArray>;
//!
//! let device = Default::default();
//! let image = inr_io::load_image("data/parrot.png")?;
//! let noisy = synthesize(&image, &NoiseConfig::new())?;
//!
//! let model_config = InrModelConfig::new(2, image.channels);
//! let model = Inr::<B>::new(Nonlinearity::Wire, &model_config, &device);
//!
//! let mut trainer =
//!     InrTrainer::<B>::denoising(TrainingConfig::new(), &image, &noisy, &device)?;
//! let trained = trainer.train(model)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! inr_core (pure math)
//!     │
//!     ├──────────────────┐
//!     ▼                  ▼
//! inr_io            neural_inr
//! (storage)          (training)
//!     ▲                  │
//!     └──────────────────┘
//!        run artifacts / checkpoints
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod export;
pub mod nn;
pub mod noise;
pub mod tracking;
pub mod training;

// Re-export key types for convenience
pub use config::{InrModelConfig, NoiseConfig, Nonlinearity, TrainingConfig};
pub use error::{NeuralInrError, Result};
pub use nn::Inr;
pub use noise::synthesize;
pub use training::{InrTrainer, TrainTask, TrainerState};

// Re-export from inr_core and inr_io for convenience
pub use inr_core::{GridShape, Mesh};
pub use inr_io::Signal;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{InrModelConfig, NoiseConfig, Nonlinearity, TrainingConfig};
    pub use crate::error::{NeuralInrError, Result};
    pub use crate::export::{extract_reconstruction_mesh, save_reconstruction_mesh};
    pub use crate::nn::{GaussNet, Inr, Mfn, PositionalEncoding, ReluMlp, Siren, Wire};
    pub use crate::noise::synthesize;
    pub use crate::tracking::{run_name, JsonlTracker, NoopTracker, Tracker};
    pub use crate::training::{
        checkpoint_exists, decay_multiplier, load_checkpoint, save_checkpoint, BatchSampler,
        CheckpointMetadata, EpochRecord, InrTrainer, TrainTask, TrainerState, TrainingHistory,
    };

    pub use inr_core::{GridShape, Mesh, Point3};
    pub use inr_io::{RunArtifacts, RunPaths, Signal};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api() {
        let _training = TrainingConfig::new();
        let _noise = NoiseConfig::new();
        let _model = InrModelConfig::new(2, 1);
        let _nonlin: Nonlinearity = "wire".parse().unwrap();
    }
}
