//! Checkpoint save/load for trained models.
//!
//! A checkpoint directory holds the burn model record (`model.bin`) and a
//! `metadata.json` describing the run that produced it.

use std::fs;
use std::path::Path;

use burn::module::Module;
use burn::prelude::*;
use burn::record::{BinFileRecorder, FullPrecisionSettings};
use serde::{Deserialize, Serialize};

use crate::error::{NeuralInrError, Result};
use crate::nn::Inr;

/// Checkpoint metadata stored alongside the model record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckpointMetadata {
    /// Nonlinearity family of the recorded model.
    pub nonlinearity: String,
    /// Epochs the model was trained for.
    pub epochs: usize,
    /// Best tracked metric reached during training.
    pub best_metric: f32,
    /// Spatial dimensions of the fitted signal.
    pub signal_dims: (usize, usize, usize),
    /// Checkpoint version for compatibility.
    pub version: u32,
}

impl CheckpointMetadata {
    /// Create metadata for a finished run.
    pub fn new(
        nonlinearity: String,
        epochs: usize,
        best_metric: f32,
        signal_dims: (usize, usize, usize),
    ) -> Self {
        Self {
            nonlinearity,
            epochs,
            best_metric,
            signal_dims,
            version: 1,
        }
    }
}

/// Save a model and its metadata to a checkpoint directory.
pub fn save_checkpoint<B: Backend>(
    dir: &Path,
    model: &Inr<B>,
    metadata: &CheckpointMetadata,
) -> Result<()> {
    fs::create_dir_all(dir)?;

    let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
    model
        .clone()
        .save_file(dir.join("model"), &recorder)
        .map_err(|e| NeuralInrError::Checkpoint {
            message: format!("failed to record model: {}", e),
        })?;

    fs::write(
        dir.join("metadata.json"),
        serde_json::to_string_pretty(metadata)?,
    )?;

    log::info!("saved checkpoint to {:?}", dir);

    Ok(())
}

/// Load a checkpoint into a freshly constructed model.
///
/// The model must have been built with the same configuration and
/// nonlinearity the checkpoint was recorded from.
pub fn load_checkpoint<B: Backend>(
    dir: &Path,
    model: Inr<B>,
    device: &B::Device,
) -> Result<(Inr<B>, CheckpointMetadata)> {
    let recorder = BinFileRecorder::<FullPrecisionSettings>::new();
    let model = model
        .load_file(dir.join("model"), &recorder, device)
        .map_err(|e| NeuralInrError::Checkpoint {
            message: format!("failed to load model record: {}", e),
        })?;

    let metadata: CheckpointMetadata =
        serde_json::from_str(&fs::read_to_string(dir.join("metadata.json"))?)?;

    Ok((model, metadata))
}

/// Check whether a directory holds a complete checkpoint.
pub fn checkpoint_exists(dir: &Path) -> bool {
    dir.join("model.bin").exists() && dir.join("metadata.json").exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InrModelConfig, Nonlinearity};
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_checkpoint_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ckpt");
        let device = Default::default();

        let config = InrModelConfig::new(2, 1)
            .with_hidden_layers(1)
            .with_hidden_features(8);
        let model = Inr::<TestBackend>::new(Nonlinearity::Siren, &config, &device);

        let metadata = CheckpointMetadata::new("siren".into(), 100, 28.5, (8, 8, 1));
        save_checkpoint(&path, &model, &metadata).unwrap();
        assert!(checkpoint_exists(&path));

        let fresh = Inr::<TestBackend>::new(Nonlinearity::Siren, &config, &device);
        let (restored, restored_metadata) = load_checkpoint(&path, fresh, &device).unwrap();

        assert_eq!(restored_metadata, metadata);

        // Restored weights must reproduce the recorded model's outputs.
        let coords = Tensor::from_data([[0.5f32, -0.5]], &device);
        let a: Vec<f32> = model.forward(coords.clone()).to_data().to_vec().unwrap();
        let b: Vec<f32> = restored.forward(coords).to_data().to_vec().unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-6);
        }
    }

    #[test]
    fn test_missing_checkpoint_detected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!checkpoint_exists(&dir.path().join("nope")));
    }
}
