//! Training and noise configuration types.

use burn::config::Config;

use crate::error::NeuralInrError;

/// Configuration for the batched trainer.
#[derive(Config, Debug)]
pub struct TrainingConfig {
    /// Number of epochs (full passes over all samples).
    #[config(default = 2000)]
    pub epochs: usize,

    /// Base learning rate.
    #[config(default = 5e-3)]
    pub learning_rate: f64,

    /// Maximum sample indices per minibatch.
    #[config(default = 65536)]
    pub batch_size: usize,

    /// The learning-rate multiplier reached at the final epoch.
    ///
    /// The rate decays as `decay_factor ^ min(epoch / epochs, 1)` and never
    /// decays further once the budget is exceeded.
    #[config(default = 0.1)]
    pub lr_decay_factor: f64,

    /// Binarization threshold for IoU tracking on occupancy tasks.
    #[config(default = 0.5)]
    pub iou_threshold: f32,

    /// Seed for the per-epoch index permutation.
    #[config(default = 42)]
    pub seed: u64,

    /// Log progress every N epochs.
    #[config(default = 100)]
    pub log_interval: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), NeuralInrError> {
        if self.epochs == 0 {
            return Err(NeuralInrError::config("epochs must be positive"));
        }
        if self.learning_rate <= 0.0 {
            return Err(NeuralInrError::config("learning_rate must be positive"));
        }
        if self.batch_size == 0 {
            return Err(NeuralInrError::config("batch_size must be positive"));
        }
        if self.lr_decay_factor <= 0.0 || self.lr_decay_factor > 1.0 {
            return Err(NeuralInrError::config(
                "lr_decay_factor must be in (0, 1]",
            ));
        }
        if !(0.0..=1.0).contains(&self.iou_threshold) {
            return Err(NeuralInrError::config(
                "iou_threshold must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// Configuration for the sensor-noise synthesizer.
#[derive(Config, Debug)]
pub struct NoiseConfig {
    /// Readout noise level in decibels relative to unit peak.
    #[config(default = 2.0)]
    pub readout_snr_db: f64,

    /// Expected photon count at the brightest sample (`tau`).
    ///
    /// An infinite value disables the photon-counting stage.
    #[config(default = 30.0)]
    pub max_photon_count: f64,

    /// Seed for the noise draw.
    #[config(default = 42)]
    pub seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), NeuralInrError> {
        if self.readout_snr_db < 0.0 || self.readout_snr_db.is_nan() {
            return Err(NeuralInrError::config(
                "readout_snr_db must be non-negative",
            ));
        }
        if self.max_photon_count <= 0.0 || self.max_photon_count.is_nan() {
            return Err(NeuralInrError::config(
                "max_photon_count must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_training_config() {
        let config = TrainingConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_batch_rejected() {
        let config = TrainingConfig::new().with_batch_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_decay_factor_bounds() {
        assert!(TrainingConfig::new()
            .with_lr_decay_factor(0.0)
            .validate()
            .is_err());
        assert!(TrainingConfig::new()
            .with_lr_decay_factor(1.5)
            .validate()
            .is_err());
        assert!(TrainingConfig::new()
            .with_lr_decay_factor(1.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_negative_noise_params_rejected() {
        assert!(NoiseConfig::new()
            .with_readout_snr_db(-1.0)
            .validate()
            .is_err());
        assert!(NoiseConfig::new()
            .with_max_photon_count(-5.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_infinite_photon_count_allowed() {
        let config = NoiseConfig::new().with_max_photon_count(f64::INFINITY);
        assert!(config.validate().is_ok());
    }
}
