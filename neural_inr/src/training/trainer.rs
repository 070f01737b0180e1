//! The batched trainer.
//!
//! Drives minibatch SGD over randomly permuted coordinate indices: each
//! epoch reshuffles all sample indices, walks them in contiguous chunks,
//! steps the optimizer once per chunk, and mirrors the model's raw
//! predictions into a host-side reconstruction buffer. The buffer is
//! snapshotted whenever the epoch's tracked metric improves.

use burn::nn::loss::{MseLoss, Reduction};
use burn::optim::{AdamConfig, GradientsParams, Optimizer};
use burn::prelude::*;
use burn::tensor::backend::AutodiffBackend;
use instant::Instant;

use inr_core::{build_grid, iou, psnr, GridShape};
use inr_io::{RunArtifacts, Signal};

use crate::config::TrainingConfig;
use crate::error::{NeuralInrError, Result};
use crate::nn::Inr;
use crate::tracking::{NoopTracker, Tracker};

use super::batch::BatchSampler;
use super::history::{EpochRecord, TrainingHistory};
use super::schedule::decay_multiplier;

/// Which quality metric the trainer tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainTask {
    /// Continuous reconstruction tracked by PSNR against the noisy target.
    Denoising,
    /// Occupancy reconstruction tracked by IoU at a binarization threshold.
    Occupancy,
}

impl TrainTask {
    /// Short metric name for logs and tracking streams.
    pub fn metric_name(&self) -> &'static str {
        match self {
            TrainTask::Denoising => "psnr",
            TrainTask::Occupancy => "iou",
        }
    }
}

/// Trainer lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerState {
    /// Constructed, no epoch run yet.
    Initialized,
    /// Inside the epoch loop.
    Running,
    /// Finished the fixed iteration budget (or aborted on divergence).
    Stopped,
}

/// Batched SGD trainer for implicit models.
///
/// Owns the coordinate grid, the training target, the reconstruction
/// buffer, and the best-seen snapshot; nothing else aliases them.
#[derive(Debug)]
pub struct InrTrainer<B: AutodiffBackend> {
    config: TrainingConfig,
    task: TrainTask,
    shape: GridShape,
    channels: usize,

    coords: Tensor<B, 2>,
    targets: Tensor<B, 2>,
    /// Host copy of the training target (noisy observation, or the volume).
    target_host: Vec<f32>,
    /// Host copy of the ground truth, used for the reporting metric.
    reference_host: Vec<f32>,

    reconstruction: Vec<f32>,
    best: Option<Vec<f32>>,
    best_metric: f32,

    history: TrainingHistory,
    state: TrainerState,
    device: B::Device,
}

impl<B: AutodiffBackend> InrTrainer<B> {
    /// Create a denoising trainer: fits the noisy observation, reports
    /// against the clean reference.
    pub fn denoising(
        config: TrainingConfig,
        reference: &Signal,
        noisy: &Signal,
        device: &B::Device,
    ) -> Result<Self> {
        if reference.shape != noisy.shape || reference.channels != noisy.channels {
            return Err(NeuralInrError::config(
                "reference and noisy observation must share shape and channels",
            ));
        }
        Self::new(config, TrainTask::Denoising, reference, noisy, device)
    }

    /// Create an occupancy trainer: the volume is both target and reference.
    pub fn occupancy(config: TrainingConfig, volume: &Signal, device: &B::Device) -> Result<Self> {
        Self::new(config, TrainTask::Occupancy, volume, volume, device)
    }

    fn new(
        config: TrainingConfig,
        task: TrainTask,
        reference: &Signal,
        target: &Signal,
        device: &B::Device,
    ) -> Result<Self> {
        config.validate()?;

        let n = reference.sample_count();
        if n == 0 {
            return Err(NeuralInrError::config("signal has no samples"));
        }
        let channels = reference.channels.max(1);

        let coords_host = build_grid(reference.shape);
        let in_dim = reference.shape.in_dim();
        let coords = Tensor::from_data(TensorData::new(coords_host, [n, in_dim]), device);
        let targets = Tensor::from_data(
            TensorData::new(target.data.clone(), [n, channels]),
            device,
        );

        Ok(Self {
            config,
            task,
            shape: reference.shape,
            channels,
            coords,
            targets,
            target_host: target.data.clone(),
            reference_host: reference.data.clone(),
            reconstruction: vec![0.0; n * channels],
            best: None,
            best_metric: f32::NEG_INFINITY,
            history: TrainingHistory::new(),
            state: TrainerState::Initialized,
            device: device.clone(),
        })
    }

    /// Train a model for the configured epoch budget.
    pub fn train(&mut self, model: Inr<B>) -> Result<Inr<B>> {
        self.train_tracked(model, &mut NoopTracker)
    }

    /// Train a model, streaming per-epoch scalars to a tracker.
    ///
    /// Tracker failures are the tracker's problem; they never abort the
    /// run. A non-finite loss does: the trainer stops and returns
    /// [`NeuralInrError::TrainingDiverged`].
    pub fn train_tracked(
        &mut self,
        mut model: Inr<B>,
        tracker: &mut dyn Tracker,
    ) -> Result<Inr<B>> {
        let epochs = self.config.epochs;
        let n = self.shape.sample_count();
        let c = self.channels;

        let mut optim = AdamConfig::new().init();
        let mut sampler = BatchSampler::new(n, self.config.batch_size, self.config.seed);
        let mse = MseLoss::new();

        self.state = TrainerState::Running;
        let started = Instant::now();

        for epoch in 0..epochs {
            sampler.reshuffle();
            let lr = self.config.learning_rate
                * decay_multiplier(epoch, epochs, self.config.lr_decay_factor);

            let mut loss_sum = 0.0f32;
            let mut batches = 0usize;

            for chunk in sampler.batches() {
                let idx = Tensor::<B, 1, Int>::from_data(chunk, &self.device);
                let batch_coords = self.coords.clone().select(0, idx.clone());
                let batch_targets = self.targets.clone().select(0, idx);

                let predictions = model.forward(batch_coords);

                // Mirror raw predictions into the reconstruction buffer.
                // Detached: the buffer write is a side effect, not part of
                // the loss graph.
                let predicted: Vec<f32> = predictions
                    .clone()
                    .detach()
                    .to_data()
                    .to_vec()
                    .expect("prediction tensor readback");
                for (row, &sample) in chunk.iter().enumerate() {
                    let base = sample as usize * c;
                    self.reconstruction[base..base + c]
                        .copy_from_slice(&predicted[row * c..(row + 1) * c]);
                }

                let loss = mse.forward(predictions, batch_targets, Reduction::Mean);
                let loss_value = loss.clone().to_data().to_vec::<f32>().expect("loss readback")[0];

                if !loss_value.is_finite() {
                    self.state = TrainerState::Stopped;
                    return Err(NeuralInrError::TrainingDiverged {
                        epoch,
                        loss: loss_value,
                    });
                }

                let grads = GradientsParams::from_grads(loss.backward(), &model);
                model = optim.step(lr, model, grads);

                loss_sum += loss_value;
                batches += 1;
            }

            let epoch_loss = loss_sum / batches as f32;

            let (metric, report_metric) = match self.task {
                TrainTask::Denoising => (
                    psnr(&self.target_host, &self.reconstruction),
                    psnr(&self.reference_host, &self.reconstruction),
                ),
                TrainTask::Occupancy => {
                    let overlap = iou(
                        &self.reconstruction,
                        &self.reference_host,
                        self.config.iou_threshold,
                    );
                    (overlap, overlap)
                }
            };

            // First epoch always qualifies; afterwards only a strict
            // improvement overwrites the snapshot.
            if self.best.is_none() || metric > self.best_metric {
                self.best = Some(self.reconstruction.clone());
                self.best_metric = metric;
            }

            self.history.push(EpochRecord {
                epoch,
                loss: epoch_loss,
                metric,
                report_metric,
                elapsed_s: started.elapsed().as_secs_f32(),
            });

            tracker.log_scalars(
                epoch,
                &[
                    ("loss", epoch_loss),
                    (self.task.metric_name(), metric),
                    ("report_metric", report_metric),
                ],
            );

            if epoch % self.config.log_interval == 0 || epoch + 1 == epochs {
                log::info!(
                    "epoch {}/{}: loss = {:.6}, {} = {:.4}, lr = {:.2e}",
                    epoch + 1,
                    epochs,
                    epoch_loss,
                    self.task.metric_name(),
                    metric,
                    lr
                );
            }
        }

        self.state = TrainerState::Stopped;
        Ok(model)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TrainerState {
        self.state
    }

    /// The task this trainer was built for.
    pub fn task(&self) -> TrainTask {
        self.task
    }

    /// Per-epoch history so far.
    pub fn history(&self) -> &TrainingHistory {
        &self.history
    }

    /// The live reconstruction buffer.
    pub fn reconstruction(&self) -> &[f32] {
        &self.reconstruction
    }

    /// The best reconstruction snapshot, if any epoch completed.
    pub fn best_reconstruction(&self) -> Option<&[f32]> {
        self.best.as_deref()
    }

    /// Best tracked metric seen so far.
    pub fn best_metric(&self) -> f32 {
        self.best_metric
    }

    /// Signal shape the trainer operates on.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Bundle the run's outputs for persistence.
    ///
    /// Falls back to the live reconstruction buffer when no epoch has
    /// completed yet.
    pub fn artifacts(&self) -> RunArtifacts {
        let signal_of = |data: &[f32]| Signal {
            data: data.to_vec(),
            shape: self.shape,
            channels: self.channels,
        };

        RunArtifacts {
            best: signal_of(self.best.as_deref().unwrap_or(&self.reconstruction)),
            reference: signal_of(&self.reference_host),
            noisy: match self.task {
                TrainTask::Denoising => Some(signal_of(&self.target_host)),
                TrainTask::Occupancy => None,
            },
            metrics: self.history.to_metrics_record(),
        }
    }
}
