//! Training infrastructure for implicit models.
//!
//! This module provides:
//! - `InrTrainer`: the batched SGD epoch loop
//! - `BatchSampler`: per-epoch index permutation and minibatching
//! - `TrainingHistory`: append-only per-epoch metrics
//! - Learning-rate decay schedule
//! - Checkpoint save/load

mod batch;
mod checkpoint;
mod history;
mod schedule;
mod trainer;

pub use batch::BatchSampler;
pub use checkpoint::{checkpoint_exists, load_checkpoint, save_checkpoint, CheckpointMetadata};
pub use history::{EpochRecord, TrainingHistory};
pub use schedule::decay_multiplier;
pub use trainer::{InrTrainer, TrainTask, TrainerState};
