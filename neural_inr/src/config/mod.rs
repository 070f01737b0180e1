//! Configuration types for neural_inr.
//!
//! Burn-style configuration structs for the implicit models, the batched
//! trainer, and the noise synthesizer. All knobs are explicit; nothing is
//! read from ambient process state inside the library.

mod network;
mod training;

pub use network::{InrModelConfig, Nonlinearity};
pub use training::{NoiseConfig, TrainingConfig};
