//! Implicit function models.
//!
//! One capability — `forward(coords) -> values` — with several
//! interchangeable nonlinearity families behind the [`Inr`] enum, selected
//! by [`Nonlinearity`] at construction time.

mod gauss;
mod mfn;
mod posenc;
mod relu;
mod siren;
mod wire;

pub use gauss::GaussNet;
pub use mfn::Mfn;
pub use posenc::PositionalEncoding;
pub use relu::ReluMlp;
pub use siren::Siren;
pub use wire::Wire;

use burn::module::Module;
use burn::prelude::*;

use crate::config::{InrModelConfig, Nonlinearity};

/// A coordinate-to-value implicit model.
///
/// All variants map a `[batch, in_features]` coordinate tensor to a
/// `[batch, out_features]` value tensor; the variant decides how.
#[derive(Module, Debug)]
pub enum Inr<B: Backend> {
    /// Gabor-wavelet activations.
    Wire(Wire<B>),
    /// Sinusoidal activations.
    Siren(Siren<B>),
    /// Gaussian activations.
    Gauss(GaussNet<B>),
    /// Multiplicative filter network.
    Mfn(Mfn<B>),
    /// ReLU perceptron, with or without positional encoding.
    Relu(ReluMlp<B>),
}

impl<B: Backend> Inr<B> {
    /// Construct the model for a nonlinearity family.
    pub fn new(nonlinearity: Nonlinearity, config: &InrModelConfig, device: &B::Device) -> Self {
        match nonlinearity {
            Nonlinearity::Wire => Inr::Wire(Wire::new(config, device)),
            Nonlinearity::Siren => Inr::Siren(Siren::new(config, device)),
            Nonlinearity::Gauss => Inr::Gauss(GaussNet::new(config, device)),
            Nonlinearity::Mfn => Inr::Mfn(Mfn::new(config, device)),
            Nonlinearity::Relu => Inr::Relu(ReluMlp::new(config, false, device)),
            Nonlinearity::PosEnc => Inr::Relu(ReluMlp::new(config, true, device)),
        }
    }

    /// Evaluate the model at a batch of coordinates.
    pub fn forward(&self, coords: Tensor<B, 2>) -> Tensor<B, 2> {
        match self {
            Inr::Wire(net) => net.forward(coords),
            Inr::Siren(net) => net.forward(coords),
            Inr::Gauss(net) => net.forward(coords),
            Inr::Mfn(net) => net.forward(coords),
            Inr::Relu(net) => net.forward(coords),
        }
    }

    /// Total number of trainable parameters.
    pub fn param_count(&self) -> usize {
        self.num_params()
    }
}
