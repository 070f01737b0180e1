//! Multiplicative filter network.

use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::prelude::*;

use crate::config::InrModelConfig;

/// Multiplicative filter network with sinusoidal filters.
///
/// Instead of composing nonlinearities, each stage multiplies a learned
/// linear transform of the running features by a sinusoidal filter of the
/// raw input: `z_{i+1} = sin(omega g_i(coords)) * W_i z_i`.
#[derive(Module, Debug)]
pub struct Mfn<B: Backend> {
    /// Sinusoidal filters applied to the raw coordinates.
    filters: Vec<Linear<B>>,
    /// Linear stages between filters.
    linears: Vec<Linear<B>>,
    output: Linear<B>,
    #[module(skip)]
    omega: f32,
}

impl<B: Backend> Mfn<B> {
    /// Create a new network from configuration.
    pub fn new(config: &InrModelConfig, device: &B::Device) -> Self {
        let n = config.hidden_features;
        let stages = config.hidden_layers + 1;

        let filters = (0..stages)
            .map(|_| LinearConfig::new(config.in_features, n).init(device))
            .collect();
        let linears = (0..stages - 1)
            .map(|_| LinearConfig::new(n, n).init(device))
            .collect();
        let output = LinearConfig::new(n, config.out_features).init(device);

        Self {
            filters,
            linears,
            output,
            omega: config.first_omega as f32,
        }
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, in_features]
    /// Output shape: [batch, out_features]
    pub fn forward(&self, coords: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = (self.filters[0].forward(coords.clone()) * self.omega).sin();

        for (filter, linear) in self.filters[1..].iter().zip(self.linears.iter()) {
            let gate = (filter.forward(coords.clone()) * self.omega).sin();
            x = gate * linear.forward(x);
        }

        self.output.forward(x)
    }
}
