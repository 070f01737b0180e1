//! Sinusoidal implicit network.

use burn::module::Module;
use burn::nn::{Initializer, Linear, LinearConfig};
use burn::prelude::*;

use crate::config::InrModelConfig;

/// Implicit network with sine activations.
///
/// Hidden pre-activations are scaled by a frequency `omega` before the sine.
/// Weights use the uniform initialization that keeps activations in the
/// sine's linear-ish regime: `1/in` for the first layer, `sqrt(6/n)/omega`
/// for the rest.
#[derive(Module, Debug)]
pub struct Siren<B: Backend> {
    first: Linear<B>,
    hidden: Vec<Linear<B>>,
    output: Linear<B>,
    #[module(skip)]
    first_omega: f32,
    #[module(skip)]
    hidden_omega: f32,
}

impl<B: Backend> Siren<B> {
    /// Create a new network from configuration.
    pub fn new(config: &InrModelConfig, device: &B::Device) -> Self {
        let n = config.hidden_features;

        let first_bound = 1.0 / config.in_features as f64;
        let first = LinearConfig::new(config.in_features, n)
            .with_initializer(Initializer::Uniform {
                min: -first_bound,
                max: first_bound,
            })
            .init(device);

        let hidden_bound = (6.0 / n as f64).sqrt() / config.hidden_omega;
        let hidden_init = Initializer::Uniform {
            min: -hidden_bound,
            max: hidden_bound,
        };

        let hidden = (0..config.hidden_layers)
            .map(|_| {
                LinearConfig::new(n, n)
                    .with_initializer(hidden_init.clone())
                    .init(device)
            })
            .collect();

        let output = LinearConfig::new(n, config.out_features)
            .with_initializer(hidden_init)
            .init(device);

        Self {
            first,
            hidden,
            output,
            first_omega: config.first_omega as f32,
            hidden_omega: config.hidden_omega as f32,
        }
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, in_features]
    /// Output shape: [batch, out_features]
    pub fn forward(&self, coords: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = (self.first.forward(coords) * self.first_omega).sin();
        for layer in &self.hidden {
            x = (layer.forward(x) * self.hidden_omega).sin();
        }
        self.output.forward(x)
    }
}
