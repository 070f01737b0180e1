//! Gabor-wavelet implicit network.

use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::prelude::*;

use crate::config::InrModelConfig;

/// Implicit network with real Gabor-wavelet activations.
///
/// Each hidden pre-activation `z` passes through `sin(omega z) * exp(-(sigma
/// z)^2)`: a sinusoid under a Gaussian envelope, giving the network both
/// frequency and spatial locality.
#[derive(Module, Debug)]
pub struct Wire<B: Backend> {
    first: Linear<B>,
    hidden: Vec<Linear<B>>,
    output: Linear<B>,
    #[module(skip)]
    first_omega: f32,
    #[module(skip)]
    hidden_omega: f32,
    #[module(skip)]
    sigma: f32,
}

impl<B: Backend> Wire<B> {
    /// Create a new network from configuration.
    pub fn new(config: &InrModelConfig, device: &B::Device) -> Self {
        let n = config.hidden_features;

        let first = LinearConfig::new(config.in_features, n).init(device);
        let hidden = (0..config.hidden_layers)
            .map(|_| LinearConfig::new(n, n).init(device))
            .collect();
        let output = LinearConfig::new(n, config.out_features).init(device);

        Self {
            first,
            hidden,
            output,
            first_omega: config.first_omega as f32,
            hidden_omega: config.hidden_omega as f32,
            sigma: config.sigma as f32,
        }
    }

    fn gabor(&self, z: Tensor<B, 2>, omega: f32) -> Tensor<B, 2> {
        let envelope = z.clone() * self.sigma;
        let envelope = (envelope.clone() * envelope).neg().exp();
        (z * omega).sin() * envelope
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, in_features]
    /// Output shape: [batch, out_features]
    pub fn forward(&self, coords: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = self.gabor(self.first.forward(coords), self.first_omega);
        for layer in &self.hidden {
            x = self.gabor(layer.forward(x), self.hidden_omega);
        }
        self.output.forward(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_forward_shape() {
        let device = Default::default();
        let config = InrModelConfig::new(2, 1).with_hidden_features(32);
        let net = Wire::<TestBackend>::new(&config, &device);

        let coords = Tensor::zeros([7, 2], &device);
        assert_eq!(net.forward(coords).dims(), [7, 1]);
    }

    #[test]
    fn test_envelope_bounds_activation() {
        // The Gabor activation is bounded by its Gaussian envelope, so
        // outputs on wild inputs must stay finite.
        let device = Default::default();
        let config = InrModelConfig::new(2, 1)
            .with_hidden_features(16)
            .with_first_omega(20.0)
            .with_sigma(40.0);
        let net = Wire::<TestBackend>::new(&config, &device);

        let coords = Tensor::from_data([[100.0f32, -100.0]], &device);
        let out: Vec<f32> = net.forward(coords).to_data().to_vec().unwrap();
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
