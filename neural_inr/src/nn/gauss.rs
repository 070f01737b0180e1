//! Gaussian-activation implicit network.

use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::prelude::*;

use crate::config::InrModelConfig;

/// Implicit network with Gaussian activations `exp(-(sigma z)^2)`.
#[derive(Module, Debug)]
pub struct GaussNet<B: Backend> {
    first: Linear<B>,
    hidden: Vec<Linear<B>>,
    output: Linear<B>,
    #[module(skip)]
    sigma: f32,
}

impl<B: Backend> GaussNet<B> {
    /// Create a new network from configuration.
    pub fn new(config: &InrModelConfig, device: &B::Device) -> Self {
        let n = config.hidden_features;

        Self {
            first: LinearConfig::new(config.in_features, n).init(device),
            hidden: (0..config.hidden_layers)
                .map(|_| LinearConfig::new(n, n).init(device))
                .collect(),
            output: LinearConfig::new(n, config.out_features).init(device),
            sigma: config.sigma as f32,
        }
    }

    fn gauss(&self, z: Tensor<B, 2>) -> Tensor<B, 2> {
        let scaled = z * self.sigma;
        (scaled.clone() * scaled).neg().exp()
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, in_features]
    /// Output shape: [batch, out_features]
    pub fn forward(&self, coords: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = self.gauss(self.first.forward(coords));
        for layer in &self.hidden {
            x = self.gauss(layer.forward(x));
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
        let config = InrModelConfig::new(3, 1).with_hidden_features(24);
        let net = GaussNet::<TestBackend>::new(&config, &device);

        let coords = Tensor::zeros([4, 3], &device);
        assert_eq!(net.forward(coords).dims(), [4, 1]);
    }

    #[test]
    fn test_activation_in_unit_range() {
        // exp(-(sigma z)^2) lies in (0, 1], so hidden activations cannot blow up.
        let device = Default::default();
        let config = InrModelConfig::new(2, 1)
            .with_hidden_features(8)
            .with_sigma(30.0);
        let net = GaussNet::<TestBackend>::new(&config, &device);

        let coords = Tensor::from_data([[50.0f32, -50.0]], &device);
        let out: Vec<f32> = net.forward(coords).to_data().to_vec().unwrap();
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
