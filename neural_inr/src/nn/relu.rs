//! ReLU implicit network with optional positional encoding.

use burn::module::Module;
use burn::nn::{Linear, LinearConfig, Relu};
use burn::prelude::*;

use crate::config::InrModelConfig;

use super::posenc::PositionalEncoding;

/// Plain ReLU multilayer perceptron over raw or positionally encoded
/// coordinates.
///
/// Without an encoding this is the weakest family for high-frequency
/// content; with one it matches the classic positional-encoding baseline.
#[derive(Module, Debug)]
pub struct ReluMlp<B: Backend> {
    encoding: Option<PositionalEncoding<B>>,
    first: Linear<B>,
    hidden: Vec<Linear<B>>,
    output: Linear<B>,
    activation: Relu,
}

impl<B: Backend> ReluMlp<B> {
    /// Create a new network from configuration.
    ///
    /// When `pos_encode` is set, coordinates pass through a
    /// [`PositionalEncoding`] sized by `config.sidelength` before the first
    /// linear layer.
    pub fn new(config: &InrModelConfig, pos_encode: bool, device: &B::Device) -> Self {
        let encoding =
            pos_encode.then(|| PositionalEncoding::new(config.in_features, config.sidelength, device));

        let in_dim = encoding
            .as_ref()
            .map(|e| e.output_dim())
            .unwrap_or(config.in_features);

        let n = config.hidden_features;

        Self {
            encoding,
            first: LinearConfig::new(in_dim, n).init(device),
            hidden: (0..config.hidden_layers)
                .map(|_| LinearConfig::new(n, n).init(device))
                .collect(),
            output: LinearConfig::new(n, config.out_features).init(device),
            activation: Relu::new(),
        }
    }

    /// Forward pass.
    ///
    /// Input shape: [batch, in_features]
    /// Output shape: [batch, out_features]
    pub fn forward(&self, coords: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = match &self.encoding {
            Some(encoding) => encoding.forward(coords),
            None => coords,
        };

        let mut x = self.activation.forward(self.first.forward(x));
        for layer in &self.hidden {
            x = self.activation.forward(layer.forward(x));
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
    fn test_forward_shape_plain() {
        let device = Default::default();
        let config = InrModelConfig::new(2, 1).with_hidden_features(16);
        let net = ReluMlp::<TestBackend>::new(&config, false, &device);

        let coords = Tensor::zeros([5, 2], &device);
        assert_eq!(net.forward(coords).dims(), [5, 1]);
    }

    #[test]
    fn test_forward_shape_encoded() {
        let device = Default::default();
        let config = InrModelConfig::new(2, 1)
            .with_hidden_features(16)
            .with_sidelength(128);
        let net = ReluMlp::<TestBackend>::new(&config, true, &device);

        let coords = Tensor::zeros([5, 2], &device);
        assert_eq!(net.forward(coords).dims(), [5, 1]);
    }
}
