//! Positional encoding for coordinate inputs.

use burn::module::Module;
use burn::prelude::*;

/// Sinusoidal positional encoding.
///
/// Lifts coordinates into a higher-dimensional feature space using sine and
/// cosine features at octave-spaced frequencies. The number of frequency
/// bands is derived from the signal side length: `floor(log2(sidelength))`,
/// so finer signals get higher-frequency features.
#[derive(Module, Debug)]
pub struct PositionalEncoding<B: Backend> {
    /// Frequency bands.
    frequencies: Tensor<B, 1>,
    /// Coordinate dimensionality the encoding was built for.
    #[module(skip)]
    in_features: usize,
}

impl<B: Backend> PositionalEncoding<B> {
    /// Create an encoding for `in_features`-dimensional coordinates.
    pub fn new(in_features: usize, sidelength: usize, device: &B::Device) -> Self {
        let num_bands = (sidelength.max(2) as f32).log2().floor() as usize;
        let num_bands = num_bands.max(1);

        let frequencies: Vec<f32> = (0..num_bands)
            .map(|i| (i as f32).exp2() * core::f32::consts::PI)
            .collect();

        Self {
            frequencies: Tensor::from_data(frequencies.as_slice(), device),
            in_features,
        }
    }

    /// Encode coordinates.
    ///
    /// Input shape: [batch, in_features]
    /// Output shape: [batch, output_dim]
    pub fn forward(&self, coords: Tensor<B, 2>) -> Tensor<B, 2> {
        let [batch, dim] = coords.dims();
        let num_bands = self.frequencies.dims()[0];

        // Broadcast coords against the frequency bands: [batch, dim, bands]
        let expanded = coords.clone().reshape([batch, dim, 1]);
        let freqs = self.frequencies.clone().reshape([1, 1, num_bands]);
        let scaled = expanded * freqs;

        let sin_features = scaled.clone().sin();
        let cos_features = scaled.cos();

        let fourier = Tensor::cat(vec![sin_features, cos_features], 2)
            .reshape([batch, dim * num_bands * 2]);

        // Original coordinates ride along with the encoded features.
        Tensor::cat(vec![coords, fourier], 1)
    }

    /// Output dimension of the encoding.
    pub fn output_dim(&self) -> usize {
        self.in_features + self.in_features * self.frequencies.dims()[0] * 2
    }
}
