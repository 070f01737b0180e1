//! Model configuration types.

use std::fmt;
use std::str::FromStr;

use burn::config::Config;
use serde::{Deserialize, Serialize};

use crate::error::NeuralInrError;

/// The nonlinearity family of an implicit model.
///
/// Selects which function approximator [`crate::nn::Inr`] constructs;
/// `PosEnc` is a ReLU network preceded by a positional encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nonlinearity {
    /// Gabor-wavelet activations (sinusoid under a Gaussian envelope).
    Wire,
    /// Sinusoidal activations.
    Siren,
    /// Gaussian activations.
    Gauss,
    /// Multiplicative filter network with sinusoidal filters.
    Mfn,
    /// Plain ReLU multilayer perceptron.
    Relu,
    /// ReLU perceptron over positionally encoded coordinates.
    PosEnc,
}

impl Nonlinearity {
    /// All selectable families, in CLI order.
    pub const ALL: [Nonlinearity; 6] = [
        Nonlinearity::Wire,
        Nonlinearity::Siren,
        Nonlinearity::Gauss,
        Nonlinearity::Mfn,
        Nonlinearity::Relu,
        Nonlinearity::PosEnc,
    ];

    /// Lowercase identifier used in run names and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Nonlinearity::Wire => "wire",
            Nonlinearity::Siren => "siren",
            Nonlinearity::Gauss => "gauss",
            Nonlinearity::Mfn => "mfn",
            Nonlinearity::Relu => "relu",
            Nonlinearity::PosEnc => "posenc",
        }
    }
}

impl fmt::Display for Nonlinearity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Nonlinearity {
    type Err = NeuralInrError;

    fn from_str(s: &str) -> Result<Self, NeuralInrError> {
        match s.to_ascii_lowercase().as_str() {
            "wire" => Ok(Nonlinearity::Wire),
            "siren" => Ok(Nonlinearity::Siren),
            "gauss" => Ok(Nonlinearity::Gauss),
            "mfn" => Ok(Nonlinearity::Mfn),
            "relu" => Ok(Nonlinearity::Relu),
            "posenc" => Ok(Nonlinearity::PosEnc),
            other => Err(NeuralInrError::config(format!(
                "unknown nonlinearity '{}' (expected one of wire, siren, gauss, mfn, relu, posenc)",
                other
            ))),
        }
    }
}

/// Configuration for an implicit model.
#[derive(Config, Debug)]
pub struct InrModelConfig {
    /// Coordinate dimensionality (2 for planes, 3 for volumes).
    pub in_features: usize,

    /// Output channels per coordinate.
    pub out_features: usize,

    /// Number of hidden layers.
    #[config(default = 2)]
    pub hidden_layers: usize,

    /// Hidden units per layer.
    #[config(default = 256)]
    pub hidden_features: usize,

    /// Sinusoid frequency of the first layer.
    #[config(default = 5.0)]
    pub first_omega: f64,

    /// Sinusoid frequency of hidden layers.
    #[config(default = 5.0)]
    pub hidden_omega: f64,

    /// Gaussian scale for Wire and Gauss activations.
    #[config(default = 5.0)]
    pub sigma: f64,

    /// Side length governing positional-encoding frequency count.
    #[config(default = 256)]
    pub sidelength: usize,
}

impl InrModelConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), NeuralInrError> {
        if self.in_features != 2 && self.in_features != 3 {
            return Err(NeuralInrError::config(format!(
                "in_features must be 2 or 3, got {}",
                self.in_features
            )));
        }
        if self.out_features == 0 {
            return Err(NeuralInrError::config("out_features must be positive"));
        }
        if self.hidden_features == 0 {
            return Err(NeuralInrError::config("hidden_features must be positive"));
        }
        if self.first_omega <= 0.0 || self.hidden_omega <= 0.0 {
            return Err(NeuralInrError::config("omega must be positive"));
        }
        if self.sigma <= 0.0 {
            return Err(NeuralInrError::config("sigma must be positive"));
        }
        if self.sidelength == 0 {
            return Err(NeuralInrError::config("sidelength must be positive"));
        }
        Ok(())
    }
}
