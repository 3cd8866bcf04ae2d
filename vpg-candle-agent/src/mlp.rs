//! Multilayer perceptron.
mod base;
mod config;
pub use base::Mlp;
use candle_core::Tensor;
use candle_nn::{Linear, Module};
pub use config::MlpConfig;

/// Tanh between hidden layers, identity on the final layer: the output is
/// a vector of unnormalized log-scores (logits).
fn mlp_forward(xs: Tensor, layers: &[Linear]) -> Tensor {
    let n_layers = layers.len();
    let mut xs = xs;

    for layer in &layers[..n_layers - 1] {
        xs = layer.forward(&xs).unwrap().tanh().unwrap();
    }

    layers[n_layers - 1].forward(&xs).unwrap()
}
