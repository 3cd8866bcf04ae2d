//! REINFORCE agent implemented with [candle](https://crates.io/crates/candle-core).
//!
//! The crate provides the differentiable half of the library: an [`Mlp`]
//! policy network, the [`Optimizer`](opt::Optimizer) wrapper, and the
//! [`Reinforce`] agent that turns a collected episode batch into one
//! policy-gradient optimization step.
pub mod mlp;
pub mod model;
pub mod opt;
pub mod reinforce;
use serde::{Deserialize, Serialize};

pub use mlp::{Mlp, MlpConfig};
pub use reinforce::{PolicyModel, PolicyModelConfig, Reinforce, ReinforceConfig};

#[derive(Clone, Debug, Copy, Deserialize, Serialize, PartialEq)]
/// Device for using candle.
///
/// This enum is added because [`candle_core::Device`] does not support
/// serialization.
pub enum Device {
    /// The main CPU device.
    Cpu,

    /// The main GPU device.
    Cuda(usize),
}

impl From<Device> for candle_core::Device {
    fn from(device: Device) -> Self {
        match device {
            Device::Cpu => candle_core::Device::Cpu,
            Device::Cuda(n) => candle_core::Device::new_cuda(n).unwrap(),
        }
    }
}
