#![warn(missing_docs)]
//! Core abstractions for policy-gradient reinforcement learning.
//!
//! This crate defines the backend-free half of the library: the [`Env`] and
//! [`Policy`] traits at the boundary to the simulator and the function
//! approximator, the [`Collector`] that turns environment interaction into
//! an [`EpisodeBatch`], the three [`WeightEstimator`] variants that convert
//! reward sequences into per-timestep gradient weights, and the [`Trainer`]
//! that drives the whole loop for a fixed number of epochs.
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Agent, Env, Info, Obs, Policy, Step};

mod batch;
pub use batch::EpisodeBatch;

mod estimator;
pub use estimator::WeightEstimator;

mod collector;
pub use collector::Collector;

mod trainer;
pub use trainer::{Trainer, TrainerConfig};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};

#[cfg(test)]
pub(crate) mod testing;
