//! REINFORCE agent.
//!
//! The agent maps observations to a categorical action distribution through
//! a policy network emitting logits, samples actions from that distribution
//! during collection, and optimizes the parameters with the Monte-Carlo
//! policy-gradient surrogate loss over collected batches.
mod base;
mod config;
mod model;
pub use base::Reinforce;
pub use config::ReinforceConfig;
pub use model::{PolicyModel, PolicyModelConfig};
