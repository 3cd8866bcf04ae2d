//! Agent.
use super::{Env, Policy};
use crate::{batch::EpisodeBatch, record::Record};
use anyhow::Result;

/// Represents a trainable policy on an environment.
pub trait Agent<E: Env>: Policy<E> {
    /// Set the policy to training mode.
    fn train(&mut self);

    /// Set the policy to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Performs one optimization step over a collected batch.
    ///
    /// Zeroes any accumulated gradient state, computes the surrogate loss
    /// over the full batch, backpropagates and applies one optimizer step.
    /// Fails if the loss is non-finite.
    fn opt(&mut self, batch: &EpisodeBatch<E>) -> Result<Record>;

    /// Reinitializes every learnable parameter to a fresh random draw.
    ///
    /// Discards all prior training, including the optimizer's internal
    /// moment estimates. Callable idempotently between independent training
    /// runs without reconstructing the agent.
    fn reset(&mut self) -> Result<()>;
}
