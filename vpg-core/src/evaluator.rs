//! Evaluate a [`Policy`].
use crate::{record::Record, Env, Policy};
use anyhow::Result;
mod default_evaluator;
pub use default_evaluator::DefaultEvaluator;

/// Evaluate a [`Policy`].
///
/// Evaluation drives the policy purely through its sampling interface; it
/// has no learning side effects. The caller handles the internal state of
/// the policy, like training/evaluation mode.
pub trait Evaluator<E: Env> {
    /// Runs evaluation rollouts with the given policy.
    fn evaluate<P: Policy<E>>(&mut self, policy: &mut P) -> Result<Record>;
}
