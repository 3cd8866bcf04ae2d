//! Policy.
use super::Env;

/// A policy on an environment.
///
/// Policy is a mapping from an observation to an action. The mapping can be
/// either of deterministic or stochastic; the policy-gradient agents in this
/// library sample from the categorical distribution implied by the current
/// policy parameters at call time.
pub trait Policy<E: Env> {
    /// Sample an action given an observation.
    fn sample(&mut self, obs: &E::Obs) -> E::Act;
}
