//! Core functionalities.
mod agent;
mod env;
mod policy;
mod step;
pub use agent::Agent;
pub use env::Env;
pub use policy::Policy;
use std::fmt::Debug;
pub use step::{Info, Step};

/// An observation of an environment.
///
/// The core treats observations as opaque values of a fixed-size state
/// vector; any internal structure is known only to the environment and to
/// the policy model consuming them.
pub trait Obs: Clone + Debug {}

/// An action on the environment.
///
/// Actions are drawn from a finite, discrete action set and are immutable
/// once sampled.
pub trait Act: Clone + Debug {}
