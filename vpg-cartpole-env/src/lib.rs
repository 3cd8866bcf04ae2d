#![warn(missing_docs)]
//! Native cart-pole environment.
//!
//! A pure-Rust implementation of the classic cart-pole balancing task,
//! exposing the [`vpg_core::Env`] contract: a four-dimensional real state
//! vector, two discrete actions, reward 1.0 per step, episodic termination
//! when the cart leaves the track or the pole tips over.
mod cartpole;
mod config;
pub use cartpole::CartPoleEnv;
pub use config::CartPoleEnvConfig;
