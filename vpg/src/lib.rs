//! Policy-gradient reinforcement learning.
//!
//! This crate re-exports the member crates of the workspace:
//! [`vpg_core`] for the backend-free training abstractions,
//! [`vpg_candle_agent`] for the candle-based REINFORCE agent, and
//! [`vpg_cartpole_env`] for the native cart-pole environment.
pub use vpg_candle_agent as candle_agent;
pub use vpg_cartpole_env as cartpole_env;
pub use vpg_core as core;
