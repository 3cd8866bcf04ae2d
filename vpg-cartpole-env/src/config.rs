//! Configuration of [`CartPoleEnv`](crate::CartPoleEnv).
use serde::{Deserialize, Serialize};

/// Configuration of [`CartPoleEnv`](crate::CartPoleEnv).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct CartPoleEnvConfig {
    /// Episode step cap, signalled through the ordinary done flag.
    pub max_episode_steps: usize,
}

impl Default for CartPoleEnvConfig {
    fn default() -> Self {
        Self {
            max_episode_steps: 500,
        }
    }
}

impl CartPoleEnvConfig {
    /// Sets the episode step cap.
    pub fn max_episode_steps(mut self, v: usize) -> Self {
        self.max_episode_steps = v;
        self
    }
}
