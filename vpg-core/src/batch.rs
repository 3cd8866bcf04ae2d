//! Batch of complete episodes collected within one training epoch.
use crate::Env;

/// Accumulation of states, actions and per-timestep weights spanning one or
/// more complete episodes, together with per-episode summaries.
///
/// A batch is created empty at the start of each training epoch, populated
/// by the [`Collector`](crate::Collector), consumed once by the agent's
/// optimization step, then discarded. It only ever contains complete
/// episodes; collection never truncates mid-episode.
///
/// Invariant: `obs`, `acts` and `weights` have the same length and are
/// index-aligned, and that length equals the sum of `ep_lens`.
pub struct EpisodeBatch<E: Env> {
    /// Observations, one per recorded timestep.
    pub obs: Vec<E::Obs>,

    /// Actions, index-aligned with `obs`.
    pub acts: Vec<E::Act>,

    /// Per-timestep weights multiplying the log-probability gradient.
    ///
    /// These are derived from each episode's reward sequence by the active
    /// [`WeightEstimator`](crate::WeightEstimator), not the raw rewards.
    pub weights: Vec<f32>,

    /// Total return of each completed episode.
    pub ep_rets: Vec<f32>,

    /// Length of each completed episode.
    pub ep_lens: Vec<usize>,
}

impl<E: Env> EpisodeBatch<E> {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self {
            obs: Vec::new(),
            acts: Vec::new(),
            weights: Vec::new(),
            ep_rets: Vec::new(),
            ep_lens: Vec::new(),
        }
    }

    /// Records one `(observation, action)` pair.
    ///
    /// The corresponding weight is appended later, when the episode this
    /// step belongs to is finalized.
    pub fn push_step(&mut self, obs: E::Obs, act: E::Act) {
        self.obs.push(obs);
        self.acts.push(act);
    }

    /// Finalizes a completed episode.
    ///
    /// Appends the episode's per-timestep weights in step order and records
    /// its total return and length.
    pub fn push_episode(&mut self, ep_ret: f32, weights: Vec<f32>) {
        self.ep_lens.push(weights.len());
        self.ep_rets.push(ep_ret);
        self.weights.extend(weights);
    }

    /// The number of recorded timesteps.
    pub fn len(&self) -> usize {
        self.obs.len()
    }

    /// Returns `true` if the batch contains no timesteps.
    pub fn is_empty(&self) -> bool {
        self.obs.is_empty()
    }

    /// The number of completed episodes in the batch.
    pub fn n_episodes(&self) -> usize {
        self.ep_rets.len()
    }

    /// Mean total return over the episodes in the batch.
    pub fn mean_return(&self) -> f32 {
        self.ep_rets.iter().sum::<f32>() / self.ep_rets.len() as f32
    }

    /// Mean episode length over the episodes in the batch.
    pub fn mean_ep_len(&self) -> f32 {
        self.ep_lens.iter().sum::<usize>() as f32 / self.ep_lens.len() as f32
    }

    /// Checks the index-alignment invariant.
    pub fn is_aligned(&self) -> bool {
        self.obs.len() == self.acts.len()
            && self.acts.len() == self.weights.len()
            && self.weights.len() == self.ep_lens.iter().sum::<usize>()
    }
}

impl<E: Env> Default for EpisodeBatch<E> {
    fn default() -> Self {
        Self::new()
    }
}
