//! Trajectory collection.
//!
//! The collector owns the environment and drives repeated episodes with the
//! current policy, accumulating `(observation, action)` pairs and per-episode
//! reward sequences into an [`EpisodeBatch`] until an accumulated-steps
//! threshold is met.
use crate::{estimator::WeightEstimator, EpisodeBatch, Env, Policy};
use anyhow::Result;
use log::trace;

/// Collects batches of complete episodes from an environment.
///
/// The environment is stateful and exclusively owned by the collector; it is
/// driven strictly sequentially. The injected [`WeightEstimator`] determines
/// how each episode's rewards become per-timestep weights.
pub struct Collector<E: Env> {
    /// The environment being sampled from.
    env: E,

    /// The active return/weight estimator.
    estimator: WeightEstimator,
}

impl<E: Env> Collector<E> {
    /// Creates a new collector with the given environment and estimator.
    pub fn new(env: E, estimator: WeightEstimator) -> Self {
        Self { env, estimator }
    }

    /// The active weight estimator.
    pub fn estimator(&self) -> WeightEstimator {
        self.estimator
    }

    /// Collects at least `min_steps` timesteps of complete episodes.
    ///
    /// Repeatedly resets the environment and rolls one episode to its
    /// environment-signalled termination, sampling every action from the
    /// current policy. On termination the episode is finalized: its total
    /// return and length are recorded and the estimator produces one weight
    /// per timestep, appended in step order. The threshold is checked only
    /// at episode boundaries, so the returned batch may exceed `min_steps`;
    /// episodes are never truncated mid-flight. With `min_steps == 0`,
    /// exactly one full episode is collected.
    ///
    /// An episode that never reaches a terminal state hangs collection; this
    /// is an accepted property of the target simulated domains, not handled
    /// defensively.
    pub fn collect<P: Policy<E>>(
        &mut self,
        policy: &mut P,
        min_steps: usize,
    ) -> Result<EpisodeBatch<E>> {
        let mut batch = EpisodeBatch::new();

        loop {
            let mut obs = self.env.reset()?;
            let mut rewards: Vec<f32> = Vec::new();

            loop {
                let act = policy.sample(&obs);
                batch.push_step(obs, act.clone());
                let (step, _) = self.env.step(&act);
                rewards.push(step.reward);
                if step.is_done {
                    break;
                }
                obs = step.obs;
            }

            let ep_ret = rewards.iter().sum::<f32>();
            trace!(
                "finished episode {}: return = {}, length = {}",
                batch.n_episodes(),
                ep_ret,
                rewards.len()
            );
            batch.push_episode(ep_ret, self.estimator.episode_weights(&rewards));

            if batch.len() > min_steps {
                break;
            }
        }

        // Batch-level pass of the estimator (mean-baseline subtraction).
        self.estimator.finalize(&mut batch.weights, &batch.ep_rets);

        debug_assert!(batch.is_aligned());
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedPolicy, TestEnv, TestEnvConfig};

    fn collector(ep_lens: Vec<usize>, estimator: WeightEstimator) -> Collector<TestEnv> {
        let env = TestEnv::build(&TestEnvConfig { ep_lens }, 0).unwrap();
        Collector::new(env, estimator)
    }

    #[test]
    fn zero_threshold_collects_exactly_one_episode() {
        let mut c = collector(vec![3], WeightEstimator::TotalReturn);
        let batch = c.collect(&mut FixedPolicy, 0).unwrap();

        assert_eq!(batch.n_episodes(), 1);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn collection_stops_only_at_episode_boundaries() {
        // Episodes of length 3 then 2: after the first episode 3 steps are
        // in the batch, below the threshold, so a second full episode runs.
        let mut c = collector(vec![3, 2], WeightEstimator::TotalReturn);
        let batch = c.collect(&mut FixedPolicy, 4).unwrap();

        assert_eq!(batch.n_episodes(), 2);
        assert_eq!(batch.len(), 5);
        assert_eq!(batch.ep_lens, vec![3, 2]);
    }

    #[test]
    fn batch_is_aligned_for_all_estimators() {
        for est in [
            WeightEstimator::TotalReturn,
            WeightEstimator::RewardToGo,
            WeightEstimator::MeanBaseline,
        ] {
            let mut c = collector(vec![2, 4, 1], est);
            let batch = c.collect(&mut FixedPolicy, 6).unwrap();
            assert!(batch.is_aligned());
        }
    }

    #[test]
    fn baseline_subtraction_over_two_episodes() {
        // Reward 1.0 per step, episodes of length 3 and 2: returns 3 and 2,
        // batch mean 2.5.
        let mut c = collector(vec![3, 2], WeightEstimator::MeanBaseline);
        let batch = c.collect(&mut FixedPolicy, 4).unwrap();

        assert_eq!(batch.ep_rets, vec![3.0, 2.0]);
        assert_eq!(batch.weights, vec![0.5, 0.5, 0.5, -0.5, -0.5]);
    }

    #[test]
    fn reward_to_go_weights_follow_step_order() {
        let mut c = collector(vec![3], WeightEstimator::RewardToGo);
        let batch = c.collect(&mut FixedPolicy, 0).unwrap();

        assert_eq!(batch.weights, vec![3.0, 2.0, 1.0]);
    }
}
