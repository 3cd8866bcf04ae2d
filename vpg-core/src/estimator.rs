//! Return/weight estimators.
//!
//! A weight estimator converts an episode's raw reward sequence into one
//! scalar weight per timestep. The three variants form the variance-reduction
//! axis of the policy-gradient estimator; they are interchangeable but
//! mutually exclusive, selected once per experiment and never mixed within a
//! batch.
use serde::{Deserialize, Serialize};

/// Policy for deriving per-timestep weights from episode rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum WeightEstimator {
    /// Every timestep of an episode receives the episode's total return.
    ///
    /// Unbiased and simplest, but high variance: all timesteps are weighted
    /// identically regardless of when reward accrued.
    TotalReturn,

    /// Timestep `k` receives the sum of rewards from `k` to episode end.
    ///
    /// An action cannot affect rewards received before it, so crediting only
    /// future consequences strictly reduces variance while staying unbiased.
    RewardToGo,

    /// Total-return weights with the batch's mean episode return subtracted.
    ///
    /// A control-variate correction: subtracting a constant from all weights
    /// leaves the expected gradient unchanged but reduces its variance when
    /// average returns drift positive. The subtraction happens in
    /// [`WeightEstimator::finalize`], after the batch is fully collected.
    MeanBaseline,
}

impl WeightEstimator {
    /// Computes the weights of one completed episode from its rewards.
    ///
    /// For [`MeanBaseline`](Self::MeanBaseline), this is the first of two
    /// passes and yields plain total-return weights; the baseline is
    /// subtracted at batch level by [`finalize`](Self::finalize).
    pub fn episode_weights(&self, rewards: &[f32]) -> Vec<f32> {
        match self {
            Self::TotalReturn | Self::MeanBaseline => {
                let ep_ret: f32 = rewards.iter().sum();
                vec![ep_ret; rewards.len()]
            }
            Self::RewardToGo => reward_to_go(rewards),
        }
    }

    /// Batch-level correction, applied once after collection completes and
    /// before the weights are handed to the loss.
    ///
    /// The mean is taken over the completed episode returns of the current
    /// batch only; it is never carried over from a previous batch.
    pub fn finalize(&self, weights: &mut [f32], ep_rets: &[f32]) {
        if let Self::MeanBaseline = self {
            let baseline = ep_rets.iter().sum::<f32>() / ep_rets.len() as f32;
            for w in weights.iter_mut() {
                *w -= baseline;
            }
        }
    }
}

/// Single backward pass over the reward sequence, O(N) per episode.
fn reward_to_go(rewards: &[f32]) -> Vec<f32> {
    let mut w = vec![0.0; rewards.len()];
    let mut acc = 0.0;
    for k in (0..rewards.len()).rev() {
        acc += rewards[k];
        w[k] = acc;
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_return_weights_are_uniform() {
        let w = WeightEstimator::TotalReturn.episode_weights(&[1.0, 1.0, 1.0]);
        assert_eq!(w, vec![3.0, 3.0, 3.0]);

        let w = WeightEstimator::TotalReturn.episode_weights(&[0.5, -1.0, 2.0]);
        assert_eq!(w, vec![1.5, 1.5, 1.5]);
    }

    #[test]
    fn reward_to_go_satisfies_recurrence() {
        let rewards = [0.3, -1.0, 2.5, 0.0, 1.2];
        let w = WeightEstimator::RewardToGo.episode_weights(&rewards);

        assert_eq!(w.len(), rewards.len());
        assert_eq!(*w.last().unwrap(), *rewards.last().unwrap());
        for k in 0..rewards.len() - 1 {
            assert!((w[k] - (rewards[k] + w[k + 1])).abs() < 1e-6);
        }
        // The first entry is the whole-episode return.
        let ep_ret: f32 = rewards.iter().sum();
        assert!((w[0] - ep_ret).abs() < 1e-6);
    }

    #[test]
    fn reward_to_go_worked_example() {
        let w = WeightEstimator::RewardToGo.episode_weights(&[1.0, 1.0, 1.0]);
        assert_eq!(w, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn mean_baseline_worked_example() {
        // Two episodes with rewards [1,1,1] and [1,1]; batch mean return 2.5.
        let est = WeightEstimator::MeanBaseline;
        let mut weights = est.episode_weights(&[1.0, 1.0, 1.0]);
        weights.extend(est.episode_weights(&[1.0, 1.0]));
        assert_eq!(weights, vec![3.0, 3.0, 3.0, 2.0, 2.0]);

        est.finalize(&mut weights, &[3.0, 2.0]);
        assert_eq!(weights, vec![0.5, 0.5, 0.5, -0.5, -0.5]);
    }

    #[test]
    fn baseline_is_recomputed_per_batch() {
        let est = WeightEstimator::MeanBaseline;

        let mut first = est.episode_weights(&[1.0; 4]);
        est.finalize(&mut first, &[4.0]);
        assert_eq!(first, vec![0.0; 4]);

        // A later batch with different returns must use its own mean.
        let mut second = est.episode_weights(&[1.0; 2]);
        est.finalize(&mut second, &[2.0, 6.0]);
        assert_eq!(second, vec![-2.0, -2.0]);
    }

    #[test]
    fn finalize_is_identity_for_unbaselined_variants() {
        for est in [WeightEstimator::TotalReturn, WeightEstimator::RewardToGo] {
            let mut w = est.episode_weights(&[1.0, 2.0]);
            let before = w.clone();
            est.finalize(&mut w, &[3.0]);
            assert_eq!(w, before);
        }
    }
}
