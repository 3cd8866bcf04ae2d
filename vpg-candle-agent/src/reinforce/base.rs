use super::{config::ReinforceConfig, model::PolicyModel};
use crate::model::{OutDim, SubModel};
use anyhow::Result;
use candle_core::{shape::D, Device, Tensor};
use candle_nn::ops::{log_softmax, softmax};
use log::trace;
use rand::{distributions::WeightedIndex, rngs::SmallRng, Rng, SeedableRng};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use vpg_core::{
    error::VpgError,
    record::{Record, RecordValue},
    Agent, EpisodeBatch, Env, Policy,
};

/// REINFORCE agent.
///
/// Wraps a [`PolicyModel`] emitting logits and implements both halves of
/// the policy-gradient loop: stochastic action sampling during collection
/// and the surrogate-loss optimization step over a collected batch. The
/// surrogate is the negative mean of `log_prob(a_k | s_k) * w_k` over all
/// recorded timesteps; its value is not interpretable, but its gradient is
/// the negated Monte-Carlo policy-gradient estimate, so one gradient-descent
/// step ascends the expected return.
pub struct Reinforce<E, P>
where
    E: Env,
    P: SubModel<Input = Tensor, Output = Tensor>,
    E::Obs: Into<Tensor>,
    E::Act: From<i64> + Into<i64>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    pub(super) model: PolicyModel<P>,
    pub(super) train: bool,
    pub(super) n_opts: usize,
    rng: SmallRng,
    phantom: PhantomData<E>,
}

impl<E, P> Reinforce<E, P>
where
    E: Env,
    P: SubModel<Input = Tensor, Output = Tensor>,
    E::Obs: Into<Tensor>,
    E::Act: From<i64> + Into<i64>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    /// Constructs a REINFORCE agent.
    pub fn build(config: ReinforceConfig<P>) -> Result<Self> {
        let device: Device = config.device.into();
        let model = PolicyModel::build(config.model_config, device)?;

        Ok(Self {
            model,
            train: true,
            n_opts: 0,
            rng: SmallRng::seed_from_u64(config.seed),
            phantom: PhantomData,
        })
    }

    /// Computes the surrogate loss over index-aligned batch tensors.
    fn surrogate_loss(&self, obs: &Tensor, acts: &Tensor, weights: &Tensor) -> Result<Tensor> {
        let logits = self.model.forward(obs);
        let logps = log_softmax(&logits, D::Minus1)?;
        let logp_acts = logps.gather(acts, D::Minus1)?.squeeze(D::Minus1)?;
        let loss = (logp_acts * weights)?.mean_all()?.neg()?;
        Ok(loss)
    }

    fn opt_(&mut self, batch: &EpisodeBatch<E>) -> Result<Record> {
        let device = self.model.device().clone();
        let n_steps = batch.len();

        let obs = {
            let rows: Vec<Tensor> = batch.obs.iter().map(|o| o.clone().into()).collect();
            Tensor::stack(&rows, 0)?.to_device(&device)?
        };
        let acts = {
            let ixs: Vec<i64> = batch.acts.iter().map(|a| a.clone().into()).collect();
            Tensor::from_vec(ixs, (n_steps, 1), &device)?
        };
        let weights = Tensor::from_slice(&batch.weights[..], (n_steps,), &device)?;

        let loss = self.surrogate_loss(&obs, &acts, &weights)?;
        let loss_v = loss.to_scalar::<f32>()?;
        // A non-finite loss means numeric divergence, e.g. an unstable
        // learning rate; masking it would hide the tuning error.
        if !loss_v.is_finite() {
            return Err(VpgError::NonFiniteLoss(loss_v as f64).into());
        }

        self.model.backward_step(&loss)?;
        self.n_opts += 1;
        trace!("opt step {}: loss = {}", self.n_opts, loss_v);

        Ok(Record::from_slice(&[("loss", RecordValue::Scalar(loss_v))]))
    }
}

impl<E, P> Policy<E> for Reinforce<E, P>
where
    E: Env,
    P: SubModel<Input = Tensor, Output = Tensor>,
    E::Obs: Into<Tensor>,
    E::Act: From<i64> + Into<i64>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    /// Samples an action from the categorical distribution implied by the
    /// current logits at the given observation.
    ///
    /// The distribution is recomputed at every call; policy parameters may
    /// have changed since the last one. Non-finite logits fail loudly when
    /// the sampling distribution is constructed.
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        let obs: Tensor = obs.clone().into();
        let logits = self.model.forward(&obs.unsqueeze(0).unwrap());
        let probs = softmax(&logits, D::Minus1)
            .unwrap()
            .squeeze(0)
            .unwrap()
            .to_vec1::<f32>()
            .unwrap();
        let ix = self
            .rng
            .sample(WeightedIndex::new(&probs).expect("policy logits are not a distribution"));
        (ix as i64).into()
    }
}

impl<E, P> Agent<E> for Reinforce<E, P>
where
    E: Env,
    P: SubModel<Input = Tensor, Output = Tensor>,
    E::Obs: Into<Tensor>,
    E::Act: From<i64> + Into<i64>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    fn train(&mut self) {
        self.train = true;
    }

    fn eval(&mut self) {
        self.train = false;
    }

    fn is_train(&self) -> bool {
        self.train
    }

    fn opt(&mut self, batch: &EpisodeBatch<E>) -> Result<Record> {
        self.opt_(batch)
    }

    fn reset(&mut self) -> Result<()> {
        self.model.reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mlp::{Mlp, MlpConfig},
        reinforce::PolicyModelConfig,
    };
    use vpg_core::{record::Record as CoreRecord, Act, Obs, Step};

    #[derive(Clone, Debug)]
    struct VecObs(Vec<f32>);

    impl Obs for VecObs {}

    impl From<VecObs> for Tensor {
        fn from(obs: VecObs) -> Tensor {
            Tensor::from_vec(obs.0.clone(), (obs.0.len(),), &Device::Cpu).unwrap()
        }
    }

    #[derive(Clone, Debug)]
    struct IdxAct(i64);

    impl Act for IdxAct {}

    impl From<i64> for IdxAct {
        fn from(ix: i64) -> Self {
            Self(ix)
        }
    }

    impl From<IdxAct> for i64 {
        fn from(a: IdxAct) -> i64 {
            a.0
        }
    }

    struct FakeEnv;

    impl Env for FakeEnv {
        type Config = ();
        type Obs = VecObs;
        type Act = IdxAct;
        type Info = ();

        fn build(_config: &Self::Config, _seed: i64) -> Result<Self> {
            Ok(Self)
        }

        fn step(&mut self, a: &Self::Act) -> (Step<Self>, CoreRecord) {
            let step = Step::new(VecObs(vec![0.0; 4]), a.clone(), 1.0, true, ());
            (step, CoreRecord::empty())
        }

        fn reset(&mut self) -> Result<Self::Obs> {
            Ok(VecObs(vec![0.0; 4]))
        }
    }

    fn agent() -> Reinforce<FakeEnv, Mlp> {
        let config = ReinforceConfig::<Mlp>::default().model_config(
            PolicyModelConfig::default().policy_config(MlpConfig::new(4, vec![8, 8], 2)),
        );
        Reinforce::build(config).unwrap()
    }

    #[test]
    fn sampled_actions_are_in_range() {
        let mut agent = agent();
        for _ in 0..50 {
            let a = agent.sample(&VecObs(vec![0.1, -0.2, 0.3, 0.0]));
            assert!(a.0 == 0 || a.0 == 1);
        }
    }

    #[test]
    fn opt_reports_finite_loss() -> Result<()> {
        let mut agent = agent();
        let mut batch = EpisodeBatch::<FakeEnv>::new();
        for i in 0..3 {
            batch.push_step(VecObs(vec![i as f32; 4]), IdxAct(i % 2));
        }
        batch.push_episode(3.0, vec![3.0, 2.0, 1.0]);

        let record = agent.opt(&batch)?;
        assert!(record.get_scalar("loss")?.is_finite());
        Ok(())
    }

    #[test]
    fn reset_through_the_agent_contract() -> Result<()> {
        let mut agent = agent();
        agent.reset()?;
        agent.reset()?;
        let a = agent.sample(&VecObs(vec![0.0; 4]));
        assert!(a.0 == 0 || a.0 == 1);
        Ok(())
    }
}
