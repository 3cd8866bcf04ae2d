//! Scripted environment and policy used by unit tests.
use crate::{record::Record, Act, Env, Obs, Policy, Step};
use anyhow::Result;

#[derive(Clone, Debug)]
pub(crate) struct TestObs(pub Vec<f32>);

impl Obs for TestObs {}

#[derive(Clone, Debug)]
pub(crate) struct TestAct(pub i64);

impl Act for TestAct {}

/// Deterministic environment emitting reward 1.0 per step and terminating
/// episodes at scripted lengths, cycling through `ep_lens`.
#[derive(Clone)]
pub(crate) struct TestEnvConfig {
    pub ep_lens: Vec<usize>,
}

pub(crate) struct TestEnv {
    ep_lens: Vec<usize>,
    episode: usize,
    t: usize,
}

impl Env for TestEnv {
    type Config = TestEnvConfig;
    type Obs = TestObs;
    type Act = TestAct;
    type Info = ();

    fn build(config: &Self::Config, _seed: i64) -> Result<Self> {
        Ok(Self {
            ep_lens: config.ep_lens.clone(),
            episode: 0,
            t: 0,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        self.t += 1;
        let len = self.ep_lens[self.episode % self.ep_lens.len()];
        let is_done = self.t >= len;
        if is_done {
            self.episode += 1;
        }
        let step = Step::new(TestObs(vec![self.t as f32]), a.clone(), 1.0, is_done, ());
        (step, Record::empty())
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.t = 0;
        Ok(TestObs(vec![0.0]))
    }
}

pub(crate) struct FixedPolicy;

impl Policy<TestEnv> for FixedPolicy {
    fn sample(&mut self, _obs: &TestObs) -> TestAct {
        TestAct(0)
    }
}
