//! Cart-pole dynamics and the [`Env`] implementation.
use crate::CartPoleEnvConfig;
use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::marker::PhantomData;
use vpg_core::{
    record::{Record, RecordValue},
    Act, Env, Obs, Step,
};

const GRAVITY: f64 = 9.8;
const MASS_CART: f64 = 1.0;
const MASS_POLE: f64 = 0.1;
const TOTAL_MASS: f64 = MASS_CART + MASS_POLE;
// Half the pole's length.
const LENGTH: f64 = 0.5;
const POLE_MASS_LENGTH: f64 = MASS_POLE * LENGTH;
const FORCE_MAG: f64 = 10.0;
// Seconds between state updates.
const TAU: f64 = 0.02;

const X_THRESHOLD: f64 = 2.4;
const THETA_THRESHOLD: f64 = 12.0 * std::f64::consts::PI / 180.0;

/// The classic cart-pole balancing environment.
///
/// State is `[x, x_dot, theta, theta_dot]`; action 0 pushes the cart left,
/// action 1 pushes it right. Every step yields reward 1.0; an episode ends
/// when `|x|` or `|theta|` leaves its threshold or the step cap is reached.
///
/// The environment is generic over the user's observation and action
/// newtypes so that tensor conversions stay with the agent wiring.
pub struct CartPoleEnv<O, A>
where
    O: Obs + From<Vec<f32>>,
    A: Act + Into<i64>,
{
    state: [f64; 4],
    steps: usize,
    max_episode_steps: usize,
    rng: SmallRng,
    phantom: PhantomData<(O, A)>,
}

impl<O, A> CartPoleEnv<O, A>
where
    O: Obs + From<Vec<f32>>,
    A: Act + Into<i64>,
{
    fn obs(&self) -> O {
        O::from(self.state.iter().map(|v| *v as f32).collect::<Vec<f32>>())
    }

    /// Applies one Euler integration step of the cart-pole dynamics.
    fn integrate(&mut self, force: f64) {
        let [x, x_dot, theta, theta_dot] = self.state;
        let cos_theta = theta.cos();
        let sin_theta = theta.sin();

        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin_theta) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin_theta - cos_theta * temp)
            / (LENGTH * (4.0 / 3.0 - MASS_POLE * cos_theta * cos_theta / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos_theta / TOTAL_MASS;

        self.state = [
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ];
    }
}

impl<O, A> Env for CartPoleEnv<O, A>
where
    O: Obs + From<Vec<f32>>,
    A: Act + Into<i64>,
{
    type Config = CartPoleEnvConfig;
    type Obs = O;
    type Act = A;
    type Info = ();

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            state: [0.0; 4],
            steps: 0,
            max_episode_steps: config.max_episode_steps,
            rng: SmallRng::seed_from_u64(seed as u64),
            phantom: PhantomData,
        })
    }

    fn step(&mut self, a: &Self::Act) -> (Step<Self>, Record) {
        let ix: i64 = a.clone().into();
        debug_assert!(ix == 0 || ix == 1);
        let force = if ix == 1 { FORCE_MAG } else { -FORCE_MAG };

        self.integrate(force);
        self.steps += 1;

        let [x, _, theta, _] = self.state;
        let is_done =
            x.abs() > X_THRESHOLD || theta.abs() > THETA_THRESHOLD || self.steps >= self.max_episode_steps;

        let mut record = Record::empty();
        record.insert("x", RecordValue::Scalar(x as f32));
        record.insert("theta", RecordValue::Scalar(theta as f32));

        let step = Step::new(self.obs(), a.clone(), 1.0, is_done, ());
        (step, record)
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        for v in self.state.iter_mut() {
            *v = self.rng.gen_range(-0.05..0.05);
        }
        self.steps = 0;
        Ok(self.obs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct TestObs(Vec<f32>);

    impl Obs for TestObs {}

    impl From<Vec<f32>> for TestObs {
        fn from(v: Vec<f32>) -> Self {
            Self(v)
        }
    }

    #[derive(Clone, Debug)]
    struct TestAct(i64);

    impl Act for TestAct {}

    impl From<TestAct> for i64 {
        fn from(a: TestAct) -> i64 {
            a.0
        }
    }

    type TestEnv = CartPoleEnv<TestObs, TestAct>;

    #[test]
    fn same_seed_same_initial_state() -> Result<()> {
        let config = CartPoleEnvConfig::default();
        let mut a = TestEnv::build(&config, 7)?;
        let mut b = TestEnv::build(&config, 7)?;
        assert_eq!(a.reset()?, b.reset()?);

        let mut c = TestEnv::build(&config, 8)?;
        assert_ne!(a.reset()?, c.reset()?);
        Ok(())
    }

    #[test]
    fn initial_state_is_small() -> Result<()> {
        let mut env = TestEnv::build(&CartPoleEnvConfig::default(), 0)?;
        let obs = env.reset()?;
        assert_eq!(obs.0.len(), 4);
        assert!(obs.0.iter().all(|v| v.abs() < 0.05));
        Ok(())
    }

    #[test]
    fn constant_push_terminates_within_bounds() -> Result<()> {
        let config = CartPoleEnvConfig::default();
        let mut env = TestEnv::build(&config, 1)?;
        env.reset()?;

        let mut steps = 0;
        loop {
            let (step, record) = env.step(&TestAct(1));
            steps += 1;
            assert_eq!(step.reward, 1.0);
            assert!(record.get_scalar("x").is_ok());
            assert!(record.get_scalar("theta").is_ok());
            if step.is_done {
                break;
            }
            assert!(steps < config.max_episode_steps);
        }

        // Pushing right forever tips the pole long before the step cap.
        assert!(steps < config.max_episode_steps);
        Ok(())
    }

    #[test]
    fn step_cap_signals_done() -> Result<()> {
        // A cap of 1 makes the very first step terminal.
        let config = CartPoleEnvConfig::default().max_episode_steps(1);
        let mut env = TestEnv::build(&config, 3)?;
        env.reset()?;
        let (step, _) = env.step(&TestAct(0));
        assert!(step.is_done);
        Ok(())
    }
}
