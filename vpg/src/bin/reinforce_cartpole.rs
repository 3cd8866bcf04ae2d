//! Trains a REINFORCE agent on cart-pole and compares weight estimators.
use anyhow::Result;
use candle_core::{Device, Tensor};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;
use vpg_candle_agent::{
    mlp::{Mlp, MlpConfig},
    opt::OptimizerConfig,
    reinforce::{PolicyModelConfig, Reinforce, ReinforceConfig},
};
use vpg_cartpole_env::{CartPoleEnv, CartPoleEnvConfig};
use vpg_core::{
    record::BufferedRecorder, Agent as _, Collector, DefaultEvaluator, Env as _, Evaluator as _,
    Policy as _, Trainer, TrainerConfig, WeightEstimator,
};

const DIM_OBS: usize = 4;
const DIM_ACT: usize = 2;

mod obs_act_types {
    use super::*;

    #[derive(Clone, Debug)]
    pub struct Obs(Vec<f32>);

    impl vpg_core::Obs for Obs {}

    impl From<Vec<f32>> for Obs {
        fn from(v: Vec<f32>) -> Self {
            Self(v)
        }
    }

    impl From<Obs> for Tensor {
        fn from(obs: Obs) -> Tensor {
            // A state vector of unexpected dimension is a violated
            // environment contract; fail here rather than coerce shapes.
            assert_eq!(obs.0.len(), DIM_OBS, "unexpected state dimension");
            Tensor::from_vec(obs.0, (DIM_OBS,), &Device::Cpu).unwrap()
        }
    }

    #[derive(Clone, Debug)]
    pub struct Act(i64);

    impl vpg_core::Act for Act {}

    impl From<i64> for Act {
        fn from(ix: i64) -> Self {
            Self(ix)
        }
    }

    impl From<Act> for i64 {
        fn from(a: Act) -> i64 {
            a.0
        }
    }

    pub type Env = CartPoleEnv<Obs, Act>;
    pub type PgAgent = Reinforce<Env, Mlp>;
    pub type Evaluator = DefaultEvaluator<Env>;
}

use obs_act_types::*;

/// Weight-estimator choice on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum EstimatorArg {
    /// Whole-trajectory return.
    Total,
    /// Reward-to-go.
    Rtg,
    /// Total return minus the batch mean return.
    Baseline,
}

impl From<EstimatorArg> for WeightEstimator {
    fn from(v: EstimatorArg) -> Self {
        match v {
            EstimatorArg::Total => WeightEstimator::TotalReturn,
            EstimatorArg::Rtg => WeightEstimator::RewardToGo,
            EstimatorArg::Baseline => WeightEstimator::MeanBaseline,
        }
    }
}

/// Train a REINFORCE agent in the cart-pole environment.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of training epochs.
    #[arg(long, default_value_t = 50)]
    epochs: usize,

    /// Minimum batch size in environment timesteps.
    #[arg(long, default_value_t = 5000)]
    batch_size: usize,

    /// Learning rate.
    #[arg(long, default_value_t = 1e-2)]
    lr: f64,

    /// Weight-estimator policy.
    #[arg(long, value_enum, default_value_t = EstimatorArg::Total)]
    estimator: EstimatorArg,

    /// Random seed for the environment and the action sampler.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of evaluation episodes after training.
    #[arg(long, default_value_t = 5)]
    eval_episodes: usize,

    /// Number of post-training episodes rendered to the console.
    #[arg(long, default_value_t = 0)]
    render_episodes: usize,

    /// Write per-epoch mean returns to this CSV file.
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn create_agent_config(lr: f64, seed: u64) -> ReinforceConfig<Mlp> {
    let mlp_config = MlpConfig::new(DIM_OBS, vec![32, 32], DIM_ACT);
    let opt_config = OptimizerConfig::default().learning_rate(lr);
    let model_config = PolicyModelConfig::default()
        .policy_config(mlp_config)
        .opt_config(opt_config);
    ReinforceConfig::default().model_config(model_config).seed(seed)
}

/// Writes the plotting handoff: one row per epoch with its mean return.
fn write_returns_csv(path: &PathBuf, mean_returns: &[f32]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["epoch", "mean_return"])?;
    for (epoch, r) in mean_returns.iter().enumerate() {
        wtr.write_record([epoch.to_string(), r.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Rolls the trained policy forward, printing the cart position and pole
/// angle of every step. No learning side effects.
fn render(agent: &mut PgAgent, env_config: &CartPoleEnvConfig, n_episodes: usize) -> Result<()> {
    let mut env = Env::build(env_config, 0)?;

    for episode in 0..n_episodes {
        let mut obs = env.reset_with_index(episode)?;
        let mut t = 0;
        loop {
            let act = agent.sample(&obs);
            let (step, record) = env.step(&act);
            println!(
                "episode {:>2} step {:>3} | x {:+.3} | theta {:+.3}",
                episode,
                t,
                record.get_scalar("x")?,
                record.get_scalar("theta")?,
            );
            t += 1;
            if step.is_done {
                break;
            }
            obs = step.obs;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    let args = Args::parse();

    let env_config = CartPoleEnvConfig::default();
    let estimator: WeightEstimator = args.estimator.into();
    info!("estimator: {:?}", estimator);

    let env = Env::build(&env_config, args.seed as i64)?;
    let mut collector = Collector::new(env, estimator);
    let mut agent = PgAgent::build(create_agent_config(args.lr, args.seed))?;

    let trainer_config = TrainerConfig::default()
        .n_epochs(args.epochs)
        .min_batch_steps(args.batch_size);
    let mut trainer = Trainer::build(trainer_config)?;

    let mut recorder = BufferedRecorder::new();
    let mean_returns =
        trainer.train::<_, _, Evaluator>(&mut collector, &mut agent, &mut recorder, None)?;

    if let Some(path) = &args.csv {
        write_returns_csv(path, &mean_returns)?;
        info!("wrote per-epoch mean returns to {:?}", path);
    }

    // Post-training evaluation, no learning.
    agent.eval();
    if args.eval_episodes > 0 {
        let mut evaluator = Evaluator::new(&env_config, 1, args.eval_episodes)?;
        let record = evaluator.evaluate(&mut agent)?;
        info!("eval_return: {:.3}", record.get_scalar("eval_return")?);
    }
    if args.render_episodes > 0 {
        render(&mut agent, &env_config, args.render_episodes)?;
    }

    Ok(())
}
