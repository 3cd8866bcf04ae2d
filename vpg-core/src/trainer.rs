//! Train an [`Agent`].
mod config;

use crate::{
    record::{Record, RecordValue::Scalar, Recorder},
    Agent, Collector, Env, Evaluator,
};
use anyhow::Result;
pub use config::TrainerConfig;

/// Manages the training loop.
///
/// Each epoch collects one batch of complete episodes with the
/// [`Collector`], performs exactly one optimization step on the agent, and
/// records the batch's mean episode return and mean episode length. There is
/// no early stopping and no convergence check; training runs for the
/// configured epoch count. The only state carried between epochs is the
/// agent's policy parameters and optimizer moments; batches are discarded
/// after each optimization step.
pub struct Trainer {
    /// The number of training epochs.
    n_epochs: usize,

    /// Minimum batch size in environment timesteps.
    min_batch_steps: usize,

    /// Interval of evaluation in epochs.
    eval_interval: usize,

    /// Interval of flushing records in epochs. Zero disables flushing.
    flush_record_interval: usize,
}

impl Trainer {
    /// Constructs a trainer, validating the configuration.
    pub fn build(config: TrainerConfig) -> Result<Self> {
        config.check()?;
        Ok(Self {
            n_epochs: config.n_epochs,
            min_batch_steps: config.min_batch_steps,
            eval_interval: config.eval_interval,
            flush_record_interval: config.flush_record_interval,
        })
    }

    /// Trains the agent and returns the per-epoch mean episode returns.
    ///
    /// The returned sequence is the plotting handoff: one mean return per
    /// epoch, in epoch order. `evaluator` is consulted every
    /// `eval_interval` epochs when given.
    pub fn train<E, A, D>(
        &mut self,
        collector: &mut Collector<E>,
        agent: &mut A,
        recorder: &mut dyn Recorder,
        mut evaluator: Option<&mut D>,
    ) -> Result<Vec<f32>>
    where
        E: Env,
        A: Agent<E>,
        D: Evaluator<E>,
    {
        let mut mean_returns = Vec::with_capacity(self.n_epochs);
        agent.train();

        for epoch in 0..self.n_epochs {
            let batch = collector.collect(agent, self.min_batch_steps)?;
            let mut record = agent.opt(&batch)?;

            let mean_return = batch.mean_return();
            let mean_ep_len = batch.mean_ep_len();
            mean_returns.push(mean_return);

            record.insert("epoch", Scalar(epoch as f32));
            record.insert("mean_return", Scalar(mean_return));
            record.insert("mean_ep_len", Scalar(mean_ep_len));

            // Per-epoch console summary goes through the recorder's
            // immediate channel; aggregation uses store/flush below.
            recorder.write(Record::from_slice(&[
                ("epoch", Scalar(epoch as f32)),
                (
                    "loss",
                    Scalar(record.get_scalar("loss").unwrap_or(f32::NAN)),
                ),
                ("mean_return", Scalar(mean_return)),
                ("mean_ep_len", Scalar(mean_ep_len)),
            ]));

            // Evaluation rolls the current policy without learning.
            if let Some(evaluator) = evaluator.as_deref_mut() {
                if self.eval_interval > 0 && (epoch + 1) % self.eval_interval == 0 {
                    agent.eval();
                    let eval_record = evaluator.evaluate(agent)?;
                    agent.train();
                    record.merge_inplace(eval_record);
                }
            }

            recorder.store(record);
            if self.flush_record_interval > 0 && (epoch + 1) % self.flush_record_interval == 0 {
                recorder.flush(epoch as i64);
            }
        }

        Ok(mean_returns)
    }
}
