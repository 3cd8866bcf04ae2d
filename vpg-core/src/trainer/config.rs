//! Configuration of [`Trainer`](super::Trainer).
use crate::error::VpgError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Trainer`](super::Trainer).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainerConfig {
    /// The number of training epochs. One epoch is one collected batch
    /// followed by one optimization step.
    pub n_epochs: usize,

    /// Minimum batch size in environment timesteps.
    ///
    /// Collection stops at the first episode boundary past this threshold,
    /// so actual batches may be larger. Must be positive.
    pub min_batch_steps: usize,

    /// Interval of evaluation in epochs. Zero disables evaluation.
    pub eval_interval: usize,

    /// Interval of flushing records in epochs. Zero disables flushing.
    pub flush_record_interval: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_epochs: 50,
            min_batch_steps: 5000,
            eval_interval: 0,
            flush_record_interval: 1,
        }
    }
}

impl TrainerConfig {
    /// Sets the number of training epochs.
    pub fn n_epochs(mut self, v: usize) -> Self {
        self.n_epochs = v;
        self
    }

    /// Sets the minimum batch size in timesteps.
    pub fn min_batch_steps(mut self, v: usize) -> Self {
        self.min_batch_steps = v;
        self
    }

    /// Sets the interval of evaluation in epochs.
    pub fn eval_interval(mut self, v: usize) -> Self {
        self.eval_interval = v;
        self
    }

    /// Sets the interval of flushing records in epochs.
    pub fn flush_record_interval(mut self, v: usize) -> Self {
        self.flush_record_interval = v;
        self
    }

    /// Validates the configuration.
    ///
    /// A non-positive batch threshold would admit a batch with zero
    /// completed episodes and a degenerate mean return; it is rejected here,
    /// at configuration time.
    pub fn check(&self) -> Result<(), VpgError> {
        if self.min_batch_steps == 0 {
            return Err(VpgError::InvalidMinBatchSteps(self.min_batch_steps));
        }
        Ok(())
    }

    /// Constructs [`TrainerConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainerConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
