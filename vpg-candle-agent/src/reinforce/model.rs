use crate::{
    model::{OutDim, SubModel},
    opt::{Optimizer, OptimizerConfig},
};
use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{VarBuilder, VarMap};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`PolicyModel`].
pub struct PolicyModelConfig<P>
where
    P: OutDim,
{
    pub(super) policy_config: Option<P>,
    pub(super) opt_config: OptimizerConfig,
}

impl<P> Default for PolicyModelConfig<P>
where
    P: OutDim,
{
    fn default() -> Self {
        Self {
            policy_config: None,
            opt_config: OptimizerConfig::default(),
        }
    }
}

impl<P> PolicyModelConfig<P>
where
    P: DeserializeOwned + Serialize + OutDim,
{
    /// Sets the configuration of the policy network.
    pub fn policy_config(mut self, v: P) -> Self {
        self.policy_config = Some(v);
        self
    }

    /// Sets optimizer configuration.
    pub fn opt_config(mut self, v: OptimizerConfig) -> Self {
        self.opt_config = v;
        self
    }

    /// Constructs [`PolicyModelConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`PolicyModelConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Policy network bundled with its trainable variables and optimizer.
///
/// The model exclusively owns the policy parameters (a [`VarMap`]); they are
/// mutated only by [`PolicyModel::backward_step`] and reinitialized only by
/// [`PolicyModel::reset`].
pub struct PolicyModel<P>
where
    P: SubModel<Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    device: Device,
    varmap: VarMap,

    // Dimension of the output vector (equal to the number of actions).
    pub(super) out_dim: usize,

    // Policy network.
    policy: P,

    opt_config: OptimizerConfig,
    policy_config: P::Config,
    opt: Optimizer,
}

impl<P> PolicyModel<P>
where
    P: SubModel<Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    /// Constructs [`PolicyModel`].
    pub fn build(config: PolicyModelConfig<P::Config>, device: Device) -> Result<Self> {
        let policy_config = config.policy_config.context("policy_config is not set.")?;
        let out_dim = policy_config.get_out_dim();
        let opt_config = config.opt_config;
        let varmap = VarMap::new();
        let policy = {
            let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);
            P::build(vb, policy_config.clone())
        };
        let opt = opt_config.build(varmap.all_vars())?;

        Ok(Self {
            device,
            out_dim,
            varmap,
            policy,
            opt_config,
            policy_config,
            opt,
        })
    }

    /// Outputs logits given observation(s).
    pub fn forward(&self, obs: &P::Input) -> Tensor {
        self.policy.forward(obs)
    }

    /// Zeroes accumulated gradients, backpropagates and applies one
    /// optimizer step.
    pub fn backward_step(&mut self, loss: &Tensor) -> Result<()> {
        self.opt.backward_step(loss)
    }

    /// Reinitializes every learnable variable to a fresh random draw.
    ///
    /// Replaces the variable map, the network referencing it and the
    /// optimizer (including its moment estimates) from the stored
    /// configurations. Idempotent: the post-reset policy depends only on
    /// fresh draws, never on pre-reset parameters.
    pub fn reset(&mut self) -> Result<()> {
        let varmap = VarMap::new();
        let policy = {
            let vb = VarBuilder::from_varmap(&varmap, DType::F32, &self.device);
            P::build(vb, self.policy_config.clone())
        };
        self.opt = self.opt_config.build(varmap.all_vars())?;
        self.varmap = varmap;
        self.policy = policy;
        Ok(())
    }

    /// The number of actions.
    pub fn out_dim(&self) -> usize {
        self.out_dim
    }

    /// The device holding the variables.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// The variable map holding the policy parameters.
    pub fn varmap(&self) -> &VarMap {
        &self.varmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlp::{Mlp, MlpConfig};

    fn model() -> PolicyModel<Mlp> {
        let config = PolicyModelConfig::default().policy_config(MlpConfig::new(4, vec![8], 2));
        PolicyModel::build(config, Device::Cpu).unwrap()
    }

    #[test]
    fn reset_redraws_parameters() {
        let mut m = model();
        let x = Tensor::ones((1, 4), DType::F32, &Device::Cpu).unwrap();

        let before = m.forward(&x).to_vec2::<f32>().unwrap();
        m.reset().unwrap();
        let after = m.forward(&x).to_vec2::<f32>().unwrap();

        // A fresh random draw produces different logits for the same input.
        assert_ne!(before, after);

        // Resetting twice in a row is as valid as resetting once.
        m.reset().unwrap();
        let again = m.forward(&x).to_vec2::<f32>().unwrap();
        assert_eq!(again[0].len(), 2);
        assert!(again[0].iter().all(|v| v.is_finite()));
    }

    #[test]
    fn optimizer_rebinds_to_fresh_variables_after_reset() {
        let mut m = model();
        m.reset().unwrap();

        // A backward step after reset must update the new varmap without
        // erroring, proving the optimizer tracks the fresh variables.
        let x = Tensor::ones((3, 4), DType::F32, &Device::Cpu).unwrap();
        let loss = m.forward(&x).mean_all().unwrap();
        m.backward_step(&loss).unwrap();
    }
}
