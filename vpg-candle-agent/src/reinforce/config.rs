use super::model::PolicyModelConfig;
use crate::{
    model::{OutDim, SubModel},
    Device,
};
use anyhow::Result;
use candle_core::Tensor;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    marker::PhantomData,
    path::Path,
};

/// Configuration of [`Reinforce`](super::Reinforce).
#[derive(Debug, Deserialize, Serialize)]
#[serde(bound(
    serialize = "P::Config: Serialize",
    deserialize = "P::Config: DeserializeOwned"
))]
pub struct ReinforceConfig<P>
where
    P: SubModel<Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    /// Configuration of the policy model (network and optimizer).
    pub model_config: PolicyModelConfig<P::Config>,

    /// Device holding the policy parameters.
    pub device: Device,

    /// Seed of the action sampler's random source.
    pub seed: u64,

    /// Phantom data.
    pub phantom: PhantomData<P>,
}

impl<P> Default for ReinforceConfig<P>
where
    P: SubModel<Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    fn default() -> Self {
        Self {
            model_config: PolicyModelConfig::default(),
            device: Device::Cpu,
            seed: 42,
            phantom: PhantomData,
        }
    }
}

impl<P> Clone for ReinforceConfig<P>
where
    P: SubModel<Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    fn clone(&self) -> Self {
        Self {
            model_config: self.model_config.clone(),
            device: self.device,
            seed: self.seed,
            phantom: PhantomData,
        }
    }
}

impl<P> ReinforceConfig<P>
where
    P: SubModel<Output = Tensor>,
    P::Config: DeserializeOwned + Serialize + OutDim + Clone,
{
    /// Sets the configuration of the policy model.
    pub fn model_config(mut self, v: PolicyModelConfig<P::Config>) -> Self {
        self.model_config = v;
        self
    }

    /// Sets the device.
    pub fn device(mut self, v: Device) -> Self {
        self.device = v;
        self
    }

    /// Sets the seed of the action sampler.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Constructs [`ReinforceConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ReinforceConfig`] as a YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlp::{Mlp, MlpConfig};
    use tempdir::TempDir;

    #[test]
    fn yaml_roundtrip() -> Result<()> {
        let config = ReinforceConfig::<Mlp>::default()
            .model_config(
                PolicyModelConfig::default().policy_config(MlpConfig::new(4, vec![32, 32], 2)),
            )
            .seed(7);

        let dir = TempDir::new("reinforce_config")?;
        let path = dir.path().join("reinforce.yaml");
        config.save(&path)?;
        let config_ = ReinforceConfig::<Mlp>::load(&path)?;
        assert_eq!(config.seed, config_.seed);
        assert_eq!(config.model_config, config_.model_config);
        Ok(())
    }
}
