//! Interfaces of differentiable submodels.
use candle_nn::VarBuilder;

/// A differentiable function with trainable parameters, built from a
/// [`VarBuilder`].
///
/// The seam between the agent and the concrete network architecture: the
/// agent owns the `VarMap` and the optimizer, the submodel owns only the
/// forward computation.
pub trait SubModel {
    /// Configuration from which the submodel is constructed.
    type Config;

    /// Input of the submodel.
    type Input;

    /// Output of the submodel.
    type Output;

    /// Builds the submodel, registering its variables in `vb`.
    fn build(vb: VarBuilder, config: Self::Config) -> Self;

    /// Performs the forward computation.
    fn forward(&self, input: &Self::Input) -> Self::Output;
}

/// Interface for handling output dimensions.
pub trait OutDim {
    /// Returns the output dimension.
    fn get_out_dim(&self) -> usize;

    /// Sets the output dimension.
    fn set_out_dim(&mut self, v: usize);
}
