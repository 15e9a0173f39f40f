use ndarray::{Array2, ArrayView2};
use rand::Rng;

use crate::{Result, init::InitPolicy, params::ParamStore};

/// A model evaluated over the parameters of a `ParamStore`.
///
/// The model does not own its parameters, it only knows how many it needs and how to traverse
/// them.
pub trait Model {
    /// Returns the amount of parameters in the model.
    fn size(&self) -> usize;

    /// Creates a fresh parameter store for this model.
    ///
    /// # Arguments
    /// * `policy` - How each layer's parameters are sampled.
    /// * `rng` - A random number generator.
    fn init_params<R: Rng>(&self, policy: &InitPolicy, rng: &mut R) -> Result<ParamStore>;

    /// Makes a forward pass over a batch of inputs.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `x` - The input batch, one row per sample.
    ///
    /// # Returns
    /// The prediction for each row of `x` or an error if the shapes don't line up.
    fn forward(&mut self, params: &ParamStore, x: ArrayView2<f32>) -> Result<Array2<f32>>;

    /// Accumulates the gradient of the loss into `params`' gradient buffer. Must be preceded by a
    /// `forward` call over the same batch.
    ///
    /// # Arguments
    /// * `params` - The model's parameters and gradient.
    /// * `d` - The derivative of the loss with respect to the last forward's output.
    fn backward(&mut self, params: &mut ParamStore, d: Array2<f32>) -> Result<()>;
}
