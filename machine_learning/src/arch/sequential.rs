use std::num::NonZeroUsize;

use ndarray::{Array2, ArrayView2};
use rand::Rng;

use super::{Model, activations::ActFn, layers::Layer};
use crate::{MlErr, Result, init::InitPolicy, init::ParamGen, params::ParamStore};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
#[derive(Clone, Debug)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Creates the scalar regressor `W2 · relu(W1 · x + b1) + b2`.
    ///
    /// # Arguments
    /// * `hidden` - The width of the hidden layer.
    pub fn regressor(hidden: NonZeroUsize) -> Self {
        let hidden = hidden.get();

        Self::new([
            Layer::dense((1, hidden), Some(ActFn::relu())),
            Layer::dense((hidden, 1), None),
        ])
    }

    fn missing_layer(&self, i: usize) -> MlErr {
        MlErr::SizeMismatch {
            what: "layers",
            got: i,
            expected: self.layers.len(),
        }
    }
}

impl Model for Sequential {
    fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    fn init_params<R: Rng>(&self, policy: &InitPolicy, rng: &mut R) -> Result<ParamStore> {
        let mut params = Vec::with_capacity(self.size());

        for (i, layer) in self.layers.iter().enumerate() {
            let size = layer.size();
            let mut param_gen = policy.param_gen(size, layer.fan_in())?;
            let sample = param_gen
                .sample(rng, size)
                .ok_or_else(|| self.missing_layer(i))?;

            params.extend(sample);
        }

        Ok(ParamStore::new(params))
    }

    fn forward(&mut self, params: &ParamStore, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        params.check_len(self.size())?;

        let mut front = params.front();
        let mut out = x.to_owned();

        for i in 0..self.layers.len() {
            let size = self.layers[i].size();
            let layer_params = front.next(size).ok_or_else(|| self.missing_layer(i))?;
            out = self.layers[i].forward(layer_params, out.view())?;
        }

        Ok(out)
    }

    fn backward(&mut self, params: &mut ParamStore, mut d: Array2<f32>) -> Result<()> {
        params.check_len(self.size())?;

        let nlayers = self.layers.len();
        let mut back = params.back();

        for (i, layer) in self.layers.iter_mut().rev().enumerate() {
            let size = layer.size();
            let (layer_params, grad) = back.next(size).ok_or(MlErr::SizeMismatch {
                what: "layers",
                got: i,
                expected: nlayers,
            })?;

            d = layer.backward(layer_params, grad, d)?;
        }

        Ok(())
    }
}
