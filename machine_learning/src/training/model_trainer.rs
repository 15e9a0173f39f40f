use log::{debug, info};
use ndarray::{Array2, ArrayView2};

use super::{LossHistory, Progress};
use crate::{
    MlErr, Result,
    arch::{Model, loss::LossFn},
    optimization::Optimizer,
    params::ParamStore,
};

/// A model `Trainer`. Contains the relevant components needed for training a model,
/// including the model itself.
///
/// Every step runs over the full batch: forward, loss, backward and one optimizer update.
pub struct ModelTrainer<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    model: M,
    optimizer: O,
    loss_fn: L,
}

impl<M, O, L> ModelTrainer<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    /// Returns a new `ModelTrainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `optimizer` - The update rule applied after each step.
    /// * `loss_fn` - The loss function used to measure the difference between a model's output
    ///   and the expected one.
    pub fn new(model: M, optimizer: O, loss_fn: L) -> Self {
        Self {
            model,
            optimizer,
            loss_fn,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Performs `epochs` full batch steps over `x` and `y`, updating `params` in place.
    ///
    /// # Arguments
    /// * `params` - The model's parameters, must hold exactly `model.size()` values.
    /// * `x` - The inputs, one row per sample.
    /// * `y` - The targets, one row per sample.
    /// * `epochs` - The amount of steps, `0` runs none.
    /// * `progress` - Notified after every completed step.
    ///
    /// # Returns
    /// The loss of each step, or the first error found. A loss that stops being finite aborts
    /// the run.
    pub fn train<P: Progress>(
        &mut self,
        params: &mut ParamStore,
        x: ArrayView2<f32>,
        y: ArrayView2<f32>,
        epochs: usize,
        mut progress: P,
    ) -> Result<LossHistory> {
        params.check_len(self.model.size())?;

        if x.nrows() == 0 {
            return Err(MlErr::EmptyInput {
                what: "training batch",
            });
        }

        if x.nrows() != y.nrows() {
            return Err(MlErr::SizeMismatch {
                what: "training targets",
                got: y.nrows(),
                expected: x.nrows(),
            });
        }

        info!("training {} parameters for {epochs} epochs", params.len());
        let mut history = LossHistory::with_capacity(epochs);

        for step in 0..epochs {
            let loss = self.step(params, x, y)?;
            if !loss.is_finite() {
                return Err(MlErr::Diverged { step });
            }

            debug!("epoch {step}: loss {loss}");
            history.push(loss);
            progress.update(step + 1, epochs);
        }

        progress.finish();

        if let (Some(first), Some(last)) = (history.first(), history.last()) {
            info!("training finished, loss went from {first} to {last}");
        }

        Ok(history)
    }

    fn step(
        &mut self,
        params: &mut ParamStore,
        x: ArrayView2<f32>,
        y: ArrayView2<f32>,
    ) -> Result<f32> {
        params.zero_grad();

        let y_pred = self.model.forward(params, x)?;
        if y_pred.dim() != y.dim() {
            return Err(MlErr::SizeMismatch {
                what: "model outputs",
                got: y_pred.ncols(),
                expected: y.ncols(),
            });
        }

        let loss = self.loss_fn.loss(y_pred.view(), y);
        let d = self.loss_fn.loss_prime(y_pred.view(), y);
        self.model.backward(params, d)?;
        params.optimize(&mut self.optimizer);

        Ok(loss)
    }

    /// Evaluates the model over `x` with the given parameters.
    pub fn predict(&mut self, params: &ParamStore, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        self.model.forward(params, x)
    }
}
