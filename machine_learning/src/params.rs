use crate::{MlErr, Result, optimization::Optimizer};

/// The parameters of a model and their gradient.
///
/// Every weight and bias of the model lives in one flat buffer, layers borrow their own slice of
/// it when traversing the model forwards and backwards. The gradient buffer has the same layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamStore {
    params: Vec<f32>,
    grad: Vec<f32>,
}

impl ParamStore {
    /// Creates a new `ParamStore` with a zeroed gradient.
    ///
    /// # Arguments
    /// * `params` - The initial parameters.
    ///
    /// # Returns
    /// A new `ParamStore` instance.
    pub fn new(params: Vec<f32>) -> Self {
        let grad = vec![0.0; params.len()];
        Self { params, grad }
    }

    /// Returns the amount of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn params(&self) -> &[f32] {
        &self.params
    }

    pub fn grad(&self) -> &[f32] {
        &self.grad
    }

    /// Fails if this store does not hold exactly `expected` parameters.
    pub fn check_len(&self, expected: usize) -> Result<()> {
        if self.len() != expected {
            return Err(MlErr::SizeMismatch {
                what: "model parameters",
                got: self.len(),
                expected,
            });
        }

        Ok(())
    }

    /// Creates a new `FrontIter` parameter iterator.
    ///
    /// The returned iterator iterates the model's layers forward.
    pub fn front(&self) -> FrontIter<'_> {
        FrontIter {
            params: &self.params,
        }
    }

    /// Creates a new `BackIter` parameter iterator.
    ///
    /// The returned iterator iterates the model's layers backwards.
    pub fn back(&mut self) -> BackIter<'_> {
        BackIter {
            params: &self.params,
            grad: &mut self.grad,
        }
    }

    /// Applies the gradient onto the parameters.
    ///
    /// # Arguments
    /// * `optimizer` - The optimizer dictating the update rule.
    pub fn optimize<O: Optimizer>(&mut self, optimizer: &mut O) {
        optimizer.update_params(&mut self.params, &self.grad);
    }

    /// Zeros out the gradient.
    pub fn zero_grad(&mut self) {
        self.grad.fill(0.0);
    }
}

/// A model's layer iterator.
///
/// This iterator iterates the layers of a model from the front.
pub struct FrontIter<'pm> {
    params: &'pm [f32],
}

impl<'pm> FrontIter<'pm> {
    /// Tries to yield the next layer's parameters.
    ///
    /// # Arguments
    /// * `size` - The amount of parameters of the next layer.
    ///
    /// # Returns
    /// `None` if there are less than `size` parameters left.
    pub fn next(&mut self, size: usize) -> Option<&'pm [f32]> {
        if size > self.params.len() {
            return None;
        }

        let (layer, rest) = self.params.split_at(size);
        self.params = rest;
        Some(layer)
    }
}

/// A model's layer iterator.
///
/// This iterator iterates the layers of a model from the back.
pub struct BackIter<'pm> {
    params: &'pm [f32],
    grad: &'pm mut [f32],
}

impl<'pm> BackIter<'pm> {
    /// Tries to yield the previous layer's parameters and gradient.
    ///
    /// # Arguments
    /// * `size` - The amount of parameters of the previous layer.
    ///
    /// # Returns
    /// `None` if there are less than `size` parameters left.
    pub fn next(&mut self, size: usize) -> Option<(&'pm [f32], &'pm mut [f32])> {
        if size > self.params.len() {
            return None;
        }

        let at = self.params.len() - size;
        let (rest, layer) = self.params.split_at(at);
        self.params = rest;

        let grad = std::mem::take(&mut self.grad);
        let (rest, layer_grad) = grad.split_at_mut(at);
        self.grad = rest;

        Some((layer, layer_grad))
    }
}
