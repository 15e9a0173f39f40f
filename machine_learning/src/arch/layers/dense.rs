use ndarray::prelude::*;

use crate::{MlErr, Result, arch::activations::ActFn};

/// A fully connected layer, `act_fn(x · W + b)`.
///
/// The weights are laid out as a `(dim.0, dim.1)` row major matrix followed by the `dim.1` biases.
/// The input and the weighted sums of the last forward pass are kept for the backward pass.
#[derive(Clone, Debug)]
pub struct Dense {
    dim: (usize, usize),
    act_fn: Option<ActFn>,
    size: usize,

    // Forward metadata
    x: Array2<f32>,
    z: Array2<f32>,
}

impl Dense {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `dim` - The amount of inputs and outputs of the layer.
    /// * `act_fn` - The activation applied to the weighted sums, `None` for a linear layer.
    pub fn new(dim: (usize, usize), act_fn: Option<ActFn>) -> Self {
        Self {
            dim,
            size: (dim.0 + 1) * dim.1,
            act_fn,
            x: Array2::zeros((0, dim.0)),
            z: Array2::zeros((0, dim.1)),
        }
    }

    /// Returns the size of this layer.
    ///
    /// # Returns
    /// The amount of parameters this layer has.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dim(&self) -> (usize, usize) {
        self.dim
    }

    /// Computes the output of the layer for a batch of inputs of shape `(n, dim.0)`.
    pub fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        if x.ncols() != self.dim.0 {
            return Err(MlErr::SizeMismatch {
                what: "layer inputs",
                got: x.ncols(),
                expected: self.dim.0,
            });
        }

        let (w, b) = self.view_params(params)?;
        self.z = x.dot(&w) + &b;
        self.x = x.to_owned();

        let Some(act_fn) = self.act_fn else {
            return Ok(self.z.clone());
        };

        Ok(self.z.mapv(|z| act_fn.f(z)))
    }

    /// Accumulates the gradient of this layer's parameters into `grad`.
    ///
    /// # Arguments
    /// * `params` - This layer's parameters.
    /// * `grad` - This layer's gradient slice.
    /// * `d` - The derivative of the loss with respect to this layer's output.
    ///
    /// # Returns
    /// The derivative of the loss with respect to this layer's input.
    pub fn backward(
        &mut self,
        params: &[f32],
        grad: &mut [f32],
        mut d: Array2<f32>,
    ) -> Result<Array2<f32>> {
        if d.dim() != self.z.dim() {
            return Err(MlErr::SizeMismatch {
                what: "layer deltas",
                got: d.len(),
                expected: self.z.len(),
            });
        }

        if let Some(act_fn) = self.act_fn {
            d.zip_mut_with(&self.z, |d, &z| *d *= act_fn.df(z));
        }

        let (mut dw, mut db) = self.view_grad(grad)?;
        dw += &self.x.t().dot(&d);
        db += &d.sum_axis(Axis(0));

        let (w, _) = self.view_params(params)?;
        Ok(d.dot(&w.t()))
    }

    fn check_len(&self, what: &'static str, got: usize) -> Result<()> {
        if got != self.size {
            return Err(MlErr::SizeMismatch {
                what,
                got,
                expected: self.size,
            });
        }

        Ok(())
    }

    /// Gives a view of the raw gradient slice as the delta weights and delta biases of this layer.
    fn view_grad<'a>(
        &self,
        grad: &'a mut [f32],
    ) -> Result<(ArrayViewMut2<'a, f32>, ArrayViewMut1<'a, f32>)> {
        self.check_len("layer gradient", grad.len())?;

        let (dw_raw, db_raw) = grad.split_at_mut(self.size - self.dim.1);
        let dw = ArrayViewMut2::from_shape(self.dim, dw_raw)?;
        let db = ArrayViewMut1::from(db_raw);
        Ok((dw, db))
    }

    /// Gives a view of the raw parameter slice as the weights and biases of this layer.
    fn view_params<'a>(
        &self,
        params: &'a [f32],
    ) -> Result<(ArrayView2<'a, f32>, ArrayView1<'a, f32>)> {
        self.check_len("layer parameters", params.len())?;

        let (w_raw, b_raw) = params.split_at(self.size - self.dim.1);
        let weights = ArrayView2::from_shape(self.dim, w_raw)?;
        let biases = ArrayView1::from(b_raw);
        Ok((weights, biases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // w = [[1, -1, 2]], b = [0, 0.5, -3]
    const PARAMS: [f32; 6] = [1., -1., 2., 0., 0.5, -3.];

    #[test]
    fn forward_linear() {
        let mut dense = Dense::new((1, 3), None);
        let y = dense.forward(&PARAMS, array![[2.]].view()).unwrap();
        assert_eq!(y, array![[2., -1.5, 1.]]);
    }

    #[test]
    fn forward_relu() {
        let mut dense = Dense::new((1, 3), Some(ActFn::relu()));
        let y = dense.forward(&PARAMS, array![[2.], [0.]].view()).unwrap();
        assert_eq!(y, array![[2., 0., 1.], [0., 0.5, 0.]]);
    }

    #[test]
    fn backward_accumulates_gradient() {
        let mut dense = Dense::new((1, 3), Some(ActFn::relu()));
        let mut grad = [0_f32; 6];

        dense.forward(&PARAMS, array![[2.]].view()).unwrap();
        let d_in = dense
            .backward(&PARAMS, &mut grad, array![[1., 1., 1.]])
            .unwrap();

        // the second unit is inactive, so it receives no gradient
        assert_eq!(grad, [2., 0., 2., 1., 0., 1.]);
        assert_eq!(d_in, array![[3.]]);

        dense.forward(&PARAMS, array![[2.]].view()).unwrap();
        dense
            .backward(&PARAMS, &mut grad, array![[1., 1., 1.]])
            .unwrap();
        assert_eq!(grad, [4., 0., 4., 2., 0., 2.]);
    }

    #[test]
    fn forward_rejects_wrong_param_count() {
        let mut dense = Dense::new((1, 3), None);
        let err = dense.forward(&PARAMS[..5], array![[2.]].view()).unwrap_err();
        assert!(matches!(
            err,
            MlErr::SizeMismatch {
                got: 5,
                expected: 6,
                ..
            }
        ));
    }

    #[test]
    fn forward_rejects_wrong_input_width() {
        let mut dense = Dense::new((1, 3), None);
        let err = dense.forward(&PARAMS, array![[2., 3.]].view()).unwrap_err();
        assert!(matches!(err, MlErr::SizeMismatch { what: "layer inputs", .. }));
    }

    #[test]
    fn backward_before_forward_fails() {
        let mut dense = Dense::new((1, 3), None);
        let mut grad = [0_f32; 6];
        let err = dense
            .backward(&PARAMS, &mut grad, array![[1., 1., 1.]])
            .unwrap_err();
        assert!(matches!(err, MlErr::SizeMismatch { what: "layer deltas", .. }));
    }
}
