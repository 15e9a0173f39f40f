use ndarray::{ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result};

/// An in-memory dataset of scalar inputs and scalar targets.
///
/// Once built it is never mutated, a normalized copy is a new `Dataset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    xs: Vec<f32>,
    ys: Vec<f32>,
}

impl Dataset {
    /// Creates a new `Dataset` from owned buffers.
    ///
    /// # Arguments
    /// * `xs` - The inputs.
    /// * `ys` - The targets, one per input.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the buffers are empty or their lengths differ.
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(MlErr::SizeMismatch {
                what: "dataset targets",
                got: ys.len(),
                expected: xs.len(),
            });
        }

        if xs.is_empty() {
            return Err(MlErr::EmptyInput { what: "dataset" });
        }

        Ok(Self { xs, ys })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[inline]
    pub fn xs(&self) -> &[f32] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[f32] {
        &self.ys
    }

    /// The inputs as a single full batch of shape `(len, 1)`.
    pub fn x_view(&self) -> ArrayView2<'_, f32> {
        ArrayView1::from(&self.xs[..]).insert_axis(Axis(1))
    }

    /// The targets as a single full batch of shape `(len, 1)`.
    pub fn y_view(&self) -> ArrayView2<'_, f32> {
        ArrayView1::from(&self.ys[..]).insert_axis(Axis(1))
    }
}
