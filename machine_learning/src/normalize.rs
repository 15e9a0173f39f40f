use serde::Serialize;

use crate::{MlErr, Result};

/// Min-max scaling parameters of a single axis.
///
/// Maps the observed `[min, max]` range onto `[0, 1]` and back. When every observed value is the
/// same the range is degenerate: every value maps to `0` and every normalized value maps back to
/// `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinMax {
    min: f32,
    max: f32,
}

impl MinMax {
    /// Computes the scaling parameters of `values`.
    ///
    /// # Arguments
    /// * `values` - The raw values of one axis.
    ///
    /// # Returns
    /// The fitted `MinMax` or an error if `values` is empty or contains a non finite number.
    pub fn fit(values: &[f32]) -> Result<Self> {
        if values.is_empty() {
            return Err(MlErr::EmptyInput {
                what: "normalization input",
            });
        }

        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(MlErr::NonFinite {
                what: "normalization input",
                index,
            });
        }

        let (min, max) = values
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });

        if !(max - min).is_finite() {
            return Err(MlErr::RangeOverflow {
                what: "normalization input",
            });
        }

        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    /// Whether every fitted value was the same.
    pub fn is_degenerate(&self) -> bool {
        self.max == self.min
    }

    /// Maps a raw value onto the normalized range.
    pub fn transform(&self, v: f32) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }

        (v - self.min) / (self.max - self.min)
    }

    /// Maps a normalized value back onto the raw range.
    pub fn inverse(&self, u: f32) -> f32 {
        self.min + u * (self.max - self.min)
    }

    pub fn transform_all(&self, values: &[f32]) -> Vec<f32> {
        values.iter().map(|&v| self.transform(v)).collect()
    }

    pub fn inverse_all<I>(&self, values: I) -> Vec<f32>
    where
        I: IntoIterator<Item = f32>,
    {
        values.into_iter().map(|u| self.inverse(u)).collect()
    }
}
