use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Uniform, uniform::Error as UniformError};
use serde::{Deserialize, Serialize};

use crate::{MlErr, Result};

pub trait ParamGen<R: Rng> {
    /// Should sample at most `n` parameters.
    ///
    /// # Arguments
    /// * `rng` - A random number generator.
    /// * `n` - The upper limit of samples to generate.
    ///
    /// # Returns
    /// An option whether the generator is exhausted.
    fn sample(&mut self, rng: &mut R, n: usize) -> Option<Vec<f32>>;

    /// Should return the amount of remaining parameters this generator can still generate.
    fn remaining(&self) -> usize;
}

/// A parameter generator that follows a certain probabilistic distribution.
pub struct RandParamGen<D: Distribution<f32>> {
    distribution: D,
    remaining: usize,
}

impl<D: Distribution<f32>> RandParamGen<D> {
    /// Creates a new `RandParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `distribution` - The distribution to sample the random numbers from.
    /// * `limit` - The maximum amount of numbers to generate.
    pub fn new(distribution: D, limit: usize) -> Self {
        Self {
            distribution,
            remaining: limit,
        }
    }
}

impl RandParamGen<Uniform<f32>> {
    /// Creates a new `RandParamGen` parameter generator that always yields the same value.
    ///
    /// # Arguments
    /// * `limit` - The maximum amount of numbers to generate.
    /// * `value` - The value to always generate.
    ///
    /// # Returns
    /// An error if `value` is not finite.
    pub fn constant(limit: usize, value: f32) -> std::result::Result<Self, UniformError> {
        Ok(Self::new(Uniform::new_inclusive(value, value)?, limit))
    }

    /// Creates a new `RandParamGen` parameter generator with a uniform distribution.
    ///
    /// # Arguments
    /// * `limit` - The maximum amount of numbers to generate.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(limit: usize, low: f32, high: f32) -> std::result::Result<Self, UniformError> {
        Ok(Self::new(Uniform::new(low, high)?, limit))
    }

    /// Creates a new `RandParamGen` parameter generator sampling from
    /// `U(-1/√fan_in, 1/√fan_in)`, the default of most linear layer implementations.
    ///
    /// # Arguments
    /// * `limit` - The maximum amount of numbers to generate.
    /// * `fan_in` - The number of input units of the layer.
    pub fn fan_in_uniform(limit: usize, fan_in: usize) -> std::result::Result<Self, UniformError> {
        let range = (1. / fan_in as f32).sqrt();
        Self::uniform(limit, -range, range)
    }
}

impl<R: Rng, D: Distribution<f32>> ParamGen<R> for RandParamGen<D> {
    fn sample(&mut self, rng: &mut R, mut n: usize) -> Option<Vec<f32>> {
        if self.remaining == 0 {
            return None;
        }

        n = n.min(self.remaining);
        self.remaining -= n;
        Some((0..n).map(|_| self.distribution.sample(rng)).collect())
    }

    fn remaining(&self) -> usize {
        self.remaining
    }
}

/// How the parameters of each layer are initialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum InitPolicy {
    #[default]
    FanInUniform,
    Const {
        value: f32,
    },
}

impl InitPolicy {
    /// Builds the generator for one layer.
    ///
    /// # Arguments
    /// * `limit` - The amount of parameters of the layer.
    /// * `fan_in` - The number of input units of the layer.
    pub fn param_gen(&self, limit: usize, fan_in: usize) -> Result<RandParamGen<Uniform<f32>>> {
        let param_gen = match *self {
            InitPolicy::FanInUniform => RandParamGen::fan_in_uniform(limit, fan_in),
            InitPolicy::Const { value } => RandParamGen::constant(limit, value),
        };

        param_gen.map_err(|e| MlErr::InvalidInit(e.to_string()))
    }
}

/// Returns a seeded rng when a seed is given, an entropy seeded one otherwise.
pub fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_in_uniform_stays_in_bounds() {
        let mut rng = generate_rng(Some(7));
        let mut param_gen = RandParamGen::fan_in_uniform(100, 4).unwrap();

        let sample = param_gen.sample(&mut rng, 100).unwrap();
        assert_eq!(sample.len(), 100);
        assert!(sample.iter().all(|p| (-0.5..0.5).contains(p)));
        assert_eq!(ParamGen::<StdRng>::remaining(&param_gen), 0);
    }

    #[test]
    fn sample_is_capped_by_limit() {
        let mut rng = generate_rng(Some(7));
        let mut param_gen = RandParamGen::constant(3, 0.25).unwrap();

        assert_eq!(param_gen.sample(&mut rng, 5), Some(vec![0.25; 3]));
        assert_eq!(param_gen.sample(&mut rng, 1), None);
    }

    #[test]
    fn same_seed_same_sample() {
        let sample = |seed| {
            let mut rng = generate_rng(Some(seed));
            RandParamGen::fan_in_uniform(8, 1)
                .unwrap()
                .sample(&mut rng, 8)
                .unwrap()
        };

        assert_eq!(sample(3), sample(3));
        assert_ne!(sample(3), sample(4));
    }

    #[test]
    fn const_policy_rejects_non_finite_values() {
        let policy = InitPolicy::Const { value: f32::NAN };
        assert!(matches!(policy.param_gen(2, 1), Err(MlErr::InvalidInit(_))));
    }
}
