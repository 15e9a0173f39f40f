use std::num::NonZeroUsize;

use super::ModelTrainer;
use crate::{
    MlErr, Result,
    arch::{Model, Sequential, loss::Mse},
    init::{InitPolicy, generate_rng},
    optimization::GradientDescent,
    params::ParamStore,
};

/// The description of a scalar regressor and how to train it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressorSpec {
    pub hidden: usize,
    pub learning_rate: f32,
    pub init: InitPolicy,
    pub seed: Option<u64>,
}

/// Builds `ModelTrainer`s given a specification.
#[derive(Default)]
pub struct TrainerBuilder;

impl TrainerBuilder {
    /// Creates a new `TrainerBuilder`.
    pub fn new() -> Self {
        Self
    }

    /// Builds a fresh trainer and the parameters it will train following a spec.
    ///
    /// # Arguments
    /// * `spec` - The specification for the trainer.
    ///
    /// # Returns
    /// The trainer and its initialized parameters, or an error if the spec is invalid.
    pub fn build(
        &self,
        spec: &RegressorSpec,
    ) -> Result<(ModelTrainer<Sequential, GradientDescent, Mse>, ParamStore)> {
        let hidden = self.resolve_hidden(spec.hidden)?;
        let optimizer = self.resolve_optimizer(spec.learning_rate)?;

        let model = Sequential::regressor(hidden);
        let mut rng = generate_rng(spec.seed);
        let params = model.init_params(&spec.init, &mut rng)?;

        Ok((ModelTrainer::new(model, optimizer, Mse::new()), params))
    }

    fn resolve_hidden(&self, hidden: usize) -> Result<NonZeroUsize> {
        NonZeroUsize::new(hidden).ok_or_else(|| MlErr::InvalidHyperparam {
            name: "hidden",
            reason: "the hidden layer needs at least one unit".into(),
        })
    }

    fn resolve_optimizer(&self, learning_rate: f32) -> Result<GradientDescent> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(MlErr::InvalidHyperparam {
                name: "learning_rate",
                reason: format!("expected a positive number, got {learning_rate}"),
            });
        }

        Ok(GradientDescent::new(learning_rate))
    }
}
