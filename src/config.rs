use std::{fs, path::Path};

use log::warn;
use machine_learning::{init::InitPolicy, training::RegressorSpec};
use serde::{Deserialize, Serialize};

use crate::error::{AppErr, Result};

const MAX_RECOMMENDED_EPOCHS: usize = 10_000;
const MAX_RECOMMENDED_HIDDEN: usize = 100;

/// The knobs of a training run.
///
/// Missing fields of a JSON config take their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Hyperparams {
    pub learning_rate: f32,
    pub epochs: usize,
    pub hidden: usize,
    pub seed: Option<u64>,
    pub init: InitPolicy,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            epochs: 100,
            hidden: 5,
            seed: None,
            init: InitPolicy::default(),
        }
    }
}

/// Values given on the command line, they take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub learning_rate: Option<f32>,
    pub epochs: Option<usize>,
    pub hidden: Option<usize>,
    pub seed: Option<u64>,
}

impl Hyperparams {
    /// Loads the hyperparameters from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or has unknown or mistyped fields.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| AppErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Returns a copy with every given override applied.
    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(learning_rate) = overrides.learning_rate {
            self.learning_rate = learning_rate;
        }
        if let Some(epochs) = overrides.epochs {
            self.epochs = epochs;
        }
        if let Some(hidden) = overrides.hidden {
            self.hidden = hidden;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }

        self
    }

    /// Checks the hyperparameters can drive a training run.
    ///
    /// Values that are valid but outside of the usual ranges only emit a warning.
    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(AppErr::InvalidConfig(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }

        if self.hidden == 0 {
            return Err(AppErr::InvalidConfig(
                "hidden must be at least 1".to_string(),
            ));
        }

        if self.learning_rate > 1.0 {
            warn!("learning_rate {} is above 1", self.learning_rate);
        }
        if self.epochs > MAX_RECOMMENDED_EPOCHS {
            warn!("{} epochs is above {MAX_RECOMMENDED_EPOCHS}", self.epochs);
        }
        if self.hidden > MAX_RECOMMENDED_HIDDEN {
            warn!("{} hidden units is above {MAX_RECOMMENDED_HIDDEN}", self.hidden);
        }

        Ok(())
    }

    pub fn to_spec(&self) -> RegressorSpec {
        RegressorSpec {
            hidden: self.hidden,
            learning_rate: self.learning_rate,
            init: self.init,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let hp = Hyperparams::default();
        assert_eq!(hp.learning_rate, 0.1);
        assert_eq!(hp.epochs, 100);
        assert_eq!(hp.hidden, 5);
        assert_eq!(hp.seed, None);
        assert_eq!(hp.init, InitPolicy::FanInUniform);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let hp = Hyperparams::from_json_str(r#"{ "epochs": 300, "seed": 7 }"#).unwrap();
        assert_eq!(hp.epochs, 300);
        assert_eq!(hp.seed, Some(7));
        assert_eq!(hp.hidden, 5);
    }

    #[test]
    fn json_init_policy() {
        let hp =
            Hyperparams::from_json_str(r#"{ "init": { "kind": "const", "value": 0.5 } }"#).unwrap();
        assert_eq!(hp.init, InitPolicy::Const { value: 0.5 });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Hyperparams::from_json_str(r#"{ "lr": 0.5 }"#).unwrap_err();
        assert!(matches!(err, AppErr::Json(_)));
    }

    #[test]
    fn overrides_win() {
        let overrides = Overrides {
            epochs: Some(3),
            seed: Some(1),
            ..Default::default()
        };
        let hp = Hyperparams::default().with_overrides(&overrides);

        assert_eq!(hp.epochs, 3);
        assert_eq!(hp.seed, Some(1));
        assert_eq!(hp.learning_rate, 0.1);
    }

    #[test]
    fn validation() {
        assert!(Hyperparams::default().validate().is_ok());

        let zero_hidden = Hyperparams {
            hidden: 0,
            ..Default::default()
        };
        assert!(matches!(zero_hidden.validate(), Err(AppErr::InvalidConfig(_))));

        let zero_lr = Hyperparams {
            learning_rate: 0.0,
            ..Default::default()
        };
        assert!(matches!(zero_lr.validate(), Err(AppErr::InvalidConfig(_))));

        let zero_epochs = Hyperparams {
            epochs: 0,
            ..Default::default()
        };
        assert!(zero_epochs.validate().is_ok());
    }
}
