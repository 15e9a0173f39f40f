use std::{
    error::Error,
    fmt::{self, Display},
};

use ndarray::ShapeError;

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug)]
pub enum MlErr {
    SizeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyInput {
        what: &'static str,
    },
    NonFinite {
        what: &'static str,
        index: usize,
    },
    RangeOverflow {
        what: &'static str,
    },
    InvalidHyperparam {
        name: &'static str,
        reason: String,
    },
    InvalidInit(String),
    Diverged {
        step: usize,
    },
    Shape(ShapeError),
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlErr::SizeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "There's a size mismatch for {what}, got {got} and expected {expected}"
            ),
            MlErr::EmptyInput { what } => write!(f, "The {what} must not be empty"),
            MlErr::NonFinite { what, index } => {
                write!(f, "The {what} has a non finite value at position {index}")
            }
            MlErr::RangeOverflow { what } => {
                write!(f, "The range of the {what} is too wide to be represented")
            }
            MlErr::InvalidHyperparam { name, reason } => {
                write!(f, "Invalid hyperparameter {name}: {reason}")
            }
            MlErr::InvalidInit(reason) => {
                write!(f, "Failed to build the parameter initializer: {reason}")
            }
            MlErr::Diverged { step } => {
                write!(f, "The loss stopped being a finite number at step {step}")
            }
            MlErr::Shape(e) => write!(f, "Invalid array shape: {e}"),
        }
    }
}

impl Error for MlErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MlErr::Shape(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ShapeError> for MlErr {
    fn from(value: ShapeError) -> Self {
        Self::Shape(value)
    }
}
