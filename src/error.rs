use std::{error::Error, fmt, io, path::PathBuf};

use machine_learning::MlErr;

/// The application's result type.
pub type Result<T> = std::result::Result<T, AppErr>;

/// Everything that can stop a training run.
#[derive(Debug)]
pub enum AppErr {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Csv(csv::Error),
    MissingColumn {
        expected: &'static str,
        found: Vec<String>,
    },
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    EmptyTable,
    InvalidConfig(String),
    Json(serde_json::Error),
    Ml(MlErr),
}

impl fmt::Display for AppErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErr::Io { path, source } => write!(f, "io error on '{}': {source}", path.display()),
            AppErr::Csv(e) => write!(f, "csv error: {e}"),
            AppErr::MissingColumn { expected, found } => write!(
                f,
                "missing column '{expected}', the header has [{}]",
                found.join(", ")
            ),
            AppErr::InvalidValue { row, column, value } => {
                write!(f, "row {row}: '{value}' in column '{column}' is not a finite number")
            }
            AppErr::EmptyTable => write!(f, "the table has no rows"),
            AppErr::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            AppErr::Json(e) => write!(f, "json error: {e}"),
            AppErr::Ml(e) => write!(f, "training error: {e}"),
        }
    }
}

impl Error for AppErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppErr::Io { source, .. } => Some(source),
            AppErr::Csv(e) => Some(e),
            AppErr::Json(e) => Some(e),
            AppErr::Ml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for AppErr {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for AppErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<MlErr> for AppErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}
