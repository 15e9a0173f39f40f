pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod progress;
pub mod report;

pub use error::{AppErr, Result};
