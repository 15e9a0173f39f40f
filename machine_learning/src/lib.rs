pub mod arch;
pub mod dataset;
pub mod error;
pub mod init;
pub mod normalize;
pub mod optimization;
pub mod params;
mod test;
pub mod training;

pub use error::{MlErr, Result};
