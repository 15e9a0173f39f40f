mod builder;
mod history;
mod model_trainer;
mod progress;

pub use builder::{RegressorSpec, TrainerBuilder};
pub use history::LossHistory;
pub use model_trainer::ModelTrainer;
pub use progress::Progress;
