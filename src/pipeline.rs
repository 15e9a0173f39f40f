use log::{info, warn};
use machine_learning::{
    dataset::Dataset,
    normalize::MinMax,
    training::{Progress, TrainerBuilder},
};

use crate::{config::Hyperparams, error::Result, loader::SalesTable, report::TrainingReport};

/// Runs one full training over `table`.
///
/// Days and sales are min-max normalized, a fresh regressor is trained on them with full batch
/// gradient descent and its predictions are mapped back to raw sales.
///
/// # Arguments
/// * `table` - The raw sales table.
/// * `hyperparams` - The knobs of this run.
/// * `progress` - Notified after every training step.
///
/// # Returns
/// The report of the run, or the first error found.
pub fn run<P: Progress>(
    table: SalesTable,
    hyperparams: &Hyperparams,
    progress: P,
) -> Result<TrainingReport> {
    hyperparams.validate()?;

    let raw = table.to_dataset()?;
    let day_scaler = MinMax::fit(raw.xs())?;
    let sales_scaler = MinMax::fit(raw.ys())?;

    if day_scaler.is_degenerate() {
        warn!("every row has day {}, the model can't tell them apart", day_scaler.min());
    }
    if sales_scaler.is_degenerate() {
        warn!("every row has sales {}, predictions will be constant", sales_scaler.min());
    }

    let dataset = Dataset::new(
        day_scaler.transform_all(raw.xs()),
        sales_scaler.transform_all(raw.ys()),
    )?;

    let (mut trainer, mut params) = TrainerBuilder::new().build(&hyperparams.to_spec())?;
    let losses = trainer.train(
        &mut params,
        dataset.x_view(),
        dataset.y_view(),
        hyperparams.epochs,
        progress,
    )?;

    let y_pred = trainer.predict(&params, dataset.x_view())?;
    let predictions = sales_scaler.inverse_all(y_pred.iter().copied());
    info!("predicted {} rows", predictions.len());

    Ok(TrainingReport {
        table,
        day_scaler,
        sales_scaler,
        losses,
        predictions,
    })
}
