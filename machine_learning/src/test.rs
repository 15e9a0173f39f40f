#![cfg(test)]

use crate::{
    dataset::Dataset,
    init::InitPolicy,
    normalize::MinMax,
    training::{LossHistory, RegressorSpec, TrainerBuilder},
};

fn normalized(days: &[f32], sales: &[f32]) -> (Dataset, MinMax) {
    let x_scaler = MinMax::fit(days).unwrap();
    let y_scaler = MinMax::fit(sales).unwrap();
    let dataset =
        Dataset::new(x_scaler.transform_all(days), y_scaler.transform_all(sales)).unwrap();
    (dataset, y_scaler)
}

fn train(dataset: &Dataset, spec: &RegressorSpec, epochs: usize) -> LossHistory {
    let (mut trainer, mut params) = TrainerBuilder::new().build(spec).unwrap();
    trainer
        .train(&mut params, dataset.x_view(), dataset.y_view(), epochs, ())
        .unwrap()
}

fn spec(seed: u64) -> RegressorSpec {
    RegressorSpec {
        hidden: 5,
        learning_rate: 0.1,
        init: InitPolicy::FanInUniform,
        seed: Some(seed),
    }
}

#[test]
fn linear_sales_loss_does_not_increase() {
    let (dataset, _) = normalized(&[1., 2., 3.], &[10., 20., 30.]);

    for seed in 0..8 {
        let history = train(&dataset, &spec(seed), 100);

        assert_eq!(history.len(), 100);
        assert!(history.iter().all(|loss| loss >= 0.));

        let (first, last) = (history.first().unwrap(), history.last().unwrap());
        assert!(last <= first + 1e-6, "seed {seed}: loss went from {first} to {last}");
    }
}

#[test]
fn same_seed_same_history() {
    let (dataset, _) = normalized(&[1., 2., 3., 4., 5.], &[12., 9., 20., 26., 31.]);

    let a = train(&dataset, &spec(11), 250);
    let b = train(&dataset, &spec(11), 250);
    assert_eq!(a, b);
}

#[test]
fn longer_training_fits_a_line() {
    let days: Vec<f32> = (1..=10).map(|d| d as f32).collect();
    let sales: Vec<f32> = days.iter().map(|d| 3. * d + 5.).collect();
    let (dataset, y_scaler) = normalized(&days, &sales);

    let spec = RegressorSpec {
        hidden: 8,
        ..spec(3)
    };
    let (mut trainer, mut params) = TrainerBuilder::new().build(&spec).unwrap();
    let history = trainer
        .train(&mut params, dataset.x_view(), dataset.y_view(), 2000, ())
        .unwrap();

    assert!(history.last().unwrap() < history.first().unwrap());

    let y_pred = trainer.predict(&params, dataset.x_view()).unwrap();
    let predictions = y_scaler.inverse_all(y_pred.iter().copied());
    assert_eq!(predictions.len(), sales.len());
    assert!(predictions.iter().all(|p| p.is_finite()));
}

#[test]
fn constant_sales_are_predicted_back() {
    let (dataset, y_scaler) = normalized(&[1., 2., 3., 4.], &[50.; 4]);
    assert!(dataset.ys().iter().all(|&y| y == 0.));

    let (mut trainer, mut params) = TrainerBuilder::new().build(&spec(5)).unwrap();
    trainer
        .train(&mut params, dataset.x_view(), dataset.y_view(), 50, ())
        .unwrap();

    let y_pred = trainer.predict(&params, dataset.x_view()).unwrap();
    let predictions = y_scaler.inverse_all(y_pred.iter().copied());
    assert_eq!(predictions, vec![50.; 4]);
}
