use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use log::info;

use sales_forecast::{
    config::{Hyperparams, Overrides},
    loader, pipeline,
    progress::{BarProgress, LogProgress},
    report::TrainingReport,
};

/// Trains a small neural network to fit daily sales and shows how well it did.
#[derive(Parser, Debug)]
#[command(name = "sales-forecast", version, about, long_about = None)]
struct Args {
    /// CSV file with `day` and `sales` columns.
    csv: PathBuf,

    /// JSON file with the hyperparameters, flags take precedence over it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    learning_rate: Option<f32>,

    #[arg(long)]
    epochs: Option<usize>,

    /// Units of the hidden layer.
    #[arg(long)]
    hidden: Option<usize>,

    /// Seed of the parameter initialization, runs with the same seed are identical.
    #[arg(long)]
    seed: Option<u64>,

    /// Also write the report as JSON to this file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log the progress instead of drawing a progress bar.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            learning_rate: self.learning_rate,
            epochs: self.epochs,
            hidden: self.hidden,
            seed: self.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let hyperparams = match &args.config {
        Some(path) => Hyperparams::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Hyperparams::default(),
    }
    .with_overrides(&args.overrides());
    info!("hyperparameters: {hyperparams:?}");

    let table = loader::load_csv(&args.csv)
        .with_context(|| format!("loading sales from {}", args.csv.display()))?;

    let report = if args.quiet {
        pipeline::run(table, &hyperparams, LogProgress::new())
    } else {
        pipeline::run(table, &hyperparams, BarProgress::new())
    }
    .context("training failed")?;

    print_report(&report)?;

    if let Some(path) = &args.output {
        report
            .write_json(path)
            .with_context(|| format!("writing report to {}", path.display()))?;
    }

    Ok(())
}

fn print_report(report: &TrainingReport) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report.render(&mut out)?;
    out.flush()
}
