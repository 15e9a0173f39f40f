use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use log::info;
use machine_learning::{normalize::MinMax, training::LossHistory};
use serde::Serialize;

use crate::{
    error::{AppErr, Result},
    loader::SalesTable,
};

const CHART_ROWS: usize = 20;
const CHART_WIDTH: usize = 40;

/// The outcome of one training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub table: SalesTable,
    pub day_scaler: MinMax,
    pub sales_scaler: MinMax,
    pub losses: LossHistory,
    /// Predicted sales in raw units, one per row of `table`.
    pub predictions: Vec<f32>,
}

impl TrainingReport {
    /// Writes a human readable rendition of the report.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        self.render_losses(out)?;
        writeln!(out)?;
        self.render_chart(out)?;
        writeln!(out)?;
        self.render_predictions(out)
    }

    fn render_losses<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Loss")?;

        let (Some(first), Some(last), Some((best_step, best))) = (
            self.losses.first(),
            self.losses.last(),
            self.losses.best(),
        ) else {
            return writeln!(out, "  no training steps were run");
        };

        writeln!(out, "  steps: {}", self.losses.len())?;
        writeln!(out, "  first: {first:.6}")?;
        writeln!(out, "  last:  {last:.6}")?;
        writeln!(out, "  best:  {best:.6} (step {})", best_step + 1)
    }

    /// A coarse horizontal bar chart of the loss curve, sampling at most `CHART_ROWS` steps.
    fn render_chart<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let losses = self.losses.as_slice();
        let max = losses.iter().copied().fold(0.0_f32, f32::max);
        if losses.is_empty() || max <= 0.0 {
            return Ok(());
        }

        writeln!(out, "Loss curve")?;
        let stride = losses.len().div_ceil(CHART_ROWS);

        for (i, loss) in losses.iter().enumerate().step_by(stride) {
            let width = ((loss / max) * CHART_WIDTH as f32).round() as usize;
            writeln!(
                out,
                "  {:>6} | {:<w$} {loss:.6}",
                i + 1,
                "#".repeat(width),
                w = CHART_WIDTH
            )?;
        }

        Ok(())
    }

    fn render_predictions<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{:>10} {:>12} {:>12}", "day", "sales", "prediction")?;

        for (row, prediction) in self.table.rows().iter().zip(&self.predictions) {
            writeln!(
                out,
                "{:>10} {:>12.2} {:>12.2}",
                row.day, row.sales, prediction
            )?;
        }

        Ok(())
    }

    /// Writes the report as pretty printed JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| AppErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(|source| AppErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("report written to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::read_csv;

    fn report(losses: Vec<f32>) -> TrainingReport {
        let table = read_csv("day,sales\n1,10\n2,20\n".as_bytes()).unwrap();

        TrainingReport {
            day_scaler: MinMax::fit(&table.days()).unwrap(),
            sales_scaler: MinMax::fit(&table.sales()).unwrap(),
            table,
            losses: LossHistory::from(losses),
            predictions: vec![11.0, 19.5],
        }
    }

    fn rendered(report: &TrainingReport) -> String {
        let mut out = Vec::new();
        report.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_summary_and_predictions() {
        let text = rendered(&report(vec![0.5, 0.25, 0.3]));

        assert!(text.contains("steps: 3"));
        assert!(text.contains("first: 0.500000"));
        assert!(text.contains("last:  0.300000"));
        assert!(text.contains("best:  0.250000 (step 2)"));
        assert!(text.contains("Loss curve"));
        assert!(text.contains("19.50"));
    }

    #[test]
    fn empty_history_is_rendered() {
        let text = rendered(&report(Vec::new()));

        assert!(text.contains("no training steps were run"));
        assert!(!text.contains("Loss curve"));
        assert!(text.contains("prediction"));
    }

    #[test]
    fn chart_is_bounded() {
        let losses = (0..1000).map(|i| 1.0 / (i + 1) as f32).collect();
        let text = rendered(&report(losses));

        let bars = text.lines().filter(|l| l.contains(" | ")).count();
        assert!(bars <= CHART_ROWS);
        assert!(text.contains(&"#".repeat(CHART_WIDTH)));
    }

    #[test]
    fn serializes_to_json() {
        let json = serde_json::to_value(report(vec![0.5])).unwrap();

        assert_eq!(json["losses"], serde_json::json!([0.5]));
        assert_eq!(json["table"][1]["sales"], serde_json::json!(20.0));
        assert_eq!(json["predictions"].as_array().unwrap().len(), 2);
        assert_eq!(json["sales_scaler"]["max"], serde_json::json!(20.0));
    }
}
