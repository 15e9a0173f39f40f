use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use machine_learning::training::Progress;

const BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} epochs";

/// Draws a progress bar on the terminal.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);

        match ProgressStyle::with_template(BAR_TEMPLATE) {
            Ok(style) => bar.set_style(style.progress_chars("=>-")),
            Err(e) => warn!("falling back to the default progress style: {e}"),
        }

        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn update(&mut self, done: usize, total: usize) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }

        self.bar.set_position(done as u64);
    }

    fn finish(&mut self) {
        self.bar.finish_and_clear();
    }
}

/// Logs the advance of the run every tenth of it, for non interactive runs.
#[derive(Debug, Default)]
pub struct LogProgress {
    last_decile: usize,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for LogProgress {
    fn update(&mut self, done: usize, total: usize) {
        let decile = done * 10 / total.max(1);

        if decile > self.last_decile {
            self.last_decile = decile;
            info!("epoch {done}/{total}");
        }
    }

    fn finish(&mut self) {
        self.last_decile = 0;
    }
}
