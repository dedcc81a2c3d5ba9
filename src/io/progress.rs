//! Progress display for solving one or many puzzle files

use crate::io::configuration::{PROGRESS_BAR_WIDTH, SPINNER_TICK_MS};
use crate::io::report::SolveStatus;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static SPINNER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Puzzles: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for batch solving
///
/// A batch bar appears when more than one file is queued; each file being
/// solved gets its own spinner that is replaced by its outcome when done.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bar: Option<ProgressBar>,
    file_name: String,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bar: None,
            file_name: String::new(),
        }
    }

    /// Prepare the display for the given number of files
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Show a spinner for a file being solved
    pub fn start_file(&mut self, path: &Path) {
        self.file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let spinner = self.multi_progress.add(ProgressBar::new_spinner());
        spinner.set_style(SPINNER_STYLE.clone());
        spinner.set_message(self.file_name.clone());
        spinner.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        self.file_bar = Some(spinner);
    }

    /// Replace the spinner with the file's outcome and advance the batch
    pub fn complete_file(&mut self, status: SolveStatus, elapsed: Duration) {
        if let Some(spinner) = self.file_bar.take() {
            let mark = if status == SolveStatus::Solved { "✓" } else { "✗" };
            spinner.finish_with_message(format!(
                "{mark} {} {status} in {elapsed:.2?}",
                self.file_name
            ));
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All puzzles processed");
        }
        let _ = self.multi_progress.clear();
    }
}
