//! Terminal progress display fed by assignment events

use crate::algorithm::completion::FillProgress;
use crate::algorithm::scheduler::{FillState, RunSummary};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::spatial::cell::Assignment;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static FILL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("[{{elapsed_precise}}] {{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the cells of one mosaic
pub struct ProgressManager {
    bar: ProgressBar,
    label: String,
}

impl ProgressManager {
    /// Bar starting from the given fill level
    pub fn new(label: &str, progress: FillProgress) -> Self {
        let bar = ProgressBar::new(progress.total as u64);
        bar.set_style(FILL_STYLE.clone());
        bar.set_position(progress.filled as u64);
        bar.set_message(label.to_string());
        Self {
            bar,
            label: label.to_string(),
        }
    }

    /// Bar that draws nothing, for quiet runs
    pub fn hidden(progress: FillProgress) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(progress.total as u64);
        bar.set_position(progress.filled as u64);
        Self {
            bar,
            label: String::new(),
        }
    }

    /// Account for one filled cell and show it as the latest fill
    pub fn observe(&self, assignment: &Assignment) {
        self.bar.inc(1);
        self.bar.set_message(format!(
            "{} ({}, {})",
            self.label, assignment.row, assignment.col
        ));
    }

    /// Text shown next to the bar
    pub fn message(&self) -> String {
        self.bar.message()
    }

    /// Cells counted so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with a message matching how the run ended
    pub fn finish(&self, summary: &RunSummary) {
        self.bar.set_position(summary.progress.filled as u64);
        // Finishing jumps the bar to its length, so partial runs are abandoned
        match summary.state {
            FillState::Complete => {
                self.bar
                    .finish_with_message(format!("{} ✓ complete", self.label));
            }
            FillState::Stopped => self.bar.abandon_with_message(format!(
                "{} stopped, {} cells left",
                self.label,
                summary.progress.remaining()
            )),
            FillState::Running => self
                .bar
                .abandon_with_message(format!("{} interrupted", self.label)),
        }
    }
}
