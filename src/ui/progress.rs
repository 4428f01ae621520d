use crate::ui::theme;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

const BAR_TEMPLATE: &str = "{prefix} [{bar:30}] {pos}/{len} {wide_msg}";

/// Progress bar over the planned query sequence.
///
/// Hidden when stdout is not a terminal.
pub struct QueryProgress {
    pb: ProgressBar,
}

impl QueryProgress {
    pub fn new(total_queries: usize) -> Self {
        let pb = if console::Term::stdout().is_term() {
            ProgressBar::new(total_queries as u64)
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            pb.set_style(style.progress_chars("=> "));
        }
        pb.set_prefix("Running search queries");
        Self { pb }
    }

    pub fn hidden() -> Self {
        Self { pb: ProgressBar::hidden() }
    }

    /// Show which query is in flight
    pub fn start_query(&self, label: &str) {
        self.pb.set_message(label.to_string());
    }

    pub fn finish_query(&self) {
        self.pb.inc(1);
    }

    /// Print a line above the bar without tearing it
    pub fn note_failure(&self, label: &str) {
        self.pb
            .println(format!("  {} {}", "failed:".style(theme().warn.clone()), label));
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    pub fn position(&self) -> u64 {
        self.pb.position()
    }
}
