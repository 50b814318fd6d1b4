//! Spinner fed by search progress notifications

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use routelab_routing::{Progress, SearchObserver};
use tracing::debug;

/// Creates a spinner on stderr; indicatif hides it when stderr is not a terminal
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub struct SearchSpinner {
    pb: ProgressBar,
    runs_finished: usize,
}

impl SearchSpinner {
    pub fn new(message: &str) -> Self {
        Self {
            pb: create_spinner(message),
            runs_finished: 0,
        }
    }

    /// Current spinner message
    pub fn message(&self) -> String {
        self.pb.message()
    }

    pub fn finish(&self) {
        debug!(runs = self.runs_finished, last = %self.message(), "search progress finished");
        self.pb.finish_and_clear();
    }
}

impl SearchObserver for SearchSpinner {
    fn on_progress(&mut self, progress: Progress) {
        if progress.finished {
            self.runs_finished += 1;
            self.pb.set_message(format!(
                "run {} done, {} nodes explored",
                self.runs_finished, progress.explored
            ));
        } else {
            self.pb.set_message(format!(
                "{} nodes settled, {} queued",
                progress.explored, progress.frontier_len
            ));
        }
    }
}
