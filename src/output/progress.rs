use std::io::IsTerminal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for the scan phase.
///
/// Hidden in quiet mode or when stderr is not a TTY; rendered on stderr
/// so it never interferes with report output on stdout.
#[derive(Clone)]
pub struct ScanProgress {
    progress_bar: ProgressBar,
    counter: Arc<AtomicU64>,
}

impl ScanProgress {
    /// Creates a progress bar sized to the number of discovered files.
    ///
    /// # Panics
    /// Panics if the bar template is invalid; the template is a
    /// compile-time constant, so this should never happen.
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} Verifying [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%)",
                    )
                    .expect("valid template")
                    .progress_chars("█▓░"),
            );
            pb
        };

        Self {
            progress_bar,
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Sets the total once discovery knows how many files there are.
    pub fn set_total(&self, total: u64) {
        self.progress_bar.set_length(total);
    }

    /// Increments the counter by 1. Thread-safe for use from workers.
    pub fn inc(&self) {
        let count = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_position(count);
    }

    /// Finishes the bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
