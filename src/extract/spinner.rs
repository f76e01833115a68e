use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use bbox_extractor::pipeline::FOUND_MESSAGE;
use bbox_extractor::Logger;

/// Terminal spinner showing the match count and the latest progress line.
pub struct SpinnerLogger {
    bar: ProgressBar,
}

impl SpinnerLogger {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} found | {msg}")?,
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        Ok(Self { bar })
    }

    /// Handle for finishing the spinner after the logger was moved.
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }
}

impl Logger for SpinnerLogger {
    fn log(&self, message: &str) {
        if message == FOUND_MESSAGE {
            self.bar.inc(1);
        } else {
            self.bar.set_message(message.to_string());
        }
    }
}
