//! Line counting and periodic progress messages.

/// Default number of lines between two progress notifications.
pub const DEFAULT_REPORT_EVERY: u64 = 100_000;

/// Notification sent for each feature written to the output.
pub const FOUND_MESSAGE: &str = "Found a polygon.";

/// Per-run line counter driving the progress cadence.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    lines: u64,
    report_every: u64,
}

impl Progress {
    /// `report_every` of zero is treated as one.
    pub fn new(report_every: u64) -> Self {
        Self {
            lines: 0,
            report_every: report_every.max(1),
        }
    }

    /// Count one line. Returns true when a progress report is due.
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.lines += 1;
        self.lines % self.report_every == 0
    }

    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Progress message for the current count, given how far into the
    /// source the reader is.
    pub fn message(&self, position: u64, total: u64) -> String {
        let fraction = if total == 0 {
            1.0
        } else {
            position.min(total) as f64 / total as f64
        };
        format!(
            "Processed {} features, {:.1}% done.",
            group_thousands(self.lines),
            fraction * 100.0
        )
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_EVERY)
    }
}

/// Format with `,` as thousands separator, independent of locale.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
