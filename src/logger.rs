//! Notification sink handed to the extraction pipeline.

use tracing::info;

/// Receives human-readable status lines.
///
/// Implementors own timestamping and the destination. Closures taking a
/// `&str` qualify, which keeps test collectors one-liners.
pub trait Logger {
    fn log(&self, message: &str);
}

impl<F> Logger for F
where
    F: Fn(&str),
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// Forwards notifications to `tracing` at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        info!("{}", message);
    }
}
