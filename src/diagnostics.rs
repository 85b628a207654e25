//! Non-fatal diagnostic reporting.

use tracing::warn;

/// Fire-and-forget sink for parse diagnostics. Reporting never aborts
/// construction; fatal errors travel through `Result` instead.
#[cfg_attr(test, mockall::automock)]
pub trait DiagnosticSink {
    fn report(&self, message: &str);
}

/// Default sink forwarding diagnostics to the tracing output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, message: &str) {
        warn!("{message}");
    }
}
