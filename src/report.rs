//! Reporting seam for the pipeline.
//!
//! Components take a `&dyn Reporter` instead of logging through process
//! globals, so each phase can be tested with a recording reporter.

/// Progress and diagnostics sink for one build run.
pub trait Reporter {
    /// Per-file progress.
    fn info(&self, msg: &str);
    /// Suspicious but non-fatal conditions (e.g. a config key overwrite).
    fn warn(&self, msg: &str);
    /// Individual errors reported before a phase fails.
    fn error(&self, msg: &str);
    /// Phase summaries ("Assembled N scripts").
    fn lifecycle(&self, msg: &str);
}

/// Default reporter, forwards to the `tracing` macros.
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn lifecycle(&self, msg: &str) {
        // Summaries are always worth surfacing, same level as progress.
        tracing::info!("{msg}");
    }
}

/// Discards everything. Handy in tests that only care about results.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
    fn lifecycle(&self, _msg: &str) {}
}
