//! Library surface of the sanity-check CLI.
//!
//! Keeps registry assembly and report handling out of `main.rs` so they
//! can be unit tested.

use testkit::{
    CheckRegistry, CheckReport, EnvironmentCheck, LayoutCheck, LinkageCheck, RuntimeCheck,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    /// One or more sanity checks failed
    #[error("{failed} of {total} sanity checks failed: {names}")]
    ChecksFailed {
        failed: usize,
        total: usize,
        names: String,
    },
}

/// Build the default registry: the four project sanity checks.
pub fn default_registry() -> CheckRegistry {
    let mut registry = CheckRegistry::new();
    registry.register(Box::new(LinkageCheck::new()));
    registry.register(Box::new(LayoutCheck::new()));
    registry.register(Box::new(RuntimeCheck::new()));
    registry.register(Box::new(EnvironmentCheck::new()));
    registry
}

/// Render a report for terminal output.
pub fn render_report(report: &CheckReport) -> String {
    let mut out = String::new();

    for outcome in &report.outcomes {
        let marker = if outcome.passed() { "✓" } else { "✗" };
        out.push_str(marker);
        out.push(' ');
        out.push_str(&outcome.name);
        if let Some(detail) = &outcome.detail {
            out.push_str(&format!(" ({})", detail));
        }
        out.push('\n');
    }

    out
}

/// Convert a finished report into the CLI result.
pub fn report_result(report: &CheckReport) -> Result<(), HarnessError> {
    let failed = report.failed_names();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(HarnessError::ChecksFailed {
            failed: failed.len(),
            total: report.outcomes.len(),
            names: failed.join(", "),
        })
    }
}
