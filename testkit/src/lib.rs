//! Project scaffolding and sanity checks for CEOAgent.
//!
//! The crate provides root discovery, a repository layout contract,
//! read-only environment access, and a small registry of sanity checks
//! that both the test suite and the `harness` CLI run.

pub mod checks;
pub mod env;
pub mod layout;
pub mod project;

pub use checks::{
    Check, CheckContext, CheckError, CheckOutcome, CheckRegistry, CheckReport, CheckResult,
    CheckStatus, EnvironmentCheck, LayoutCheck, LinkageCheck, RuntimeCheck,
};
pub use env::{EnvGuard, EnvSnapshot};
pub use layout::{LayoutContract, LayoutReport};
pub use project::{discover_root, project_root, ProjectError, ProjectResult};

/// Initialize logging for tests.
///
/// Safe to call from every test module; repeat calls are silently
/// deduplicated because only the first subscriber registration wins.
pub fn init_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
