use crate::env::EnvSnapshot;
use crate::layout::LayoutContract;
use crate::project::project_root;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Check not found: {name}")]
    NotFound { name: String },

    #[error("Check '{name}' could not run: {reason}")]
    Aborted { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CheckResult<T> = Result<T, CheckError>;

/// Status of a single sanity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => write!(f, "pass"),
            CheckStatus::Fail => write!(f, "fail"),
        }
    }
}

/// Result of one executed check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Check name
    pub name: String,
    /// Pass or fail
    pub status: CheckStatus,
    /// Optional human-readable detail
    pub detail: Option<String>,
}

impl CheckOutcome {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Pass,
            detail: None,
        }
    }

    pub fn pass_with(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Pass,
            detail: Some(detail.into()),
        }
    }

    pub fn fail(name: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: CheckStatus::Fail,
            detail: Some(detail.into()),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == CheckStatus::Pass
    }
}

/// Shared input for checks.
#[derive(Debug, Clone)]
pub struct CheckContext {
    /// Project root the checks run against
    pub root: PathBuf,
}

impl CheckContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Context rooted at this repository's own root.
    pub fn for_project() -> Self {
        Self::new(project_root())
    }
}

#[async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    async fn run(&self, ctx: &CheckContext) -> CheckResult<CheckOutcome>;
}

/// Ordered collection of checks.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRegistry {
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Register a check.
    ///
    /// Registering under a name that is already present replaces the
    /// earlier registration; the registry never holds two checks with the
    /// same name.
    pub fn register(&mut self, check: Box<dyn Check>) {
        if let Some(existing) = self
            .checks
            .iter_mut()
            .find(|existing| existing.name() == check.name())
        {
            *existing = check;
        } else {
            self.checks.push(check);
        }
    }

    pub fn get_check(&self, name: &str) -> Option<&dyn Check> {
        self.checks
            .iter()
            .find(|check| check.name() == name)
            .map(|check| check.as_ref())
    }

    pub fn list_checks(&self) -> Vec<&str> {
        self.checks.iter().map(|check| check.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run a single check by name.
    pub async fn run(&self, name: &str, ctx: &CheckContext) -> CheckResult<CheckOutcome> {
        match self.get_check(name) {
            Some(check) => check.run(ctx).await,
            None => Err(CheckError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Run every registered check in registration order.
    ///
    /// A check that returns an error is folded into a failed outcome: the
    /// report does not distinguish an IO failure from a failed assertion.
    pub async fn run_all(&self, ctx: &CheckContext) -> CheckReport {
        let started_at = Utc::now();
        let mut outcomes = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            let outcome = match check.run(ctx).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(check = check.name(), error = %e, "check errored");
                    CheckOutcome::fail(check.name(), e.to_string())
                }
            };
            debug!(check = check.name(), status = %outcome.status, "check finished");
            outcomes.push(outcome);
        }

        CheckReport {
            started_at,
            outcomes,
        }
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Report for a full registry run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Outcomes in registration order
    pub outcomes: Vec<CheckOutcome>,
}

impl CheckReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::passed)
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.passed())
            .map(|outcome| outcome.name.as_str())
            .collect()
    }
}

/// Confirms the scaffolding crate is linked and callable.
pub struct LinkageCheck;

impl LinkageCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LinkageCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Check for LinkageCheck {
    fn name(&self) -> &str {
        "linkage"
    }

    fn description(&self) -> &str {
        "Confirm the scaffolding crate is linked and callable"
    }

    async fn run(&self, _ctx: &CheckContext) -> CheckResult<CheckOutcome> {
        Ok(CheckOutcome::pass_with(
            self.name(),
            format!("testkit {}", env!("CARGO_PKG_VERSION")),
        ))
    }
}

/// Verifies the repository layout contract against the context root.
pub struct LayoutCheck {
    contract: LayoutContract,
}

impl LayoutCheck {
    pub fn new() -> Self {
        Self {
            contract: LayoutContract::default(),
        }
    }

    pub fn with_contract(contract: LayoutContract) -> Self {
        Self { contract }
    }
}

impl Default for LayoutCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Check for LayoutCheck {
    fn name(&self) -> &str {
        "layout"
    }

    fn description(&self) -> &str {
        "Verify required files and directories exist under the project root"
    }

    async fn run(&self, ctx: &CheckContext) -> CheckResult<CheckOutcome> {
        let report = self.contract.check(&ctx.root);

        if report.is_complete() {
            Ok(CheckOutcome::pass_with(
                self.name(),
                format!("{} entries present", report.present.len()),
            ))
        } else {
            Ok(CheckOutcome::fail(
                self.name(),
                format!("missing: {}", report.missing_summary()),
            ))
        }
    }
}

/// Smoke-checks the async execution plumbing.
///
/// The awaited future resumes immediately with a fixed value; the check
/// exercises suspension and resumption, not concurrency.
pub struct RuntimeCheck;

impl RuntimeCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RuntimeCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Check for RuntimeCheck {
    fn name(&self) -> &str {
        "runtime"
    }

    fn description(&self) -> &str {
        "Confirm async execution resumes with the expected value"
    }

    async fn run(&self, _ctx: &CheckContext) -> CheckResult<CheckOutcome> {
        let resumed = std::future::ready(true).await;

        if resumed {
            Ok(CheckOutcome::pass(self.name()))
        } else {
            Ok(CheckOutcome::fail(
                self.name(),
                "ready future resumed with an unexpected value",
            ))
        }
    }
}

/// Verifies the process environment behaves like a key-value mapping.
///
/// No specific variable is required to be present or absent; an empty
/// environment passes.
pub struct EnvironmentCheck;

impl EnvironmentCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvironmentCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Check for EnvironmentCheck {
    fn name(&self) -> &str {
        "environment"
    }

    fn description(&self) -> &str {
        "Confirm the process environment behaves like a key-value mapping"
    }

    async fn run(&self, _ctx: &CheckContext) -> CheckResult<CheckOutcome> {
        let snapshot = EnvSnapshot::capture();

        let membership_agrees = snapshot
            .names()
            .iter()
            .all(|name| snapshot.contains(name) && snapshot.get(name).is_some());
        let iteration_agrees = snapshot.iter().count() == snapshot.len();

        if membership_agrees && iteration_agrees {
            Ok(CheckOutcome::pass_with(
                self.name(),
                format!("{} variables", snapshot.len()),
            ))
        } else {
            Ok(CheckOutcome::fail(
                self.name(),
                "environment mapping is inconsistent",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn scratch_context() -> (tempfile::TempDir, CheckContext) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = CheckContext::new(dir.path());
        (dir, ctx)
    }

    #[tokio::test]
    async fn test_linkage_check_passes() {
        let (_dir, ctx) = scratch_context();
        let outcome = LinkageCheck::new().run(&ctx).await.unwrap();

        assert!(outcome.passed());
        assert!(outcome.detail.unwrap().contains("testkit"));
    }

    #[tokio::test]
    async fn test_runtime_check_passes() {
        let (_dir, ctx) = scratch_context();
        let outcome = RuntimeCheck::new().run(&ctx).await.unwrap();

        assert!(outcome.passed());
        assert_eq!(outcome.status, CheckStatus::Pass);
    }

    #[tokio::test]
    #[serial_test::serial]
    async fn test_environment_check_passes() {
        let (_dir, ctx) = scratch_context();
        let outcome = EnvironmentCheck::new().run(&ctx).await.unwrap();

        assert!(outcome.passed());
        assert!(outcome.detail.unwrap().contains("variables"));
    }

    #[tokio::test]
    async fn test_layout_check_reports_missing_entries() {
        let (dir, ctx) = scratch_context();
        fs::write(dir.path().join("Cargo.toml"), "[workspace]\n").unwrap();

        let outcome = LayoutCheck::new().run(&ctx).await.unwrap();

        assert!(!outcome.passed());
        let detail = outcome.detail.unwrap();
        assert!(detail.contains("README.md"));
        assert!(detail.contains("scripts"));
    }

    #[tokio::test]
    async fn test_layout_check_passes_on_complete_tree() {
        let (dir, ctx) = scratch_context();
        fs::write(dir.path().join("README.md"), "# scratch\n").unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[workspace]\n").unwrap();
        fs::create_dir(dir.path().join("scripts")).unwrap();

        let outcome = LayoutCheck::new().run(&ctx).await.unwrap();
        assert!(outcome.passed());
    }

    #[tokio::test]
    async fn test_registry_runs_in_registration_order() {
        let (_dir, ctx) = scratch_context();

        let mut registry = CheckRegistry::new();
        registry.register(Box::new(RuntimeCheck::new()));
        registry.register(Box::new(LinkageCheck::new()));

        assert_eq!(registry.list_checks(), vec!["runtime", "linkage"]);

        let report = registry.run_all(&ctx).await;
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].name, "runtime");
        assert_eq!(report.outcomes[1].name, "linkage");
        assert!(report.all_passed());
    }

    #[tokio::test]
    async fn test_registry_lookup_and_run_by_name() {
        let (_dir, ctx) = scratch_context();

        let mut registry = CheckRegistry::new();
        registry.register(Box::new(LinkageCheck::new()));

        assert!(registry.get_check("linkage").is_some());
        assert!(registry.get_check("nonexistent").is_none());

        let outcome = registry.run("linkage", &ctx).await.unwrap();
        assert!(outcome.passed());

        let missing = registry.run("nonexistent", &ctx).await;
        assert!(matches!(missing, Err(CheckError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_registration_replaces() {
        let mut registry = CheckRegistry::new();
        registry.register(Box::new(LayoutCheck::new()));
        registry.register(Box::new(LayoutCheck::with_contract(
            LayoutContract::empty(),
        )));

        assert_eq!(registry.len(), 1);

        // The surviving registration is the second one: an empty contract
        // passes even against an empty directory.
        let (_dir, ctx) = scratch_context();
        let outcome = registry.run("layout", &ctx).await.unwrap();
        assert!(outcome.passed());
    }

    #[tokio::test]
    async fn test_failed_outcomes_are_collected() {
        let (_dir, ctx) = scratch_context();

        let mut registry = CheckRegistry::new();
        registry.register(Box::new(LinkageCheck::new()));
        registry.register(Box::new(LayoutCheck::new()));

        let report = registry.run_all(&ctx).await;
        assert!(!report.all_passed());
        assert_eq!(report.failed_names(), vec!["layout"]);
    }

    #[test]
    fn test_report_serializes() {
        let report = CheckReport {
            started_at: Utc::now(),
            outcomes: vec![
                CheckOutcome::pass("linkage"),
                CheckOutcome::fail("layout", "missing: README.md"),
            ],
        };

        let json = serde_json::to_string(&report).unwrap();
        let deserialized: CheckReport = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.outcomes.len(), 2);
        assert_eq!(deserialized.failed_names(), vec!["layout"]);
    }
}
