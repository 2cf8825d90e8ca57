//! Project root discovery.
//!
//! The scaffolding needs a stable way to locate the repository root so the
//! layout checks and the CLI can resolve paths without an installation
//! step. [`project_root`] derives the root from this crate's own manifest
//! location; [`discover_root`] walks upward from an arbitrary directory
//! until it finds the workspace manifest.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while resolving the project root
#[derive(Error, Debug)]
pub enum ProjectError {
    /// No workspace manifest was found in any ancestor directory
    #[error("No workspace manifest found above '{start}'")]
    RootNotFound { start: String },

    /// A candidate manifest could not be parsed
    #[error("Failed to parse manifest '{path}': {reason}")]
    ManifestUnreadable { path: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

/// Return the project root path.
///
/// The root is the parent of this crate's directory, following the
/// convention that the scaffolding lives one level below the repository
/// root. The path is computed fresh on every call and is not validated
/// against the filesystem.
pub fn project_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

/// Walk upward from `start` until a directory contains a `Cargo.toml`
/// declaring a `[workspace]` table, and return that directory.
///
/// Member manifests along the way are skipped, so discovery works from any
/// subdirectory of the repository.
pub fn discover_root(start: &Path) -> ProjectResult<PathBuf> {
    for dir in start.ancestors() {
        let manifest = dir.join("Cargo.toml");
        if manifest.is_file() && is_workspace_manifest(&manifest)? {
            debug!(root = %dir.display(), "workspace root discovered");
            return Ok(dir.to_path_buf());
        }
    }

    Err(ProjectError::RootNotFound {
        start: start.display().to_string(),
    })
}

fn is_workspace_manifest(path: &Path) -> ProjectResult<bool> {
    let raw = fs::read_to_string(path)?;
    let manifest: toml::Value =
        raw.parse()
            .map_err(|e: toml::de::Error| ProjectError::ManifestUnreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

    Ok(manifest.get("workspace").is_some())
}
