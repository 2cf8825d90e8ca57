use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Files and directories a project root is expected to contain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutContract {
    /// Files that must exist under the root
    pub required_files: Vec<PathBuf>,
    /// Directories that must exist under the root
    pub required_dirs: Vec<PathBuf>,
}

impl Default for LayoutContract {
    fn default() -> Self {
        Self {
            required_files: vec![PathBuf::from("README.md"), PathBuf::from("Cargo.toml")],
            required_dirs: vec![PathBuf::from("scripts")],
        }
    }
}

impl LayoutContract {
    /// The contract this repository is expected to satisfy.
    pub fn new() -> Self {
        Self::default()
    }

    /// A contract with no requirements.
    pub fn empty() -> Self {
        Self {
            required_files: Vec::new(),
            required_dirs: Vec::new(),
        }
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.required_files.push(path.into());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.required_dirs.push(path.into());
        self
    }

    /// Check the contract against `root`.
    ///
    /// Missing entries are reported as data in the returned report; a
    /// missing file is not distinguished from any other unmet expectation.
    pub fn check(&self, root: &Path) -> LayoutReport {
        let mut present = Vec::new();
        let mut missing = Vec::new();

        for file in &self.required_files {
            if root.join(file).exists() {
                present.push(file.clone());
            } else {
                missing.push(file.clone());
            }
        }

        for dir in &self.required_dirs {
            if root.join(dir).is_dir() {
                present.push(dir.clone());
            } else {
                missing.push(dir.clone());
            }
        }

        LayoutReport {
            root: root.to_path_buf(),
            present,
            missing,
        }
    }
}

/// Outcome of checking a [`LayoutContract`] against a root directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutReport {
    /// Root the contract was checked against
    pub root: PathBuf,
    /// Entries that were found
    pub present: Vec<PathBuf>,
    /// Entries that were not found
    pub missing: Vec<PathBuf>,
}

impl LayoutReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Missing entries rendered for failure messages.
    pub fn missing_summary(&self) -> String {
        self.missing
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
