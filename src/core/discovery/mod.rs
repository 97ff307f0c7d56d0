#![allow(clippy::result_large_err)]

//! File-discovery feed pairing workflow documents with their sidecar metadata.

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Naming convention for sidecar metadata and which files to ignore.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Appended to the workflow stem: `lead-scoring` → `lead-scoring-metadata.json`.
    pub metadata_suffix: String,
    /// File names never treated as workflows.
    pub skip_files: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            metadata_suffix: "-metadata".to_string(),
            skip_files: vec!["metadata-template.json".to_string()],
        }
    }
}

impl DiscoveryOptions {
    fn metadata_file_suffix(&self) -> String {
        format!("{}.json", self.metadata_suffix)
    }

    /// Sibling metadata path for a workflow file, whether or not it exists.
    pub fn metadata_path_for(&self, workflow: &Path) -> PathBuf {
        let stem = workflow
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        workflow.with_file_name(format!("{}{}", stem, self.metadata_file_suffix()))
    }

    /// Workflow path for a metadata file, `None` if it does not follow the convention.
    pub fn workflow_path_for(&self, metadata: &Path) -> Option<PathBuf> {
        let name = metadata.file_name()?.to_str()?;
        let stem = name.strip_suffix(&self.metadata_file_suffix())?;
        Some(metadata.with_file_name(format!("{}.json", stem)))
    }

    fn is_metadata_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(&self.metadata_file_suffix()))
    }

    fn is_skipped(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| self.skip_files.iter().any(|skip| skip == n))
    }
}

/// One workflow found under the source root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredWorkflow {
    pub workflow_path: PathBuf,
    /// `None` when the sibling metadata document does not exist.
    pub metadata_path: Option<PathBuf>,
    /// First directory below the root: the business category.
    pub category: String,
    /// Second directory below the root, empty when the file sits in the category directory.
    pub subcategory: String,
    /// Full relative directory, used for display.
    pub location: String,
}

impl DiscoveredWorkflow {
    /// Workflow file stem.
    pub fn name(&self) -> String {
        self.workflow_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn has_metadata(&self) -> bool {
        self.metadata_path.is_some()
    }
}

/// Scans a directory tree for workflow/metadata pairs.
pub struct DiscoveryFeed {
    root: PathBuf,
    options: DiscoveryOptions,
}

impl DiscoveryFeed {
    pub fn new(root: impl Into<PathBuf>, options: DiscoveryOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &DiscoveryOptions {
        &self.options
    }

    /// Every workflow document below the root, sorted by path.
    ///
    /// Metadata files, skipped names and files directly in the root are
    /// ignored. Workflows without a sibling metadata file are still returned.
    pub fn workflows(&self) -> Result<Vec<DiscoveredWorkflow>, AppError> {
        let mut found = Vec::new();
        for path in self.json_files()? {
            if self.options.is_skipped(&path) || self.options.is_metadata_file(&path) {
                continue;
            }
            if path.parent() == Some(self.root.as_path()) {
                continue;
            }
            let metadata = self.options.metadata_path_for(&path);
            let metadata_path = metadata.is_file().then_some(metadata);
            found.push(self.describe(path, metadata_path));
        }
        Ok(found)
    }

    /// Workflows that have both a metadata file and an existing workflow
    /// sibling, found by scanning for metadata files. Pairs directly in the
    /// root have no category and are ignored.
    pub fn paired(&self) -> Result<Vec<DiscoveredWorkflow>, AppError> {
        let mut found = Vec::new();
        for path in self.json_files()? {
            if !self.options.is_metadata_file(&path) {
                continue;
            }
            if path.parent() == Some(self.root.as_path()) {
                continue;
            }
            let Some(workflow) = self.options.workflow_path_for(&path) else {
                continue;
            };
            if workflow.is_file() {
                found.push(self.describe(workflow, Some(path)));
            }
        }
        Ok(found)
    }

    /// Every metadata file below the root, sorted by path.
    pub fn metadata_files(&self) -> Result<Vec<PathBuf>, AppError> {
        Ok(self
            .json_files()?
            .into_iter()
            .filter(|path| self.options.is_metadata_file(path) && !self.options.is_skipped(path))
            .collect())
    }

    fn json_files(&self) -> Result<Vec<PathBuf>, AppError> {
        if !self.root.is_dir() {
            return Err(AppError::new(
                ErrorCategory::DiscoveryError,
                format!("Workflows directory not found: {}", self.root.display()),
            ));
        }
        let pattern = format!(
            "{}/**/*.json",
            glob::Pattern::escape(&self.root.to_string_lossy())
        );
        let entries = glob::glob(&pattern).map_err(|err| {
            AppError::new(
                ErrorCategory::DiscoveryError,
                format!("invalid discovery pattern {}: {}", pattern, err),
            )
        })?;

        let mut files = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => files.push(path),
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(path = %err.path().display(), "skipping unreadable entry: {}", err);
                }
            }
        }
        files.sort();
        Ok(files)
    }

    fn describe(&self, workflow_path: PathBuf, metadata_path: Option<PathBuf>) -> DiscoveredWorkflow {
        let relative_dir: Vec<String> = workflow_path
            .strip_prefix(&self.root)
            .ok()
            .and_then(Path::parent)
            .map(|dir| {
                dir.components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        DiscoveredWorkflow {
            category: relative_dir.first().cloned().unwrap_or_default(),
            subcategory: relative_dir.get(1).cloned().unwrap_or_default(),
            location: relative_dir.join("/"),
            workflow_path,
            metadata_path,
        }
    }
}
