#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::tables::namespace_for;
use crate::core::types::ErrorCategory;
use crate::core::workflow::metadata::WorkflowMetadata;
use std::path::{Path, PathBuf};

/// Longest name fragment kept in a synthesized filename.
pub const MAX_NAME_CHARS: usize = 20;

/// Keep ASCII alphanumerics only, then truncate.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_NAME_CHARS)
        .collect()
}

/// `{index:04}_{namespace}_{name}_{category}_Enhanced.json`
pub fn synthesize_filename(metadata: &WorkflowMetadata, category: &str, index: u32) -> String {
    let namespace = namespace_for(category);
    let name = sanitize_name(metadata.name.as_deref().unwrap_or("Workflow"));
    format!("{index:04}_{namespace}_{name}_{category}_Enhanced.json")
}

/// Where a transformed document lands under the target root.
pub fn target_path(target_root: &Path, namespace: &str, filename: &str) -> PathBuf {
    target_root.join("workflows").join(namespace).join(filename)
}

/// Run-wide filename counter.
///
/// Seeded above any numbering already used in the target catalogue and
/// advanced once per processed document, regardless of category.
#[derive(Debug, Clone)]
pub struct FilenameSequence {
    current: u32,
}

impl FilenameSequence {
    pub fn new(seed: u32) -> Self {
        Self { current: seed }
    }

    /// Advance and return the next index; the first call yields `seed + 1`.
    ///
    /// Fails without advancing once the counter has reached `u32::MAX`.
    pub fn next_index(&mut self) -> Result<u32, AppError> {
        self.current = self.current.checked_add(1).ok_or_else(|| {
            AppError::new(
                ErrorCategory::TransformError,
                format!("filename index exhausted after {}", self.current),
            )
            .with_suggestion("Run with a lower --seed")
        })?;
        Ok(self.current)
    }

    pub fn current(&self) -> u32 {
        self.current
    }
}
