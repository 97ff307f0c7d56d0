#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::utils::serialization::{FileSerializer, FileUtils, JsonSerializer};
use serde_json::Value;
use std::path::Path;

/// Storage for produced documents and reports.
///
/// Each write replaces whatever was stored at `path` before.
pub trait DocumentSink {
    fn write_json(&self, path: &Path, document: &Value) -> Result<(), AppError>;
}

/// Pretty-printed JSON files on the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl DocumentSink for FsSink {
    fn write_json(&self, path: &Path, document: &Value) -> Result<(), AppError> {
        FileUtils
            .save_to_file(path, document, &JsonSerializer)
            .map_err(|err| {
                AppError::new(
                    ErrorCategory::IoError,
                    format!("failed to write {}: {:#}", path.display(), err),
                )
            })
    }
}
