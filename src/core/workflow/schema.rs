#![allow(clippy::result_large_err)] // Loader APIs return AppError to keep file context for run reports.

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while reading a JSON document from disk.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Error reading file: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DocumentError {
    pub fn path(&self) -> &Path {
        match self {
            DocumentError::Read { path, .. } | DocumentError::Parse { path, .. } => path,
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        let category = match err {
            DocumentError::Read { .. } => ErrorCategory::IoError,
            DocumentError::Parse { .. } => ErrorCategory::ParseError,
        };
        AppError::new(category, err.to_string()).at_path(err.path())
    }
}

/// Read any JSON file into an untyped value.
pub fn read_json(path: &Path) -> Result<Value, DocumentError> {
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| DocumentError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// One step of a workflow, kept as the raw field map.
///
/// Only `type` and `name` drive any decision, and both read as `""` when
/// absent or not a string. Every field is carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Node {
    fields: Map<String, Value>,
}

impl Node {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn name(&self) -> &str {
        self.str_field("name")
    }

    pub fn node_type(&self) -> &str {
        self.str_field("type")
    }

    /// Case-insensitive substring match against the node type.
    pub fn type_contains(&self, needle: &str) -> bool {
        self.node_type().to_lowercase().contains(needle)
    }

    pub fn name_contains(&self, needle: &str) -> bool {
        self.name().to_lowercase().contains(needle)
    }

    fn str_field(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or("")
    }
}

/// Declarative workflow definition as exported by the source editor.
///
/// `nodes` and `connections` stay optional here: a document lacking them is
/// structurally invalid for validation, but the transformer defaults them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct WorkflowDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub nodes: Option<Vec<Node>>,
    #[serde(default)]
    pub connections: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(rename = "staticData", default, skip_serializing_if = "Option::is_none")]
    pub static_data: Option<Value>,
    #[serde(rename = "pinData", default, skip_serializing_if = "Option::is_none")]
    pub pin_data: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkflowDocument {
    /// Load a workflow document from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let value = read_json(path)?;
        Self::from_value(value).map_err(|err| {
            AppError::new(
                ErrorCategory::ParseError,
                format!("failed to parse workflow {}: {}", path.display(), err),
            )
        })
    }

    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Nodes in document order, empty when the document has none.
    pub fn node_list(&self) -> &[Node] {
        self.nodes.as_deref().unwrap_or(&[])
    }
}

pub fn load_workflow(path: &Path) -> Result<WorkflowDocument, AppError> {
    WorkflowDocument::load_from_file(path)
}
