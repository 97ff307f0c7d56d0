//! Contract checks for metadata documents and structural checks for workflow
//! documents.
//!
//! Metadata checks never stop early: every registered rule runs and all of
//! their findings are returned together, so one pass reports everything wrong
//! with a document.

use crate::core::workflow::schema::{read_json, DocumentError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

pub mod rules;
pub use rules::*;

/// How serious a finding is for the run's exit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingSeverity {
    Error,
    Warning,
}

impl fmt::Display for FindingSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingSeverity::Error => write!(f, "Error"),
            FindingSeverity::Warning => write!(f, "Warning"),
        }
    }
}

/// A single problem found in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub code: String,
    pub severity: FindingSeverity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Finding {
    pub fn new(
        code: impl Into<String>,
        severity: FindingSeverity,
        message: impl Into<String>,
        location: Option<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            location,
            suggestion,
        }
    }

    pub fn error(code: &str, message: impl Into<String>, location: Option<&str>) -> Self {
        Self::new(
            code,
            FindingSeverity::Error,
            message,
            location.map(str::to_string),
            None,
        )
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A contract rule applied to one metadata object.
pub trait MetadataRule {
    fn check(&self, metadata: &Map<String, Value>) -> Vec<Finding>;
}

/// Runs every built-in metadata rule in a fixed order.
pub struct ValidationRegistry {
    rules: Vec<Box<dyn MetadataRule>>,
}

impl ValidationRegistry {
    pub fn new() -> Self {
        Self {
            rules: built_in_rules(),
        }
    }

    /// Validate a metadata document, accumulating findings from every rule.
    pub fn validate(&self, metadata: &Value) -> Vec<Finding> {
        let Some(object) = metadata.as_object() else {
            return vec![Finding::error(
                "META-000",
                "Metadata must be a JSON object",
                None,
            )];
        };
        self.rules
            .iter()
            .flat_map(|rule| rule.check(object))
            .collect()
    }
}

impl Default for ValidationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate one metadata document against the fixed field contract.
pub fn validate_metadata(metadata: &Value) -> Vec<Finding> {
    ValidationRegistry::new().validate(metadata)
}

/// Check the minimal structural contract of a parsed workflow document.
pub fn validate_workflow(workflow: &Value) -> Vec<Finding> {
    let has = |key: &str| workflow.as_object().is_some_and(|o| o.contains_key(key));
    let mut findings = Vec::new();
    if !has("nodes") {
        findings.push(
            Finding::error("WF-001", "Missing 'nodes' array", Some("nodes"))
                .with_suggestion("export the workflow with its node list"),
        );
    }
    if !has("connections") {
        findings.push(
            Finding::error("WF-002", "Missing 'connections' object", Some("connections"))
                .with_suggestion("export the workflow with its connection map"),
        );
    }
    findings
}

/// Structural validation from raw text. Unparseable input yields exactly one
/// finding and no field checks.
pub fn validate_workflow_text(text: &str) -> Vec<Finding> {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => validate_workflow(&value),
        Err(err) => vec![Finding::error("WF-003", format!("Invalid JSON: {}", err), None)],
    }
}

/// Structural validation of a workflow file. Read and parse failures are
/// reported as a single finding.
pub fn validate_workflow_file(path: &Path) -> Vec<Finding> {
    match read_json(path) {
        Ok(value) => validate_workflow(&value),
        Err(err) => vec![document_finding(&err)],
    }
}

/// Convert a document loading failure into the single finding it produces.
pub fn document_finding(err: &DocumentError) -> Finding {
    Finding::error("WF-003", err.to_string(), None)
}

/// Classification tag for one workflow in a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Valid,
    MissingMetadata,
    InvalidMetadata,
    InvalidWorkflow,
}

impl ValidationStatus {
    /// Missing metadata is recoverable; the two invalid states are errors.
    pub fn severity(self) -> Option<FindingSeverity> {
        match self {
            ValidationStatus::Valid => None,
            ValidationStatus::MissingMetadata => Some(FindingSeverity::Warning),
            ValidationStatus::InvalidMetadata | ValidationStatus::InvalidWorkflow => {
                Some(FindingSeverity::Error)
            }
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Valid => write!(f, "valid"),
            ValidationStatus::MissingMetadata => write!(f, "missing-metadata"),
            ValidationStatus::InvalidMetadata => write!(f, "invalid-metadata"),
            ValidationStatus::InvalidWorkflow => write!(f, "invalid-workflow"),
        }
    }
}

/// Apply the classification policy. Structural workflow failures take
/// precedence and suppress metadata checks entirely.
pub fn classify(
    workflow_findings: &[Finding],
    metadata_findings: Option<&[Finding]>,
) -> ValidationStatus {
    if !workflow_findings.is_empty() {
        return ValidationStatus::InvalidWorkflow;
    }
    match metadata_findings {
        None => ValidationStatus::MissingMetadata,
        Some(findings) if !findings.is_empty() => ValidationStatus::InvalidMetadata,
        Some(_) => ValidationStatus::Valid,
    }
}
