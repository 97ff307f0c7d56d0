//! Per-document outcomes and the aggregate reports persisted after each run.

use crate::core::validation::{Finding, FindingSeverity, ValidationStatus};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod sink;
pub use sink::{DocumentSink, FsSink};

/// `"{:.1}%"` of successes over total, `"0%"` when nothing was processed.
pub fn success_rate(successes: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", successes as f64 / total as f64 * 100.0)
}

/// Something a run records per document.
pub trait Outcome {
    fn category(&self) -> &str;
    fn succeeded(&self) -> bool;
}

/// Result of validating one workflow and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub workflow: String,
    pub category: String,
    pub location: String,
    pub workflow_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_path: Option<PathBuf>,
    pub status: ValidationStatus,
    pub findings: Vec<Finding>,
}

impl ValidationOutcome {
    /// Human-readable errors in the order they were found; empty when valid.
    pub fn errors(&self) -> Vec<String> {
        self.findings
            .iter()
            .filter(|f| f.severity == FindingSeverity::Error)
            .map(|f| f.message.clone())
            .collect()
    }
}

impl Outcome for ValidationOutcome {
    fn category(&self) -> &str {
        &self.category
    }

    fn succeeded(&self) -> bool {
        self.status == ValidationStatus::Valid
    }
}

/// Result of integrating one workflow into the target catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationOutcome {
    pub success: bool,
    pub source_workflow: PathBuf,
    pub source_metadata: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_file: Option<PathBuf>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IntegrationOutcome {
    pub fn failed(
        source_workflow: PathBuf,
        source_metadata: PathBuf,
        category: &str,
        error: impl ToString,
    ) -> Self {
        Self {
            success: false,
            source_workflow,
            source_metadata,
            target_file: None,
            category: category.to_string(),
            integration_category: None,
            workflow_name: None,
            error: Some(error.to_string()),
        }
    }
}

impl Outcome for IntegrationOutcome {
    fn category(&self) -> &str {
        &self.category
    }

    fn succeeded(&self) -> bool {
        self.success
    }
}

/// Accumulates outcomes keyed by category, in the order categories first appear.
#[derive(Debug, Clone)]
pub struct RunReporter<T> {
    by_category: IndexMap<String, Vec<T>>,
    total: usize,
    successful: usize,
}

impl<T> Default for RunReporter<T> {
    fn default() -> Self {
        Self {
            by_category: IndexMap::new(),
            total: 0,
            successful: 0,
        }
    }
}

impl<T: Outcome + Clone> RunReporter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: T) {
        self.total += 1;
        if outcome.succeeded() {
            self.successful += 1;
        }
        self.by_category
            .entry(outcome.category().to_string())
            .or_default()
            .push(outcome);
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn successful(&self) -> usize {
        self.successful
    }

    pub fn failed(&self) -> usize {
        self.total - self.successful
    }

    pub fn success_rate(&self) -> String {
        success_rate(self.successful, self.total)
    }

    pub fn category_breakdown(&self) -> &IndexMap<String, Vec<T>> {
        &self.by_category
    }

    /// All outcomes, grouped by category.
    pub fn outcomes(&self) -> Vec<T> {
        self.by_category.values().flatten().cloned().collect()
    }
}

/// Exit policy shared by both runs: errors fail, warnings do not.
pub trait RunSummary {
    fn error_count(&self) -> usize;
    fn warning_count(&self) -> usize;

    fn exit_code(&self) -> i32 {
        if self.error_count() > 0 {
            1
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_workflows: usize,
    pub valid: usize,
    pub missing_metadata: usize,
    pub invalid_metadata: usize,
    pub invalid_workflow: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub completion_rate: String,
}

/// Persisted aggregate of a validation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub date: String,
    pub source_dir: PathBuf,
    pub summary: ValidationSummary,
    pub category_breakdown: IndexMap<String, Vec<ValidationOutcome>>,
    pub results: Vec<ValidationOutcome>,
}

impl ValidationReport {
    pub fn build(reporter: &RunReporter<ValidationOutcome>, source_dir: PathBuf, date: String) -> Self {
        let results = reporter.outcomes();
        let count = |status: ValidationStatus| results.iter().filter(|o| o.status == status).count();
        let total_errors = results
            .iter()
            .filter(|o| o.status.severity() == Some(FindingSeverity::Error))
            .map(|o| o.findings.len())
            .sum();

        let summary = ValidationSummary {
            total_workflows: reporter.total(),
            valid: count(ValidationStatus::Valid),
            missing_metadata: count(ValidationStatus::MissingMetadata),
            invalid_metadata: count(ValidationStatus::InvalidMetadata),
            invalid_workflow: count(ValidationStatus::InvalidWorkflow),
            total_errors,
            total_warnings: count(ValidationStatus::MissingMetadata),
            completion_rate: reporter.success_rate(),
        };

        Self {
            date,
            source_dir,
            summary,
            category_breakdown: reporter.category_breakdown().clone(),
            results,
        }
    }

    /// Outcomes with a given status, in report order.
    pub fn with_status(&self, status: ValidationStatus) -> impl Iterator<Item = &ValidationOutcome> {
        self.results.iter().filter(move |o| o.status == status)
    }
}

impl RunSummary for ValidationReport {
    fn error_count(&self) -> usize {
        self.summary.total_errors
    }

    fn warning_count(&self) -> usize {
        self.summary.total_warnings
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationResults {
    pub total_processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub category_breakdown: IndexMap<String, Vec<IntegrationOutcome>>,
    pub results: Vec<IntegrationOutcome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSummary {
    pub total_workflows: usize,
    pub successful_integrations: usize,
    pub failed_integrations: usize,
    pub success_rate: String,
}

/// Persisted aggregate of an integration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationReport {
    pub date: String,
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub category_mapping: IndexMap<String, String>,
    pub results: IntegrationResults,
    pub summary: IntegrationSummary,
}

impl IntegrationReport {
    pub fn build(
        reporter: &RunReporter<IntegrationOutcome>,
        source_dir: PathBuf,
        target_dir: PathBuf,
        category_mapping: IndexMap<String, String>,
        date: String,
    ) -> Self {
        Self {
            date,
            source_dir,
            target_dir,
            category_mapping,
            results: IntegrationResults {
                total_processed: reporter.total(),
                successful: reporter.successful(),
                failed: reporter.failed(),
                category_breakdown: reporter.category_breakdown().clone(),
                results: reporter.outcomes(),
            },
            summary: IntegrationSummary {
                total_workflows: reporter.total(),
                successful_integrations: reporter.successful(),
                failed_integrations: reporter.failed(),
                success_rate: reporter.success_rate(),
            },
        }
    }

    /// Distinct namespaces that received at least one document.
    pub fn namespaces_used(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for outcome in self.results.results.iter().filter(|o| o.success) {
            if let Some(ns) = outcome.integration_category.as_deref() {
                if !seen.contains(&ns) {
                    seen.push(ns);
                }
            }
        }
        seen
    }
}

impl RunSummary for IntegrationReport {
    fn error_count(&self) -> usize {
        self.results.failed
    }

    fn warning_count(&self) -> usize {
        0
    }
}
