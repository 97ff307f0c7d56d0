use crate::core::discovery::{DiscoveredWorkflow, DiscoveryFeed};
use crate::core::error::AppError;
use crate::core::report::{DocumentSink, RunReporter, ValidationOutcome, ValidationReport};
use crate::core::validation::{
    classify, validate_metadata, validate_workflow_file, Finding, FindingSeverity,
    ValidationRegistry, ValidationStatus,
};
use crate::core::workflow::schema::read_json;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Sequential validation pass over every workflow the feed yields.
pub struct ValidationRun<'a> {
    feed: &'a DiscoveryFeed,
    registry: ValidationRegistry,
}

impl<'a> ValidationRun<'a> {
    pub fn new(feed: &'a DiscoveryFeed) -> Self {
        Self {
            feed,
            registry: ValidationRegistry::new(),
        }
    }

    /// Validate everything and build the aggregate report.
    ///
    /// Only a missing or unreadable root fails the run; every per-document
    /// problem becomes an outcome.
    pub fn execute(&self) -> Result<ValidationReport, AppError> {
        let workflows = self.feed.workflows()?;
        tracing::info!(
            root = %self.feed.root().display(),
            count = workflows.len(),
            "validating workflows"
        );

        let mut reporter = RunReporter::new();
        for workflow in &workflows {
            reporter.record(self.check(workflow));
        }

        Ok(ValidationReport::build(
            &reporter,
            self.feed.root().to_path_buf(),
            Utc::now().to_rfc3339(),
        ))
    }

    /// Validate, then persist the report at `report_path`.
    pub fn execute_and_persist(
        &self,
        sink: &dyn DocumentSink,
        report_path: &Path,
    ) -> Result<ValidationReport, AppError> {
        let report = self.execute()?;
        persist_report(sink, report_path, &report)?;
        Ok(report)
    }

    fn check(&self, workflow: &DiscoveredWorkflow) -> ValidationOutcome {
        let name = workflow.name();
        let workflow_findings = validate_workflow_file(&workflow.workflow_path);

        let (status, findings) = if !workflow_findings.is_empty() {
            (classify(&workflow_findings, None), workflow_findings)
        } else {
            match workflow.metadata_path.as_deref() {
                None => (
                    ValidationStatus::MissingMetadata,
                    vec![missing_metadata_finding(
                        &self.feed.options().metadata_path_for(&workflow.workflow_path),
                    )],
                ),
                Some(path) => {
                    let metadata_findings = self.check_metadata(path);
                    (classify(&[], Some(&metadata_findings)), metadata_findings)
                }
            }
        };

        match status {
            ValidationStatus::Valid => {
                tracing::info!(category = %workflow.category, workflow = %name, "valid")
            }
            ValidationStatus::MissingMetadata => {
                tracing::warn!(category = %workflow.category, workflow = %name, "missing metadata")
            }
            ValidationStatus::InvalidMetadata => {
                for finding in &findings {
                    tracing::warn!(
                        category = %workflow.category,
                        workflow = %name,
                        code = %finding.code,
                        "{}",
                        finding.message
                    );
                }
            }
            ValidationStatus::InvalidWorkflow => {
                for finding in &findings {
                    tracing::error!(
                        category = %workflow.category,
                        workflow = %name,
                        code = %finding.code,
                        "{}",
                        finding.message
                    );
                }
            }
        }

        ValidationOutcome {
            workflow: name,
            category: workflow.category.clone(),
            location: workflow.location.clone(),
            workflow_path: workflow.workflow_path.clone(),
            metadata_path: workflow.metadata_path.clone(),
            status,
            findings,
        }
    }

    fn check_metadata(&self, path: &Path) -> Vec<Finding> {
        match read_json(path) {
            Ok(value) => self.registry.validate(&value),
            Err(err) => vec![Finding::error("META-000", err.to_string(), None)
                .with_suggestion("fix the JSON syntax of the metadata file")],
        }
    }
}

fn missing_metadata_finding(expected: &Path) -> Finding {
    let file = expected
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Finding::new(
        "META-006",
        FindingSeverity::Warning,
        format!("Missing metadata file: {}", file),
        Some(file),
        Some("run `caphe fix` to scaffold one".to_string()),
    )
}

/// Serialize a report and hand it to the sink, replacing any previous run.
pub(crate) fn persist_report<T: serde::Serialize>(
    sink: &dyn DocumentSink,
    path: &Path,
    report: &T,
) -> Result<(), AppError> {
    let value = serde_json::to_value(report)?;
    sink.write_json(path, &value)?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}

/// Validate a single metadata file outside a run.
pub fn validate_metadata_file(path: &Path) -> Vec<Finding> {
    match read_json(path) {
        Ok(value) => validate_metadata(&value),
        Err(err) => vec![Finding::error("META-000", err.to_string(), None)],
    }
}

/// Where the validation report lands when no explicit path is given.
pub fn default_report_path(source_dir: &Path, report_file: &str) -> PathBuf {
    source_dir
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .join(report_file)
}
