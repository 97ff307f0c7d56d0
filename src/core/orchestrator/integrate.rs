use super::validate::persist_report;
use crate::core::discovery::{DiscoveredWorkflow, DiscoveryFeed};
use crate::core::error::AppError;
use crate::core::report::{DocumentSink, IntegrationOutcome, IntegrationReport, RunReporter};
use crate::core::tables::category_mapping;
use crate::core::transform::{synthesize_filename, target_path, transform, FilenameSequence};
use crate::core::types::ErrorCategory;
use crate::core::workflow::metadata::WorkflowMetadata;
use crate::core::workflow::schema::{read_json, WorkflowDocument};
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Sequential transform pass writing one target document per paired workflow.
pub struct IntegrationRun<'a> {
    feed: &'a DiscoveryFeed,
    sink: &'a dyn DocumentSink,
    target_dir: PathBuf,
    sequence: FilenameSequence,
}

impl<'a> IntegrationRun<'a> {
    pub fn new(
        feed: &'a DiscoveryFeed,
        sink: &'a dyn DocumentSink,
        target_dir: impl Into<PathBuf>,
        seed: u32,
    ) -> Self {
        Self {
            feed,
            sink,
            target_dir: target_dir.into(),
            sequence: FilenameSequence::new(seed),
        }
    }

    /// Transform every paired workflow. A failing document is recorded and
    /// the loop moves on.
    pub fn execute(&mut self) -> Result<IntegrationReport, AppError> {
        let workflows = self.feed.paired()?;
        for orphan in self
            .feed
            .workflows()?
            .into_iter()
            .filter(|w| !w.has_metadata())
        {
            tracing::warn!(
                category = %orphan.category,
                workflow = %orphan.name(),
                "skipping workflow without metadata"
            );
        }
        tracing::info!(
            source = %self.feed.root().display(),
            target = %self.target_dir.display(),
            count = workflows.len(),
            "integrating workflows"
        );

        let mut reporter = RunReporter::new();
        for workflow in &workflows {
            reporter.record(self.integrate_one(workflow));
        }

        let report = IntegrationReport::build(
            &reporter,
            self.feed.root().to_path_buf(),
            self.target_dir.clone(),
            category_mapping(),
            Utc::now().to_rfc3339(),
        );
        tracing::info!(
            successful = report.summary.successful_integrations,
            failed = report.summary.failed_integrations,
            rate = %report.summary.success_rate,
            "integration finished"
        );
        Ok(report)
    }

    /// Run and persist the report under the target directory.
    pub fn execute_and_persist(&mut self, report_file: &str) -> Result<IntegrationReport, AppError> {
        let report = self.execute()?;
        persist_report(self.sink, &self.target_dir.join(report_file), &report)?;
        Ok(report)
    }

    /// Highest index handed out so far.
    pub fn last_index(&self) -> u32 {
        self.sequence.current()
    }

    fn integrate_one(&mut self, workflow: &DiscoveredWorkflow) -> IntegrationOutcome {
        let metadata_path = workflow.metadata_path.clone().unwrap_or_default();
        match self.write_transformed(workflow, &metadata_path) {
            Ok(outcome) => {
                tracing::info!(
                    category = %workflow.category,
                    workflow = %workflow.name(),
                    target = ?outcome.target_file,
                    "integrated"
                );
                outcome
            }
            Err(err) => {
                tracing::error!(
                    category = %workflow.category,
                    workflow = %workflow.name(),
                    "integration failed: {}",
                    err.message
                );
                IntegrationOutcome::failed(
                    workflow.workflow_path.clone(),
                    metadata_path,
                    &workflow.category,
                    err.message,
                )
            }
        }
    }

    fn write_transformed(
        &mut self,
        workflow: &DiscoveredWorkflow,
        metadata_path: &Path,
    ) -> Result<IntegrationOutcome, AppError> {
        let index = self.sequence.next_index()?;
        let source = WorkflowDocument::load_from_file(&workflow.workflow_path)?;
        let metadata = WorkflowMetadata::from_value(&read_json(metadata_path)?);

        let document = transform(&source, &metadata, &workflow.category);
        let namespace = document.namespace();
        let filename = synthesize_filename(&metadata, &workflow.category, index);
        let target = target_path(&self.target_dir, namespace, &filename);

        let value = serde_json::to_value(&document).map_err(|err| {
            AppError::new(
                ErrorCategory::SerializationError,
                format!("failed to serialize {}: {}", filename, err),
            )
        })?;
        self.sink.write_json(&target, &value)?;

        Ok(IntegrationOutcome {
            success: true,
            source_workflow: workflow.workflow_path.clone(),
            source_metadata: metadata_path.to_path_buf(),
            target_file: Some(target),
            category: workflow.category.clone(),
            integration_category: Some(namespace.to_string()),
            workflow_name: Some(document.name),
            error: None,
        })
    }
}
