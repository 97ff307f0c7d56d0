#![allow(clippy::result_large_err)]

//! Metadata repair: normalizes casing, fills contract defaults and scaffolds
//! sidecar documents for workflows that have none.

use crate::core::discovery::{DiscoveredWorkflow, DiscoveryFeed};
use crate::core::error::AppError;
use crate::core::report::DocumentSink;
use crate::core::types::ErrorCategory;
use crate::core::workflow::schema::read_json;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::Path;

pub const DEFAULT_ESTIMATED_TIME: &str = "15-30 minutes";
pub const DEFAULT_PREREQUISITES: &[&str] = &["n8n account", "Basic workflow knowledge"];
pub const DEFAULT_DIFFICULTY: &str = "intermediate";
pub const DEFAULT_AUTHOR_NAME: &str = "n8n Team";
pub const DEFAULT_AUTHOR_URL: &str = "https://n8n.io";

/// Counts from one maintenance pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceSummary {
    pub fixed: usize,
    pub created: usize,
    pub failed: usize,
}

impl MaintenanceSummary {
    pub fn processed(&self) -> usize {
        self.fixed + self.created
    }
}

/// Lower-case `difficulty`; lower-case `category` and cut it at the first `/`.
pub fn normalize_metadata(metadata: &mut Map<String, Value>) {
    if let Some(Value::String(category)) = metadata.get_mut("category") {
        let head = category.split('/').next().unwrap_or_default();
        *category = head.trim().to_lowercase();
    }
    if let Some(Value::String(difficulty)) = metadata.get_mut("difficulty") {
        *difficulty = difficulty.to_lowercase();
    }
}

/// Add contract fields that have a sensible default. Present values are kept.
pub fn fill_defaults(metadata: &mut Map<String, Value>) {
    metadata
        .entry("estimatedTime")
        .or_insert_with(|| Value::from(DEFAULT_ESTIMATED_TIME));
    metadata
        .entry("prerequisites")
        .or_insert_with(|| json!(DEFAULT_PREREQUISITES));
    metadata
        .entry("featured")
        .or_insert(Value::Bool(false));
}

/// Complete metadata document for a workflow that has none.
pub fn scaffold_metadata(workflow_stem: &str, category: &str, subcategory: &str) -> Value {
    let stem_words = workflow_stem.replace('-', " ");
    let sub_words = subcategory.replace('-', " ");
    json!({
        "name": title_case(&stem_words),
        "description": format!("Automated workflow for {}", stem_words),
        "category": category,
        "subcategory": title_case(&sub_words),
        "useCase": format!("Automates {} processes", sub_words),
        "difficulty": DEFAULT_DIFFICULTY,
        "estimatedTime": DEFAULT_ESTIMATED_TIME,
        "prerequisites": DEFAULT_PREREQUISITES,
        "tags": [category, subcategory, "automation"],
        "author": {
            "name": DEFAULT_AUTHOR_NAME,
            "url": DEFAULT_AUTHOR_URL
        },
        "version": "1.0.0",
        "featured": false
    })
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Repairs every metadata file under a feed root and scaffolds missing ones.
pub struct MaintenancePass<'a> {
    feed: &'a DiscoveryFeed,
    sink: &'a dyn DocumentSink,
}

impl<'a> MaintenancePass<'a> {
    pub fn new(feed: &'a DiscoveryFeed, sink: &'a dyn DocumentSink) -> Self {
        Self { feed, sink }
    }

    pub fn execute(&self) -> Result<MaintenanceSummary, AppError> {
        let workflows = self.feed.workflows()?;
        let mut summary = MaintenanceSummary::default();

        for workflow in &workflows {
            let result = match workflow.metadata_path.as_deref() {
                Some(path) => self.fix(path).map(|_| summary.fixed += 1),
                None => self.create(workflow).map(|_| summary.created += 1),
            };
            if let Err(err) = result {
                summary.failed += 1;
                tracing::error!(
                    category = %workflow.category,
                    workflow = %workflow.name(),
                    "maintenance failed: {}",
                    err.message
                );
            }
        }

        tracing::info!(
            fixed = summary.fixed,
            created = summary.created,
            failed = summary.failed,
            "maintenance finished"
        );
        Ok(summary)
    }

    fn fix(&self, path: &Path) -> Result<(), AppError> {
        let value = read_json(path)?;
        let Value::Object(mut metadata) = value else {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                format!("{} is not a JSON object", path.display()),
            ));
        };
        normalize_metadata(&mut metadata);
        fill_defaults(&mut metadata);
        self.sink.write_json(path, &Value::Object(metadata))?;
        tracing::info!(path = %path.display(), "metadata fixed");
        Ok(())
    }

    fn create(&self, workflow: &DiscoveredWorkflow) -> Result<(), AppError> {
        read_json(&workflow.workflow_path)?;
        let subcategory = workflow
            .location
            .rsplit('/')
            .next()
            .unwrap_or(&workflow.category);
        let metadata = scaffold_metadata(&workflow.name(), &workflow.category, subcategory);
        let path = self
            .feed
            .options()
            .metadata_path_for(&workflow.workflow_path);
        self.sink.write_json(&path, &metadata)?;
        tracing::info!(path = %path.display(), "metadata created");
        Ok(())
    }
}
