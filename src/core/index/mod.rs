#![allow(clippy::result_large_err)]

//! Searchable catalogue built from every metadata document in a tree.

use crate::core::discovery::DiscoveryFeed;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::core::workflow::metadata::WorkflowMetadata;
use crate::core::workflow::schema::{load_workflow, read_json};
use crate::core::workflow::trigger::{classify_trigger, TriggerKind};
use crate::utils::serialization::{
    CompactJsonSerializer, FileSerializer, FileUtils, JsonSerializer,
};
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Component, Path, PathBuf};

pub const INDEX_VERSION: &str = "1.0.0";
const UNCATEGORIZED: &str = "Uncategorized";
const GENERAL: &str = "General";
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
    pub subcategories: Vec<NamedCount>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCounts {
    pub beginner: usize,
    pub intermediate: usize,
    pub advanced: usize,
}

impl DifficultyCounts {
    fn bump(&mut self, difficulty: &str) {
        match difficulty {
            "beginner" => self.beginner += 1,
            "intermediate" => self.intermediate += 1,
            "advanced" => self.advanced += 1,
            _ => {}
        }
    }
}

/// One workflow as presented to catalogue consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub subcategory: String,
    pub difficulty: String,
    pub tags: Value,
    pub integrations: Value,
    pub trigger_type: String,
    pub setup_time: String,
    pub cost: Value,
    pub version: String,
    pub author: Value,
    pub last_updated: String,
    pub file_url: String,
    pub metadata_url: String,
    pub use_case: String,
    pub features: Value,
    pub requirements: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueIndex {
    pub version: String,
    pub generated_at: String,
    pub total_workflows: usize,
    pub categories: Vec<CategorySummary>,
    pub popular_tags: Vec<TagCount>,
    pub integrations: Vec<NamedCount>,
    pub difficulties: DifficultyCounts,
    pub workflows: Vec<CatalogueEntry>,
}

/// Builds a [`CatalogueIndex`] from a discovery feed.
pub struct CatalogueBuilder<'a> {
    feed: &'a DiscoveryFeed,
    popular_tag_limit: usize,
}

impl<'a> CatalogueBuilder<'a> {
    pub fn new(feed: &'a DiscoveryFeed, popular_tag_limit: usize) -> Self {
        Self {
            feed,
            popular_tag_limit,
        }
    }

    pub fn build(&self) -> Result<CatalogueIndex, AppError> {
        self.build_at(Utc::now())
    }

    pub fn build_at(&self, now: DateTime<Utc>) -> Result<CatalogueIndex, AppError> {
        let files = self.feed.metadata_files()?;
        tracing::info!(count = files.len(), "indexing metadata files");

        let mut entries = Vec::new();
        let mut categories: IndexMap<String, IndexMap<String, usize>> = IndexMap::new();
        let mut tags: IndexMap<String, usize> = IndexMap::new();
        let mut integrations: IndexMap<String, usize> = IndexMap::new();
        let mut difficulties = DifficultyCounts::default();

        for path in &files {
            let value = match read_json(path) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(path = %path.display(), "skipping metadata: {}", err);
                    continue;
                }
            };
            let metadata = WorkflowMetadata::from_value(&value);
            let entry = self.entry(path, &metadata, now);

            *categories
                .entry(entry.category.clone())
                .or_default()
                .entry(entry.subcategory.clone())
                .or_default() += 1;
            for tag in metadata.tag_list() {
                *tags.entry(tag).or_default() += 1;
            }
            for integration in metadata.integration_list() {
                *integrations.entry(integration).or_default() += 1;
            }
            if let Some(difficulty) = metadata.difficulty.as_deref() {
                difficulties.bump(&difficulty.to_lowercase());
            }
            entries.push(entry);
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut category_list: Vec<CategorySummary> = categories
            .into_iter()
            .map(|(name, subs)| CategorySummary {
                count: subs.values().sum(),
                subcategories: by_count_desc(subs)
                    .into_iter()
                    .map(|(name, count)| NamedCount { name, count })
                    .collect(),
                name,
            })
            .collect();
        category_list.sort_by(|a, b| b.count.cmp(&a.count));

        let popular_tags = by_count_desc(tags)
            .into_iter()
            .take(self.popular_tag_limit)
            .map(|(tag, count)| TagCount { tag, count })
            .collect();

        Ok(CatalogueIndex {
            version: INDEX_VERSION.to_string(),
            generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            total_workflows: entries.len(),
            categories: category_list,
            popular_tags,
            integrations: by_count_desc(integrations)
                .into_iter()
                .map(|(name, count)| NamedCount { name, count })
                .collect(),
            difficulties,
            workflows: entries,
        })
    }

    fn entry(&self, path: &Path, metadata: &WorkflowMetadata, now: DateTime<Utc>) -> CatalogueEntry {
        let options = self.feed.options();
        let workflow_path = options.workflow_path_for(path).unwrap_or_else(|| path.to_path_buf());
        let id = workflow_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        CatalogueEntry {
            id,
            name: metadata.name.clone().unwrap_or_default(),
            description: metadata.description.clone().unwrap_or_default(),
            category: metadata
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            subcategory: metadata
                .subcategory
                .clone()
                .unwrap_or_else(|| GENERAL.to_string()),
            difficulty: metadata
                .difficulty
                .as_deref()
                .map(str::to_lowercase)
                .unwrap_or_else(|| "intermediate".to_string()),
            tags: metadata.tags.clone().unwrap_or_else(|| json!([])),
            integrations: metadata.integrations.clone().unwrap_or_else(|| json!([])),
            trigger_type: metadata
                .trigger_type
                .clone()
                .unwrap_or_else(|| sibling_trigger(&workflow_path).to_string()),
            setup_time: metadata
                .estimated_setup_time
                .clone()
                .or_else(|| metadata.estimated_time.clone())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            cost: metadata
                .pricing
                .as_ref()
                .and_then(|p| p.get("estimatedMonthlyCost"))
                .filter(|c| !c.is_null())
                .cloned()
                .unwrap_or_else(|| Value::from(UNKNOWN)),
            version: metadata
                .version
                .clone()
                .unwrap_or_else(|| INDEX_VERSION.to_string()),
            author: metadata.author.clone().unwrap_or_else(|| Value::from(UNKNOWN)),
            last_updated: metadata
                .last_updated
                .clone()
                .unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
            file_url: self.url_for(&workflow_path),
            metadata_url: self.url_for(path),
            use_case: metadata
                .use_case
                .clone()
                .or_else(|| metadata.description.clone())
                .unwrap_or_default(),
            features: flatten_features(metadata.features.as_ref()),
            requirements: metadata.requirements.clone().unwrap_or_else(|| json!([])),
        }
    }

    /// Root-relative URL that includes the root directory name, e.g.
    /// `/workflows/ecommerce/orders/sync.json`.
    fn url_for(&self, path: &Path) -> String {
        let root = self.feed.root();
        let mut parts: Vec<String> = root
            .file_name()
            .map(|n| vec![n.to_string_lossy().into_owned()])
            .unwrap_or_default();
        if let Ok(relative) = path.strip_prefix(root) {
            parts.extend(relative.components().filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            }));
        }
        format!("/{}", parts.join("/"))
    }
}

/// `workflow-index.json` → `workflow-index.min.json`.
pub fn minified_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "index".to_string());
    output.with_file_name(format!("{}.min.json", stem))
}

/// Write the pretty index and, when asked, its single-line twin. Returns
/// the paths written.
pub fn write_index(
    index: &CatalogueIndex,
    output: &Path,
    minified: bool,
) -> Result<Vec<PathBuf>, AppError> {
    let to_app_error = |path: &Path, err: anyhow::Error| {
        AppError::new(
            ErrorCategory::IoError,
            format!("failed to write {}: {:#}", path.display(), err),
        )
    };

    FileUtils
        .save_to_file(output, index, &JsonSerializer)
        .map_err(|err| to_app_error(output, err))?;
    let mut written = vec![output.to_path_buf()];

    if minified {
        let compact = minified_path(output);
        FileUtils
            .save_to_file(&compact, index, &CompactJsonSerializer)
            .map_err(|err| to_app_error(&compact, err))?;
        written.push(compact);
    }
    for path in &written {
        tracing::info!(path = %path.display(), workflows = index.total_workflows, "index written");
    }
    Ok(written)
}

/// Trigger kind of the workflow next to a metadata file; manual when it
/// cannot be read.
fn sibling_trigger(workflow_path: &Path) -> TriggerKind {
    match load_workflow(workflow_path) {
        Ok(workflow) => classify_trigger(&workflow),
        Err(_) => TriggerKind::Manual,
    }
}

/// Arrays are kept; object maps are reduced to their values.
fn flatten_features(features: Option<&Value>) -> Value {
    match features {
        Some(Value::Array(items)) => Value::Array(items.clone()),
        Some(Value::Object(map)) => Value::Array(map.values().cloned().collect()),
        _ => json!([]),
    }
}

/// Stable sort by count, highest first; ties keep first-seen order.
fn by_count_desc(counts: IndexMap<String, usize>) -> Vec<(String, usize)> {
    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs
}
