//! Conversion of a source (workflow, metadata, category) triple into the
//! caphe-workflows document shape.
//!
//! The transform never fails on well-typed input: absent optional sections
//! are defaulted, not rejected. Callers that want rejection validate first.

use crate::core::tables::{namespace_for, priority_for, Priority};
use crate::core::workflow::metadata::WorkflowMetadata;
use crate::core::workflow::schema::{Node, WorkflowDocument};
use crate::core::workflow::trigger::{classify_trigger, TriggerKind};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

pub mod error_handling;
pub mod filename;
pub mod identity;

pub use error_handling::with_error_handling;
pub use filename::{synthesize_filename, target_path, FilenameSequence};

const DEFAULT_VERSION: &str = "1.0.0";
const DEFAULT_OWNER: &str = "caphe-user";
const DEFAULT_NAME: &str = "Imported Workflow";
const DEFAULT_DIFFICULTY: &str = "medium";
const DEFAULT_SETUP_TIME: &str = "30 minutes";
const LICENSE: &str = "MIT";
const STATUS_ACTIVE: &str = "active";
const ENVIRONMENT: &str = "production";

/// Settings applied when the source workflow carries none.
pub fn default_settings() -> Value {
    json!({
        "executionOrder": "v1",
        "saveManualExecutions": true,
        "callerPolicy": "workflowsFromSameOwner"
    })
}

/// Business-facing metadata embedded under `meta.business_metadata`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessMetadata {
    pub use_case: String,
    pub difficulty: String,
    pub estimated_setup_time: String,
    pub features: Value,
    pub limitations: Value,
    pub requirements: Value,
    pub tags: Value,
    pub integrations: Value,
    pub pricing: Value,
    pub last_updated: String,
}

/// The `meta` block of a transformed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformMeta {
    pub instance_id: String,
    pub version_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub owner: Value,
    pub license: String,
    pub category: String,
    pub subcategory: String,
    pub status: String,
    pub priority: Priority,
    pub environment: String,
    pub trigger_type: TriggerKind,
    #[serde(rename = "business_metadata")]
    pub business_metadata: BusinessMetadata,
}

/// Target-shaped workflow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformedDocument {
    pub meta: TransformMeta,
    pub nodes: Vec<Node>,
    pub connections: Map<String, Value>,
    pub name: String,
    pub settings: Value,
    pub tags: Value,
    pub active: bool,
    pub static_data: Value,
    pub pin_data: Value,
    pub version_id: u32,
}

impl TransformedDocument {
    /// Integration namespace this document is filed under.
    pub fn namespace(&self) -> &'static str {
        namespace_for(&self.meta.category)
    }
}

/// Transform using the current time for `createdAt`/`updatedAt`.
pub fn transform(
    workflow: &WorkflowDocument,
    metadata: &WorkflowMetadata,
    category: &str,
) -> TransformedDocument {
    transform_at(workflow, metadata, category, Utc::now())
}

/// Transform with an explicit clock. Every field other than the timestamps
/// (and the `lastUpdated` fallback) is a pure function of the inputs.
pub fn transform_at(
    workflow: &WorkflowDocument,
    metadata: &WorkflowMetadata,
    category: &str,
    now: DateTime<Utc>,
) -> TransformedDocument {
    let timestamp = now.to_rfc3339_opts(SecondsFormat::Micros, true);
    let tags = metadata.tags.clone().unwrap_or_else(|| json!([]));

    let meta = TransformMeta {
        instance_id: identity::instance_id(metadata.name.as_deref().unwrap_or_default()),
        version_id: metadata
            .version
            .clone()
            .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        created_at: timestamp.clone(),
        updated_at: timestamp,
        owner: metadata
            .author
            .clone()
            .unwrap_or_else(|| Value::from(DEFAULT_OWNER)),
        license: LICENSE.to_string(),
        category: category.to_string(),
        subcategory: metadata.subcategory.clone().unwrap_or_default(),
        status: STATUS_ACTIVE.to_string(),
        priority: priority_for(metadata.difficulty.as_deref().unwrap_or(DEFAULT_DIFFICULTY)),
        environment: ENVIRONMENT.to_string(),
        trigger_type: classify_trigger(workflow),
        business_metadata: business_metadata(metadata, tags.clone(), now),
    };

    TransformedDocument {
        meta,
        nodes: with_error_handling(workflow.node_list()),
        connections: workflow.connections.clone().unwrap_or_default(),
        name: metadata
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_NAME.to_string()),
        settings: workflow.settings.clone().unwrap_or_else(default_settings),
        tags,
        active: true,
        static_data: workflow.static_data.clone().unwrap_or_else(|| json!({})),
        pin_data: workflow.pin_data.clone().unwrap_or_else(|| json!({})),
        version_id: 1,
    }
}

fn business_metadata(metadata: &WorkflowMetadata, tags: Value, now: DateTime<Utc>) -> BusinessMetadata {
    let list = |value: &Option<Value>| value.clone().unwrap_or_else(|| json!([]));
    BusinessMetadata {
        use_case: metadata.use_case.clone().unwrap_or_default(),
        difficulty: metadata
            .difficulty
            .clone()
            .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
        estimated_setup_time: metadata
            .estimated_setup_time
            .clone()
            .or_else(|| metadata.estimated_time.clone())
            .unwrap_or_else(|| DEFAULT_SETUP_TIME.to_string()),
        features: list(&metadata.features),
        limitations: list(&metadata.limitations),
        requirements: list(&metadata.requirements),
        tags,
        integrations: list(&metadata.integrations),
        pricing: metadata.pricing.clone().unwrap_or_else(|| json!({})),
        last_updated: metadata
            .last_updated
            .clone()
            .unwrap_or_else(|| now.format("%Y-%m-%d").to_string()),
    }
}
