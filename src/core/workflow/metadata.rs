use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields every metadata document must carry, in reporting order.
pub const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "description",
    "category",
    "subcategory",
    "useCase",
    "difficulty",
    "estimatedTime",
    "prerequisites",
    "tags",
    "author",
    "version",
    "featured",
];

/// The only required field allowed to hold a falsy value.
pub const BOOLEAN_FLAG_FIELD: &str = "featured";

/// Fields that must be JSON arrays.
pub const SEQUENCE_FIELDS: &[&str] = &["tags", "prerequisites"];

/// Lenient typed view over a sidecar metadata document.
///
/// Validation runs on the raw JSON; this view is what the transformer and the
/// catalogue index read, so every field is optional and loosely typed where
/// real documents disagree (authors are strings or objects, features are
/// arrays or maps).
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub use_case: Option<String>,
    pub difficulty: Option<String>,
    pub estimated_time: Option<String>,
    pub estimated_setup_time: Option<String>,
    pub prerequisites: Option<Value>,
    pub tags: Option<Value>,
    pub author: Option<Value>,
    pub version: Option<String>,
    pub featured: Option<bool>,
    pub trigger_type: Option<String>,
    pub features: Option<Value>,
    pub limitations: Option<Value>,
    pub requirements: Option<Value>,
    pub integrations: Option<Value>,
    pub pricing: Option<Value>,
    pub last_updated: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkflowMetadata {
    /// Build the view from raw JSON. Fields with an unexpected JSON type are
    /// dropped rather than failing the whole document.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
        let any = |key: &str| object.get(key).filter(|v| !v.is_null()).cloned();

        let known: &[&str] = &[
            "name",
            "description",
            "category",
            "subcategory",
            "useCase",
            "difficulty",
            "estimatedTime",
            "estimatedSetupTime",
            "prerequisites",
            "tags",
            "author",
            "version",
            "featured",
            "triggerType",
            "features",
            "limitations",
            "requirements",
            "integrations",
            "pricing",
            "lastUpdated",
        ];
        let extra = object
            .iter()
            .filter(|(key, _)| !known.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        WorkflowMetadata {
            name: text("name"),
            description: text("description"),
            category: text("category"),
            subcategory: text("subcategory"),
            use_case: text("useCase"),
            difficulty: text("difficulty"),
            estimated_time: text("estimatedTime"),
            estimated_setup_time: text("estimatedSetupTime"),
            prerequisites: any("prerequisites"),
            tags: any("tags"),
            author: any("author"),
            version: object.get("version").and_then(version_text),
            featured: object.get("featured").and_then(Value::as_bool),
            trigger_type: text("triggerType"),
            features: any("features"),
            limitations: any("limitations"),
            requirements: any("requirements"),
            integrations: any("integrations"),
            pricing: any("pricing"),
            last_updated: text("lastUpdated"),
            extra,
        }
    }

    /// Tags as strings; non-string entries are skipped.
    pub fn tag_list(&self) -> Vec<String> {
        string_items(self.tags.as_ref())
    }

    pub fn integration_list(&self) -> Vec<String> {
        string_items(self.integrations.as_ref())
    }
}

fn version_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
