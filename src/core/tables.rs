//! Fixed rule tables shared by validation and integration passes.
//!
//! Both tables are plain data with an explicit fallback, never branching logic.
//! They are process-wide constants and are never mutated at runtime.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace used when a business category has no mapping.
pub const DEFAULT_NAMESPACE: &str = "Automation";

/// Business category to caphe-workflows integration namespace.
pub const CATEGORY_NAMESPACES: &[(&str, &str)] = &[
    ("content-media", "Openai"),
    ("customer-service", "Slack"),
    ("data-analytics", "Googlesheets"),
    ("ecommerce", "Shopify"),
    ("education", "Notion"),
    ("finance-accounting", "Quickbooks"),
    ("general-utilities", "Automation"),
    ("healthcare", "Automation"),
    ("human-resources", "Gmail"),
    ("it-development", "Github"),
    ("marketing-sales", "Hubspot"),
    ("operations-logistics", "Airtable"),
];

/// Difficulty levels accepted by the metadata contract.
pub const VALID_DIFFICULTIES: &[&str] = &["beginner", "intermediate", "advanced"];

/// Difficulty to priority. `expert` is not a valid metadata difficulty but older
/// documents still carry it.
pub const DIFFICULTY_PRIORITIES: &[(&str, Priority)] = &[
    ("beginner", Priority::Low),
    ("intermediate", Priority::Medium),
    ("advanced", Priority::High),
    ("expert", Priority::High),
];

/// Target-platform priority derived from difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

/// Categories accepted by the metadata contract, in table order.
pub fn valid_categories() -> impl Iterator<Item = &'static str> {
    CATEGORY_NAMESPACES.iter().map(|(category, _)| *category)
}

pub fn is_valid_category(category: &str) -> bool {
    valid_categories().any(|known| known == category)
}

pub fn is_valid_difficulty(difficulty: &str) -> bool {
    VALID_DIFFICULTIES.contains(&difficulty)
}

/// Resolve the integration namespace for a business category.
pub fn namespace_for(category: &str) -> &'static str {
    CATEGORY_NAMESPACES
        .iter()
        .find(|(known, _)| *known == category)
        .map(|(_, namespace)| *namespace)
        .unwrap_or(DEFAULT_NAMESPACE)
}

/// Resolve the priority for a difficulty, ignoring case.
pub fn priority_for(difficulty: &str) -> Priority {
    let difficulty = difficulty.to_lowercase();
    DIFFICULTY_PRIORITIES
        .iter()
        .find(|(known, _)| *known == difficulty)
        .map(|(_, priority)| *priority)
        .unwrap_or_default()
}

/// Ordered copy of the category table, as embedded in integration reports.
pub fn category_mapping() -> IndexMap<String, String> {
    CATEGORY_NAMESPACES
        .iter()
        .map(|(category, namespace)| (category.to_string(), namespace.to_string()))
        .collect()
}

/// Render an enumeration the way validation messages quote it.
pub fn format_allowed<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    let quoted: Vec<String> = values.into_iter().map(|v| format!("'{}'", v)).collect();
    format!("[{}]", quoted.join(", "))
}
