use super::{Finding, MetadataRule};
use crate::core::tables::{
    format_allowed, is_valid_category, is_valid_difficulty, valid_categories, VALID_DIFFICULTIES,
};
use crate::core::workflow::metadata::{BOOLEAN_FLAG_FIELD, REQUIRED_FIELDS, SEQUENCE_FIELDS};
use serde_json::{Map, Value};

pub fn built_in_rules() -> Vec<Box<dyn MetadataRule>> {
    vec![
        Box::new(RequiredFieldsRule),
        Box::new(DifficultyEnumRule),
        Box::new(CategoryEnumRule),
        Box::new(SequenceFieldsRule),
    ]
}

/// JSON falsiness: null, empty string/array/object, zero and `false`.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Strings are quoted in messages by their raw text, anything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

struct RequiredFieldsRule;

impl MetadataRule for RequiredFieldsRule {
    fn check(&self, metadata: &Map<String, Value>) -> Vec<Finding> {
        let mut out = Vec::new();
        for &field in REQUIRED_FIELDS {
            match metadata.get(field) {
                None => out.push(
                    Finding::error(
                        "META-001",
                        format!("Missing required field: {}", field),
                        Some(field),
                    )
                    .with_suggestion(format!("add a '{}' entry", field)),
                ),
                Some(value) if field != BOOLEAN_FLAG_FIELD && is_empty_value(value) => out.push(
                    Finding::error(
                        "META-002",
                        format!("Empty value for required field: {}", field),
                        Some(field),
                    )
                    .with_suggestion(format!("give '{}' a non-empty value", field)),
                ),
                Some(_) => {}
            }
        }
        out
    }
}

struct DifficultyEnumRule;

impl MetadataRule for DifficultyEnumRule {
    fn check(&self, metadata: &Map<String, Value>) -> Vec<Finding> {
        let Some(value) = metadata.get("difficulty") else {
            return Vec::new();
        };
        if value.as_str().is_some_and(is_valid_difficulty) {
            return Vec::new();
        }
        vec![Finding::error(
            "META-003",
            format!(
                "Invalid difficulty: {}. Must be one of {}",
                display_value(value),
                format_allowed(VALID_DIFFICULTIES.iter().copied())
            ),
            Some("difficulty"),
        )
        .with_suggestion("difficulty is case-sensitive; run `caphe fix` to lower-case it")]
    }
}

struct CategoryEnumRule;

impl MetadataRule for CategoryEnumRule {
    fn check(&self, metadata: &Map<String, Value>) -> Vec<Finding> {
        let Some(value) = metadata.get("category") else {
            return Vec::new();
        };
        if value.as_str().is_some_and(is_valid_category) {
            return Vec::new();
        }
        vec![Finding::error(
            "META-004",
            format!(
                "Invalid category: {}. Must be one of {}",
                display_value(value),
                format_allowed(valid_categories())
            ),
            Some("category"),
        )
        .with_suggestion("use the lower-case directory name of the business category")]
    }
}

struct SequenceFieldsRule;

impl MetadataRule for SequenceFieldsRule {
    fn check(&self, metadata: &Map<String, Value>) -> Vec<Finding> {
        SEQUENCE_FIELDS
            .iter()
            .copied()
            .filter(|field| metadata.get(*field).is_some_and(|v| !v.is_array()))
            .map(|field| {
                Finding::error("META-005", format!("{} must be a list", field), Some(field))
            })
            .collect()
    }
}
