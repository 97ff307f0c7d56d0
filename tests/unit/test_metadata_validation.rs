use caphe::core::tables::valid_categories;
use caphe::core::validation::{validate_metadata, FindingSeverity};
use caphe::core::workflow::REQUIRED_FIELDS;
use serde_json::{json, Value};

fn valid() -> Value {
    json!({
        "name": "Lead Scoring",
        "description": "Score inbound leads",
        "category": "marketing-sales",
        "subcategory": "lead-management",
        "useCase": "Prioritize sales follow-up",
        "difficulty": "intermediate",
        "estimatedTime": "20 minutes",
        "prerequisites": ["HubSpot account"],
        "tags": ["crm", "leads"],
        "author": {"name": "Caphè"},
        "version": "1.2.0",
        "featured": false
    })
}

fn messages(doc: &Value) -> Vec<String> {
    validate_metadata(doc).into_iter().map(|f| f.message).collect()
}

#[test]
fn valid_document_has_no_findings() {
    assert!(validate_metadata(&valid()).is_empty());
}

#[test]
fn each_missing_field_is_reported_alone() {
    for field in REQUIRED_FIELDS {
        let mut doc = valid();
        doc.as_object_mut().unwrap().remove(*field);
        assert_eq!(
            messages(&doc),
            vec![format!("Missing required field: {}", field)],
            "removing {}",
            field
        );
    }
}

#[test]
fn three_missing_fields_give_three_errors() {
    let mut doc = valid();
    for field in ["description", "useCase", "version"] {
        doc.as_object_mut().unwrap().remove(field);
    }
    let findings = validate_metadata(&doc);
    assert_eq!(findings.len(), 3);
    assert!(findings.iter().all(|f| f.code == "META-001"));
    assert!(findings.iter().all(|f| f.severity == FindingSeverity::Error));
}

#[test]
fn every_listed_category_is_accepted() {
    for category in valid_categories() {
        let mut doc = valid();
        doc["category"] = json!(category);
        assert!(validate_metadata(&doc).is_empty(), "{}", category);
    }
}

#[test]
fn unknown_category_is_one_error() {
    let mut doc = valid();
    doc["category"] = json!("Marketing-Sales");
    let findings = validate_metadata(&doc);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].code, "META-004");
    assert!(findings[0]
        .message
        .starts_with("Invalid category: Marketing-Sales. Must be one of ['content-media', "));
}

#[test]
fn difficulty_message_names_the_allowed_set() {
    let mut doc = valid();
    doc["difficulty"] = json!("Expert");
    insta::assert_snapshot!(
        messages(&doc).join("\n"),
        @"Invalid difficulty: Expert. Must be one of ['beginner', 'intermediate', 'advanced']"
    );
}

#[test]
fn featured_false_is_not_empty_but_other_falsy_values_are() {
    let mut doc = valid();
    doc["featured"] = json!(false);
    doc["version"] = json!(0);
    doc["tags"] = json!([]);
    assert_eq!(
        messages(&doc),
        vec![
            "Empty value for required field: tags",
            "Empty value for required field: version",
        ]
    );
}

#[test]
fn sequence_fields_must_be_lists() {
    let mut doc = valid();
    doc["tags"] = json!("crm, leads");
    doc["prerequisites"] = json!({"account": "HubSpot"});
    assert_eq!(
        messages(&doc),
        vec!["tags must be a list", "prerequisites must be a list"]
    );
}

#[test]
fn checks_accumulate_across_rules() {
    let doc = json!({"name": "", "difficulty": "hard", "category": "misc", "tags": 3});
    let codes: Vec<String> = validate_metadata(&doc).into_iter().map(|f| f.code).collect();
    assert!(codes.contains(&"META-001".to_string()));
    assert!(codes.contains(&"META-002".to_string()));
    assert!(codes.contains(&"META-003".to_string()));
    assert!(codes.contains(&"META-004".to_string()));
    assert!(codes.contains(&"META-005".to_string()));
}
