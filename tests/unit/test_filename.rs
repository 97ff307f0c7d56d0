use caphe::core::transform::filename::{sanitize_name, MAX_NAME_CHARS};
use caphe::core::transform::{synthesize_filename, target_path, FilenameSequence};
use caphe::core::workflow::WorkflowMetadata;
use serde_json::json;
use std::path::{Path, PathBuf};

fn named(name: &str) -> WorkflowMetadata {
    WorkflowMetadata::from_value(&json!({ "name": name }))
}

#[test]
fn filename_carries_index_namespace_name_and_category() {
    let filename = synthesize_filename(&named("Test Workflow!"), "ecommerce", 7);
    assert!(filename.contains("0007"));
    assert!(filename.contains("Shopify"));
    assert!(filename.contains("TestWorkflow"));
    assert!(filename.contains("ecommerce"));
    insta::assert_snapshot!(filename, @"0007_Shopify_TestWorkflow_ecommerce_Enhanced.json");
}

#[test]
fn long_names_are_cut_to_twenty_characters() {
    let sanitized = sanitize_name("An Extremely Long Workflow Name For Testing");
    assert_eq!(sanitized.len(), MAX_NAME_CHARS);
    assert_eq!(sanitized, "AnExtremelyLongWorkf");
}

#[test]
fn missing_name_uses_placeholder_and_unknown_category_uses_default_namespace() {
    let filename = synthesize_filename(&WorkflowMetadata::default(), "unsorted", 12345);
    assert_eq!(filename, "12345_Automation_Workflow_unsorted_Enhanced.json");
}

#[test]
fn sequence_increments_before_yielding() {
    let mut sequence = FilenameSequence::new(5000);
    assert_eq!(sequence.next_index().unwrap(), 5001);
    assert_eq!(sequence.next_index().unwrap(), 5002);
    assert_eq!(sequence.current(), 5002);
}

#[test]
fn sequence_at_maximum_seed_errors_instead_of_wrapping() {
    let mut sequence = FilenameSequence::new(u32::MAX);
    let err = sequence.next_index().unwrap_err();
    assert!(err.message.contains("exhausted"));
    assert_eq!(sequence.current(), u32::MAX);
}

#[test]
fn target_path_nests_under_workflows_namespace() {
    assert_eq!(
        target_path(Path::new("/out"), "Notion", "0001_x.json"),
        PathBuf::from("/out/workflows/Notion/0001_x.json")
    );
}
