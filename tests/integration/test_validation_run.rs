use caphe::core::discovery::DiscoveryOptions;
use caphe::core::orchestrator::validate_metadata_file;
use caphe::core::report::{FsSink, RunSummary};
use caphe::core::{default_report_path, DiscoveryFeed, ValidationRun, ValidationStatus};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, value: &Value) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn workflow() -> Value {
    json!({
        "nodes": [{"id": "1", "name": "Start", "type": "n8n-nodes-base.manualTrigger"}],
        "connections": {}
    })
}

fn metadata(category: &str) -> Value {
    json!({
        "name": "Weekly digest",
        "description": "Sends a digest",
        "category": category,
        "subcategory": "reports",
        "useCase": "Summaries",
        "difficulty": "intermediate",
        "estimatedTime": "20 minutes",
        "prerequisites": ["Slack workspace"],
        "tags": ["digest"],
        "author": {"name": "Ops"},
        "version": "1.0.0",
        "featured": true
    })
}

#[test]
fn clean_tree_validates_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("workflows");
    write(&root, "customer-service/reports/digest.json", &workflow());
    write(
        &root,
        "customer-service/reports/digest-metadata.json",
        &metadata("customer-service"),
    );
    write(&root, "metadata-template.json", &json!({}));

    let feed = DiscoveryFeed::new(&root, DiscoveryOptions::default());
    let report = ValidationRun::new(&feed).execute().unwrap();

    assert_eq!(report.summary.total_workflows, 1);
    assert_eq!(report.summary.valid, 1);
    assert_eq!(report.summary.completion_rate, "100.0%");
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.results[0].location, "customer-service/reports");
}

#[test]
fn missing_metadata_is_a_warning_with_expected_file_name() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("workflows");
    write(&root, "education/quiz.json", &workflow());

    let feed = DiscoveryFeed::new(&root, DiscoveryOptions::default());
    let report = ValidationRun::new(&feed).execute().unwrap();
    let outcome = &report.results[0];

    assert_eq!(outcome.status, ValidationStatus::MissingMetadata);
    assert_eq!(outcome.findings[0].code, "META-006");
    assert_eq!(
        outcome.findings[0].message,
        "Missing metadata file: quiz-metadata.json"
    );
    assert_eq!(report.summary.total_errors, 0);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn structural_failure_suppresses_metadata_checks() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("workflows");
    write(&root, "finance/ledger.json", &json!({"nodes": []}));
    write(&root, "finance/ledger-metadata.json", &json!({}));

    let feed = DiscoveryFeed::new(&root, DiscoveryOptions::default());
    let report = ValidationRun::new(&feed).execute().unwrap();
    let outcome = &report.results[0];

    assert_eq!(outcome.status, ValidationStatus::InvalidWorkflow);
    assert_eq!(outcome.errors(), vec!["Missing 'connections' object".to_string()]);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn bad_category_and_difficulty_are_reported() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("workflows");
    let mut meta = metadata("gardening");
    meta["difficulty"] = json!("Hard");
    write(&root, "marketing-sales/leads/score.json", &workflow());
    write(&root, "marketing-sales/leads/score-metadata.json", &meta);

    let feed = DiscoveryFeed::new(&root, DiscoveryOptions::default());
    let report = ValidationRun::new(&feed).execute().unwrap();
    let codes: Vec<&str> = report.results[0]
        .findings
        .iter()
        .map(|f| f.code.as_str())
        .collect();

    assert_eq!(report.results[0].status, ValidationStatus::InvalidMetadata);
    assert!(codes.contains(&"META-003"));
    assert!(codes.contains(&"META-004"));
    assert_eq!(report.summary.total_errors, 2);
}

#[test]
fn missing_root_fails_the_run() {
    let dir = TempDir::new().unwrap();
    let feed = DiscoveryFeed::new(dir.path().join("absent"), DiscoveryOptions::default());
    let err = ValidationRun::new(&feed).execute().unwrap_err();
    assert!(err.message.contains("Workflows directory not found"));
}

#[test]
fn report_persists_next_to_source_tree() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("workflows");
    write(&root, "ecommerce/cart.json", &workflow());
    write(&root, "ecommerce/cart-metadata.json", &metadata("ecommerce"));

    let feed = DiscoveryFeed::new(&root, DiscoveryOptions::default());
    let path = default_report_path(&root, "validation_report.json");
    ValidationRun::new(&feed)
        .execute_and_persist(&FsSink, &path)
        .unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["summary"]["valid"], 1);
    assert_eq!(written["category_breakdown"]["ecommerce"][0]["workflow"], "cart");

    let standalone = validate_metadata_file(&root.join("ecommerce/cart-metadata.json"));
    assert!(standalone.is_empty());
}
