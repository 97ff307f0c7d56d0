use caphe::core::discovery::DiscoveryOptions;
use caphe::core::report::{DocumentSink, FsSink, RunSummary};
use caphe::core::{AppError, DiscoveryFeed, ErrorCategory, IntegrationRun};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(root: &Path, rel: &str, value: &Value) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

fn read(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn seed(root: &Path) {
    let webhook = json!({
        "nodes": [{"id": "1", "name": "Hook", "type": "n8n-nodes-base.webhookTrigger"}],
        "connections": {}
    });
    write(root, "finance-accounting/invoices/paid.json", &webhook);
    write(
        root,
        "finance-accounting/invoices/paid-metadata.json",
        &json!({"name": "Invoice Paid", "category": "finance-accounting", "difficulty": "beginner"}),
    );
    write(root, "human-resources/onboard.json", &webhook);
    write(
        root,
        "human-resources/onboard-metadata.json",
        &json!({"name": "Onboard", "difficulty": "expert"}),
    );
    write(root, "human-resources/orphan.json", &webhook);
}

#[derive(Default)]
struct RecordingSink {
    written: RefCell<Vec<PathBuf>>,
}

impl DocumentSink for RecordingSink {
    fn write_json(&self, path: &Path, _document: &Value) -> Result<(), AppError> {
        self.written.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}

#[test]
fn documents_land_in_namespace_folders() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("workflows");
    let target = dir.path().join("catalogue");
    seed(&source);

    let feed = DiscoveryFeed::new(&source, DiscoveryOptions::default());
    let mut run = IntegrationRun::new(&feed, &FsSink, &target, 5000);
    let report = run.execute_and_persist("integration_report.json").unwrap();

    assert_eq!(report.summary.total_workflows, 2);
    assert_eq!(report.summary.successful_integrations, 2);
    assert_eq!(report.summary.success_rate, "100.0%");
    assert_eq!(report.exit_code(), 0);
    assert_eq!(run.last_index(), 5002);

    let paid = read(
        &target.join("workflows/Quickbooks/5001_Quickbooks_InvoicePaid_finance-accounting_Enhanced.json"),
    );
    assert_eq!(paid["meta"]["priority"], "low");
    assert_eq!(paid["meta"]["triggerType"], "Webhook");
    assert_eq!(paid["nodes"].as_array().unwrap().len(), 2);

    let onboard = read(
        &target.join("workflows/Gmail/5002_Gmail_Onboard_human-resources_Enhanced.json"),
    );
    assert_eq!(onboard["meta"]["priority"], "high");
    assert_eq!(onboard["meta"]["category"], "human-resources");

    let persisted = read(&target.join("integration_report.json"));
    assert_eq!(persisted["summary"]["successful_integrations"], 2);
    assert_eq!(persisted["category_mapping"]["human-resources"], "Gmail");
    assert_eq!(report.namespaces_used(), vec!["Quickbooks", "Gmail"]);
}

#[test]
fn category_comes_from_directory_not_metadata() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("workflows");
    write(
        &source,
        "it-development/deploy.json",
        &json!({"nodes": [], "connections": {}}),
    );
    write(
        &source,
        "it-development/deploy-metadata.json",
        &json!({"name": "Deploy", "category": "marketing-sales"}),
    );

    let feed = DiscoveryFeed::new(&source, DiscoveryOptions::default());
    let sink = RecordingSink::default();
    let mut run = IntegrationRun::new(&feed, &sink, dir.path(), 0);
    let report = run.execute().unwrap();

    assert_eq!(report.results.results[0].integration_category.as_deref(), Some("Github"));
    assert_eq!(
        sink.written.borrow().as_slice(),
        &[dir.path().join("workflows/Github/0001_Github_Deploy_it-development_Enhanced.json")]
    );
}

#[test]
fn unreadable_workflow_is_recorded_and_counter_still_advances() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("workflows");
    fs::create_dir_all(source.join("ecommerce")).unwrap();
    fs::write(source.join("ecommerce/broken.json"), "{ nope").unwrap();
    write(&source, "ecommerce/broken-metadata.json", &json!({"name": "Broken"}));
    write(
        &source,
        "ecommerce/fine.json",
        &json!({"nodes": [], "connections": {}}),
    );
    write(&source, "ecommerce/fine-metadata.json", &json!({"name": "Fine"}));

    let feed = DiscoveryFeed::new(&source, DiscoveryOptions::default());
    let sink = RecordingSink::default();
    let mut run = IntegrationRun::new(&feed, &sink, dir.path(), 10);
    let report = run.execute().unwrap();

    assert_eq!(report.results.failed, 1);
    assert_eq!(report.results.successful, 1);
    assert_eq!(report.summary.success_rate, "50.0%");
    assert_eq!(report.exit_code(), 1);
    assert_eq!(run.last_index(), 12);
    let failure = report.results.results.iter().find(|o| !o.success).unwrap();
    assert!(failure.error.is_some());
    assert!(failure.target_file.is_none());
}

#[test]
fn missing_source_root_is_a_discovery_error() {
    let dir = TempDir::new().unwrap();
    let feed = DiscoveryFeed::new(dir.path().join("nowhere"), DiscoveryOptions::default());
    let mut run = IntegrationRun::new(&feed, &FsSink, dir.path(), 5000);
    let err = run.execute().unwrap_err();
    assert_eq!(err.category, ErrorCategory::DiscoveryError);
}
