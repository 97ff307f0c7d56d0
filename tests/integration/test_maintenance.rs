use caphe::core::discovery::DiscoveryOptions;
use caphe::core::maintenance::{DEFAULT_ESTIMATED_TIME, DEFAULT_PREREQUISITES};
use caphe::core::report::FsSink;
use caphe::core::validation::validate_metadata;
use caphe::core::{DiscoveryFeed, MaintenancePass, MaintenanceSummary};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, text: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn read(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

const WORKFLOW: &str = r#"{"nodes": [], "connections": {}}"#;

#[test]
fn existing_metadata_is_normalized_and_completed() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("workflows");
    write(&root, "ecommerce/cart.json", WORKFLOW);
    write(
        &root,
        "ecommerce/cart-metadata.json",
        r#"{"name": "Cart", "category": "Ecommerce/Shopify", "difficulty": "Beginner", "estimatedTime": "5 minutes"}"#,
    );

    let feed = DiscoveryFeed::new(&root, DiscoveryOptions::default());
    let summary = MaintenancePass::new(&feed, &FsSink).execute().unwrap();
    assert_eq!(
        summary,
        MaintenanceSummary {
            fixed: 1,
            created: 0,
            failed: 0
        }
    );

    let fixed = read(&root.join("ecommerce/cart-metadata.json"));
    assert_eq!(fixed["category"], "ecommerce");
    assert_eq!(fixed["difficulty"], "beginner");
    assert_eq!(fixed["estimatedTime"], "5 minutes");
    assert_eq!(fixed["prerequisites"], json!(DEFAULT_PREREQUISITES));
    assert_eq!(fixed["featured"], false);
}

#[test]
fn scaffolded_metadata_passes_validation() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("workflows");
    write(&root, "customer-service/ticket-routing/route-by-sla.json", WORKFLOW);

    let feed = DiscoveryFeed::new(&root, DiscoveryOptions::default());
    let summary = MaintenancePass::new(&feed, &FsSink).execute().unwrap();
    assert_eq!(summary.created, 1);
    assert_eq!(summary.processed(), 1);

    let created = read(&root.join("customer-service/ticket-routing/route-by-sla-metadata.json"));
    assert_eq!(created["name"], "Route By Sla");
    assert_eq!(created["subcategory"], "Ticket Routing");
    assert_eq!(created["category"], "customer-service");
    assert_eq!(created["estimatedTime"], DEFAULT_ESTIMATED_TIME);
    assert_eq!(
        created["tags"],
        json!(["customer-service", "ticket-routing", "automation"])
    );
    assert!(validate_metadata(&created).is_empty());
}

#[test]
fn broken_documents_are_counted_not_fatal() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("workflows");
    write(&root, "finance-accounting/ledger.json", WORKFLOW);
    write(&root, "finance-accounting/ledger-metadata.json", "[1, 2]");
    write(&root, "finance-accounting/budget.json", "{ not json");
    write(&root, "education/quiz.json", WORKFLOW);

    let feed = DiscoveryFeed::new(&root, DiscoveryOptions::default());
    let summary = MaintenancePass::new(&feed, &FsSink).execute().unwrap();

    assert_eq!(summary.failed, 2);
    assert_eq!(summary.created, 1);
    assert!(!root.join("finance-accounting/budget-metadata.json").exists());
    assert_eq!(
        fs::read_to_string(root.join("finance-accounting/ledger-metadata.json")).unwrap(),
        "[1, 2]"
    );
}
