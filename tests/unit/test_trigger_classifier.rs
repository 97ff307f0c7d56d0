use caphe::core::workflow::{classify_trigger, TriggerKind, WorkflowDocument};
use serde_json::json;

fn workflow(types: &[&str]) -> WorkflowDocument {
    let nodes: Vec<_> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"id": i.to_string(), "name": format!("Step {}", i), "type": t}))
        .collect();
    WorkflowDocument::from_value(json!({"nodes": nodes, "connections": {}})).unwrap()
}

#[test]
fn first_trigger_node_wins() {
    assert_eq!(
        classify_trigger(&workflow(&["webhookTrigger", "manualTrigger"])),
        TriggerKind::Webhook
    );
    assert_eq!(
        classify_trigger(&workflow(&["manualTrigger", "webhookTrigger"])),
        TriggerKind::Manual
    );
}

#[test]
fn no_trigger_substring_is_complex() {
    assert_eq!(classify_trigger(&workflow(&["httpRequest"])), TriggerKind::Complex);
    assert_eq!(classify_trigger(&workflow(&[])), TriggerKind::Complex);
    assert_eq!(
        classify_trigger(&WorkflowDocument::default()),
        TriggerKind::Complex
    );
}

#[test]
fn flavors_are_checked_in_priority_order() {
    // a type mentioning both webhook and schedule resolves as webhook
    assert_eq!(
        classify_trigger(&workflow(&["scheduleWebhookTrigger"])),
        TriggerKind::Webhook
    );
    assert_eq!(
        classify_trigger(&workflow(&["n8n-nodes-base.scheduleTrigger"])),
        TriggerKind::Scheduled
    );
    assert_eq!(
        classify_trigger(&workflow(&["n8n-nodes-base.cronTrigger"])),
        TriggerKind::Scheduled
    );
    assert_eq!(
        classify_trigger(&workflow(&["n8n-nodes-base.formTrigger"])),
        TriggerKind::Webhook
    );
}

#[test]
fn matching_ignores_case() {
    assert_eq!(
        classify_trigger(&workflow(&["N8N-NODES-BASE.WEBHOOKTRIGGER"])),
        TriggerKind::Webhook
    );
}

#[test]
fn unrecognized_trigger_flavor_does_not_decide() {
    assert_eq!(
        classify_trigger(&workflow(&["n8n-nodes-base.gmailTrigger", "manualTrigger"])),
        TriggerKind::Manual
    );
    assert_eq!(
        classify_trigger(&workflow(&["n8n-nodes-base.gmailTrigger"])),
        TriggerKind::Complex
    );
}

#[test]
fn kind_serializes_by_name() {
    assert_eq!(serde_json::to_value(TriggerKind::Scheduled).unwrap(), json!("Scheduled"));
    assert_eq!(TriggerKind::Complex.to_string(), "Complex");
}
