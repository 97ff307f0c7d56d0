use crate::core::workflow::schema::{Node, WorkflowDocument};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a workflow gets started, inferred from its trigger node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    Webhook,
    Scheduled,
    Manual,
    /// No recognizable trigger node; typical of agent-style or multi-step flows.
    Complex,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Webhook => write!(f, "Webhook"),
            TriggerKind::Scheduled => write!(f, "Scheduled"),
            TriggerKind::Manual => write!(f, "Manual"),
            TriggerKind::Complex => write!(f, "Complex"),
        }
    }
}

/// Substring rules checked against a trigger node type, highest priority first.
const TRIGGER_FLAVORS: &[(&[&str], TriggerKind)] = &[
    (&["webhook", "form"], TriggerKind::Webhook),
    (&["schedule", "cron"], TriggerKind::Scheduled),
    (&["manual"], TriggerKind::Manual),
];

/// Classify a single node. `None` when it is not a trigger or is a trigger of
/// an unrecognized flavor.
pub fn classify_node(node: &Node) -> Option<TriggerKind> {
    if !node.type_contains("trigger") {
        return None;
    }
    TRIGGER_FLAVORS
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| node.type_contains(needle)))
        .map(|(_, kind)| *kind)
}

/// Infer the trigger kind of a workflow.
///
/// Nodes are scanned in document order and the first trigger node with a
/// recognized flavor wins, so reordering nodes can change the result.
pub fn classify_trigger(workflow: &WorkflowDocument) -> TriggerKind {
    classify_nodes(workflow.node_list())
}

pub fn classify_nodes(nodes: &[Node]) -> TriggerKind {
    nodes
        .iter()
        .find_map(classify_node)
        .unwrap_or(TriggerKind::Complex)
}
