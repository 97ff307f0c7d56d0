use crate::core::transform::identity::error_node_id;
use crate::core::workflow::schema::Node;
use serde_json::{json, Map, Value};

pub const ERROR_NODE_NAME: &str = "Error Handler";
pub const ERROR_NODE_TYPE: &str = "n8n-nodes-base.stopAndError";
pub const ERROR_NODE_MESSAGE: &str = "Workflow execution error";
const STOP_AND_ERROR_MARKER: &str = "stopAndError";

/// A node already handles errors if its name mentions "error" (any case) or
/// its type is a stop-and-error node.
pub fn has_error_handling(nodes: &[Node]) -> bool {
    nodes
        .iter()
        .any(|node| node.name_contains("error") || node.node_type().contains(STOP_AND_ERROR_MARKER))
}

/// Terminal halt node appended to workflows without error handling.
pub fn error_handler_node(existing: &[Node]) -> Node {
    let fingerprint = serde_json::to_string(existing).unwrap_or_default();
    let mut fields = Map::new();
    fields.insert("id".into(), Value::from(error_node_id(&fingerprint)));
    fields.insert("name".into(), Value::from(ERROR_NODE_NAME));
    fields.insert("type".into(), Value::from(ERROR_NODE_TYPE));
    fields.insert("typeVersion".into(), Value::from(1));
    fields.insert("position".into(), json!([1000, 400]));
    fields.insert(
        "parameters".into(),
        json!({"message": ERROR_NODE_MESSAGE, "options": {}}),
    );
    Node::from_fields(fields)
}

/// Return the node list for the target document, with an error handler
/// appended when needed. The input slice is never modified; an empty list
/// stays empty.
pub fn with_error_handling(nodes: &[Node]) -> Vec<Node> {
    let mut out = nodes.to_vec();
    if !nodes.is_empty() && !has_error_handling(nodes) {
        out.push(error_handler_node(nodes));
    }
    out
}
