//! Source-side documents: workflow definitions, their sidecar metadata, and
//! trigger inference over node lists.

pub mod metadata;
pub mod schema;
pub mod trigger;

pub use metadata::{WorkflowMetadata, REQUIRED_FIELDS};
pub use schema::{load_workflow, read_json, DocumentError, Node, WorkflowDocument};
pub use trigger::{classify_trigger, TriggerKind};
