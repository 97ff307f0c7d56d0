pub mod config;
pub mod discovery;
pub mod error;
pub mod index;
pub mod maintenance;
pub mod orchestrator;
pub mod report;
pub mod tables;
pub mod transform;
pub mod types;
pub mod validation;
pub mod workflow;

pub use config::{CapheConfig, ConfigLoader, ConfigValidator};
pub use discovery::{DiscoveredWorkflow, DiscoveryFeed, DiscoveryOptions};
pub use error::AppError;
pub use index::{write_index, CatalogueBuilder, CatalogueIndex};
pub use maintenance::{MaintenancePass, MaintenanceSummary};
pub use orchestrator::{default_report_path, IntegrationRun, ValidationRun};
pub use report::{
    success_rate, DocumentSink, FsSink, IntegrationOutcome, IntegrationReport, RunSummary,
    ValidationOutcome, ValidationReport,
};
pub use transform::{transform, transform_at, TransformedDocument};
pub use types::*;
pub use validation::{validate_metadata, validate_workflow, Finding, ValidationStatus};
pub use workflow::{classify_trigger, TriggerKind, WorkflowDocument, WorkflowMetadata};
