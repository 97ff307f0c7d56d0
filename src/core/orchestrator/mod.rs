//! The two independent passes over a workflow tree.
//!
//! Both are single-threaded: each document is read, checked or transformed,
//! and recorded before the next one is opened.

pub mod integrate;
pub mod validate;

pub use integrate::IntegrationRun;
pub use validate::{default_report_path, validate_metadata_file, ValidationRun};
