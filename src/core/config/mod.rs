use crate::core::discovery::DiscoveryOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main Caphè configuration loaded from caphe.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CapheConfig {
    /// Source and target trees
    #[serde(default)]
    pub paths: PathsConfig,

    /// Validation pass settings
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Integration pass settings
    #[serde(default)]
    pub integration: IntegrationConfig,

    /// Catalogue index settings
    #[serde(default)]
    pub index: IndexConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// Categorized workflow tree, relative to the workspace
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Root of the migrated catalogue
    #[serde(default = "default_target_dir")]
    pub target_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationConfig {
    /// Appended to a workflow stem to name its metadata file
    #[serde(default = "default_metadata_suffix")]
    pub metadata_suffix: String,

    /// File names never treated as workflows
    #[serde(default = "default_skip_files")]
    pub skip_files: Vec<String>,

    #[serde(default = "default_validation_report")]
    pub report_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegrationConfig {
    /// Filename indices start just above this value
    #[serde(default = "default_index_seed")]
    pub index_seed: u32,

    #[serde(default = "default_integration_report")]
    pub report_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexConfig {
    #[serde(default = "default_index_output")]
    pub output_file: PathBuf,

    #[serde(default = "default_popular_tag_limit")]
    pub popular_tag_limit: usize,

    /// Also write a single-line `.min.json` twin
    #[serde(default = "default_minified")]
    pub minified: bool,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("workflows")
}

fn default_target_dir() -> PathBuf {
    PathBuf::from("frameworks/caphe-workflows")
}

fn default_metadata_suffix() -> String {
    "-metadata".to_string()
}

fn default_skip_files() -> Vec<String> {
    vec!["metadata-template.json".to_string()]
}

fn default_validation_report() -> String {
    "validation_report.json".to_string()
}

fn default_index_seed() -> u32 {
    5000
}

fn default_integration_report() -> String {
    "integration_report.json".to_string()
}

fn default_index_output() -> PathBuf {
    PathBuf::from("workflow-index.json")
}

fn default_popular_tag_limit() -> usize {
    50
}

fn default_minified() -> bool {
    true
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            source_dir: default_source_dir(),
            target_dir: default_target_dir(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            metadata_suffix: default_metadata_suffix(),
            skip_files: default_skip_files(),
            report_file: default_validation_report(),
        }
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        IntegrationConfig {
            index_seed: default_index_seed(),
            report_file: default_integration_report(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            output_file: default_index_output(),
            popular_tag_limit: default_popular_tag_limit(),
            minified: default_minified(),
        }
    }
}

impl CapheConfig {
    /// Discovery naming rules derived from the validation section.
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            metadata_suffix: self.validation.metadata_suffix.clone(),
            skip_files: self.validation.skip_files.clone(),
        }
    }

    /// Resolve a configured path against the workspace unless it is absolute.
    pub fn resolve(workspace: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            workspace.join(path)
        }
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
