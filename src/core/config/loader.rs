#![allow(clippy::result_large_err)]

use super::CapheConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "caphe.toml";

/// Environment variables that override `caphe.toml`, with their help text.
const ENV_OVERRIDES: &[&str] = &[
    "CAPHE_SOURCE_DIR - Override the workflow source tree (default: workflows)",
    "CAPHE_TARGET_DIR - Override the integration target (default: frameworks/caphe-workflows)",
    "CAPHE_INDEX_SEED - Override the filename index seed (default: 5000)",
    "CAPHE_METADATA_SUFFIX - Override the metadata file suffix (default: -metadata)",
    "CAPHE_LOG_DIR - Override the log directory",
    "CAPHE_BATCH - Set to 1 to silence console logging",
];

pub struct ConfigLoader;

impl ConfigLoader {
    /// `<workspace>/caphe.toml` (defaults when absent), then environment overrides.
    pub fn load_from_workspace(workspace_path: &Path) -> Result<CapheConfig, AppError> {
        let mut config = Self::load_from_file(&workspace_path.join(CONFIG_FILE))?.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// `Ok(None)` when the file does not exist.
    pub fn load_from_file(path: &Path) -> Result<Option<CapheConfig>, AppError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(AppError::from(err).at_path(path)),
        };

        toml::from_str(&content).map(Some).map_err(|err| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Failed to parse {}: {}", path.display(), err),
            )
            .at_path(path)
            .with_suggestion("only [paths], [validation], [integration] and [index] tables are read")
        })
    }

    fn apply_env_overrides(config: &mut CapheConfig) {
        if let Some(source_dir) = override_value("CAPHE_SOURCE_DIR") {
            config.paths.source_dir = PathBuf::from(source_dir);
        }
        if let Some(target_dir) = override_value("CAPHE_TARGET_DIR") {
            config.paths.target_dir = PathBuf::from(target_dir);
        }
        if let Some(seed) = override_value("CAPHE_INDEX_SEED") {
            match seed.parse::<u32>() {
                Ok(seed) => config.integration.index_seed = seed,
                Err(_) => tracing::warn!(value = %seed, "ignoring invalid CAPHE_INDEX_SEED"),
            }
        }
        if let Some(suffix) = override_value("CAPHE_METADATA_SUFFIX") {
            config.validation.metadata_suffix = suffix;
        }
    }

    pub fn env_var_documentation() -> &'static [&'static str] {
        ENV_OVERRIDES
    }
}

fn override_value(name: &str) -> Option<String> {
    let value = env::var(name).ok()?;
    tracing::debug!(variable = name, value = %value, "config override from environment");
    Some(value)
}
