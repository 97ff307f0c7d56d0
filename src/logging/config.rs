use crate::logging::layers::console::ConsoleOutput;
use crate::Result;
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::Directive;

const DEFAULT_LEVEL: &str = "info";

/// Logging settings for one command invocation.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: Option<PathBuf>,
    pub default_level: String,
    pub enable_file: bool,
    pub console_output: Option<ConsoleOutput>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            default_level: DEFAULT_LEVEL.to_string(),
            enable_file: true,
            console_output: None,
        }
    }
}

/// Path of the optional logging config below a workspace.
pub fn logging_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(".caphe").join("config").join("logging.toml")
}

impl LoggingConfig {
    /// Defaults, then `.caphe/config/logging.toml`, then `CAPHE_LOG_DIR`.
    pub fn load(workspace_root: Option<&Path>) -> Result<Self> {
        let mut config = LoggingConfig::default();
        if let Some(section) = workspace_root
            .map(logging_config_path)
            .filter(|path| path.exists())
            .map(|path| read_section(&path))
            .transpose()?
        {
            config.merge(section);
        }

        if let Some(log_dir) = env::var("CAPHE_LOG_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            config.log_dir = Some(PathBuf::from(log_dir));
        }

        Directive::from_str(&config.default_level).map_err(|_| {
            anyhow!(
                "logging.default_level '{}' is not a valid tracing directive",
                config.default_level
            )
        })?;
        Ok(config)
    }

    fn merge(&mut self, section: LoggingSection) {
        self.log_dir = section.log_dir.or(self.log_dir.take());
        self.default_level = section
            .default_level
            .unwrap_or_else(|| std::mem::take(&mut self.default_level));
        self.enable_file = section.enable_file.unwrap_or(self.enable_file);
        self.console_output = section.console_output.or(self.console_output);
    }
}

fn read_section(path: &Path) -> Result<LoggingSection> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read logging config {}", path.display()))?;
    let file: LoggingFile = toml::from_str(&content)
        .with_context(|| format!("failed to parse logging config {}", path.display()))?;
    Ok(file.logging)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingFile {
    logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
    log_dir: Option<PathBuf>,
    default_level: Option<String>,
    enable_file: Option<bool>,
    console_output: Option<ConsoleOutput>,
}
