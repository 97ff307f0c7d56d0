#![allow(clippy::result_large_err)]

use super::CapheConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &CapheConfig) -> Result<(), AppError> {
        let invalid = |message: &str| Err(AppError::new(ErrorCategory::ConfigError, message));

        if config.paths.source_dir.as_os_str().is_empty() {
            return invalid("paths.source_dir cannot be empty");
        }
        if config.paths.target_dir.as_os_str().is_empty() {
            return invalid("paths.target_dir cannot be empty");
        }
        if config.validation.metadata_suffix.trim().is_empty() {
            return invalid("validation.metadata_suffix cannot be empty");
        }
        if config.validation.report_file.trim().is_empty() {
            return invalid("validation.report_file cannot be empty");
        }
        if config.integration.report_file.trim().is_empty() {
            return invalid("integration.report_file cannot be empty");
        }
        if config.index.output_file.as_os_str().is_empty() {
            return invalid("index.output_file cannot be empty");
        }
        if config.index.popular_tag_limit == 0 {
            return invalid("index.popular_tag_limit must be at least 1");
        }

        Ok(())
    }
}
