//! Structured error carried by every fallible core operation.

use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    /// Sorted so rendered errors are stable between runs.
    pub context: BTreeMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let id = uuid::Uuid::new_v4().simple().to_string();
        AppError {
            category,
            severity: category.severity(),
            code: format!("{}-{}", category.code_prefix(), &id[..8]),
            message: message.into(),
            context: BTreeMap::new(),
            recovery_suggestions: Vec::new(),
            occurred_at: Utc::now(),
            source: None,
        }
    }

    /// Record the document or directory the error concerns.
    pub fn at_path(mut self, path: &Path) -> Self {
        self.add_context("path", &path.display().to_string());
        self
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_suggestion<T: Into<String>>(mut self, suggestion: T) -> Self {
        self.recovery_suggestions.push(suggestion.into());
        self
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }

    fn wrap(
        category: ErrorCategory,
        code: &str,
        message: String,
        suggestion: Option<&str>,
        source: anyhow::Error,
    ) -> Self {
        let mut error = AppError::new(category, message).with_code(code);
        error.recovery_suggestions.extend(suggestion.map(str::to_string));
        error.source = Some(source);
        error
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if !self.context.is_empty() {
            let pairs: Vec<String> = self
                .context
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            write!(f, " ({})", pairs.join(", "))?;
        }
        if let Some(source) = &self.source {
            write!(f, "\nCaused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::wrap(
            ErrorCategory::InternalError,
            "INTERNAL",
            format!("{:#}", e),
            None,
            e,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::wrap(
            ErrorCategory::IoError,
            "IO",
            e.to_string(),
            Some("check that the workflow tree exists and is writable"),
            e.into(),
        )
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::wrap(
            ErrorCategory::SerializationError,
            "JSON",
            e.to_string(),
            None,
            e.into(),
        )
    }
}
