use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCategory {
    ValidationError,
    ParseError,
    TransformError,
    DiscoveryError,
    ConfigError,
    SerializationError,
    IoError,
    InternalError,
    Unknown,
}

impl ErrorCategory {
    /// Short tag used in generated error codes, e.g. `IO-1a2b3c4d`.
    pub fn code_prefix(self) -> &'static str {
        match self {
            ErrorCategory::ValidationError => "VAL",
            ErrorCategory::ParseError => "PARSE",
            ErrorCategory::TransformError => "XFORM",
            ErrorCategory::DiscoveryError => "DISC",
            ErrorCategory::ConfigError => "CFG",
            ErrorCategory::SerializationError => "SER",
            ErrorCategory::IoError => "IO",
            ErrorCategory::InternalError => "INT",
            ErrorCategory::Unknown => "UNK",
        }
    }

    pub fn severity(self) -> ErrorSeverity {
        match self {
            ErrorCategory::Unknown => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
    Debug,
}
