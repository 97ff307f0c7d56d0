use caphe::core::error::AppError;
use caphe::core::types::{ErrorCategory, ErrorSeverity};
use caphe::core::workflow::schema::{read_json, DocumentError};
use tempfile::TempDir;

#[test]
fn test_error_creation_all_categories() {
    let categories = vec![
        ErrorCategory::ValidationError,
        ErrorCategory::ParseError,
        ErrorCategory::TransformError,
        ErrorCategory::DiscoveryError,
        ErrorCategory::ConfigError,
        ErrorCategory::SerializationError,
        ErrorCategory::IoError,
        ErrorCategory::InternalError,
        ErrorCategory::Unknown,
    ];

    for category in categories {
        let error = AppError::new(category, "test message");
        assert_eq!(error.category, category);
        assert_eq!(error.message, "test message");
        assert!(error.context.is_empty());
        assert!(error.recovery_suggestions.is_empty());
        assert!(error.occurred_at <= chrono::Utc::now());
        assert!(error.source.is_none());
    }
}

#[test]
fn test_error_severity_mapping() {
    assert_eq!(
        AppError::new(ErrorCategory::TransformError, "x").severity(),
        ErrorSeverity::Error
    );
    assert_eq!(
        AppError::new(ErrorCategory::Unknown, "x").severity(),
        ErrorSeverity::Info
    );
}

#[test]
fn test_error_display_includes_category_and_context() {
    let mut error = AppError::new(ErrorCategory::DiscoveryError, "root missing").with_code("D-1");
    error.add_context("root", "/nowhere");
    let text = error.to_string();
    assert!(text.starts_with("[D-1] DiscoveryError: root missing"));
    assert!(text.contains("/nowhere"));
}

#[test]
fn test_suggestions_accumulate() {
    let error = AppError::new(ErrorCategory::ConfigError, "bad")
        .with_suggestion("check caphe.toml")
        .with_suggestion("unset CAPHE_INDEX_SEED");
    assert_eq!(error.recovery_suggestions.len(), 2);
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io.into();
    assert_eq!(error.category, ErrorCategory::IoError);
    assert!(error.source.is_some());
}

#[test]
fn test_document_errors_map_to_categories() {
    let dir = TempDir::new().unwrap();
    let missing = read_json(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(missing, DocumentError::Read { .. }));
    assert!(missing.to_string().starts_with("Error reading file:"));
    assert_eq!(AppError::from(missing).category, ErrorCategory::IoError);

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, "{").unwrap();
    let parse = read_json(&bad).unwrap_err();
    assert!(parse.to_string().starts_with("Invalid JSON:"));
    let error = AppError::from(parse);
    assert_eq!(error.category, ErrorCategory::ParseError);
    assert_eq!(
        error.context.get("path").map(String::as_str),
        Some(bad.display().to_string().as_str())
    );
}
