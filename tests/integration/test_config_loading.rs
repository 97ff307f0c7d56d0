use caphe::core::config::loader::CONFIG_FILE;
use caphe::core::{CapheConfig, ConfigLoader, ConfigValidator};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const OVERRIDES: &[&str] = &[
    "CAPHE_SOURCE_DIR",
    "CAPHE_TARGET_DIR",
    "CAPHE_INDEX_SEED",
    "CAPHE_METADATA_SUFFIX",
];

fn clear_env() {
    for var in OVERRIDES {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    clear_env();
    let workspace = TempDir::new().unwrap();
    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    assert_eq!(config, CapheConfig::default());
    assert_eq!(config.paths.source_dir, PathBuf::from("workflows"));
    assert_eq!(config.integration.index_seed, 5000);
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[test]
#[serial]
fn file_values_then_env_overrides() {
    clear_env();
    let workspace = TempDir::new().unwrap();
    fs::write(
        workspace.path().join(CONFIG_FILE),
        r#"
[paths]
source_dir = "library"

[integration]
index_seed = 7000

[index]
popular_tag_limit = 5
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    assert_eq!(config.paths.source_dir, PathBuf::from("library"));
    assert_eq!(config.integration.index_seed, 7000);
    assert_eq!(config.index.popular_tag_limit, 5);
    assert_eq!(config.validation.metadata_suffix, "-metadata");

    env::set_var("CAPHE_SOURCE_DIR", "/srv/workflows");
    env::set_var("CAPHE_INDEX_SEED", "9000");
    env::set_var("CAPHE_METADATA_SUFFIX", ".meta");
    let config = ConfigLoader::load_from_workspace(workspace.path()).unwrap();
    clear_env();

    assert_eq!(config.paths.source_dir, PathBuf::from("/srv/workflows"));
    assert_eq!(config.integration.index_seed, 9000);
    assert_eq!(config.validation.metadata_suffix, ".meta");
    assert_eq!(
        CapheConfig::resolve(workspace.path(), &config.paths.source_dir),
        PathBuf::from("/srv/workflows")
    );
    assert_eq!(
        CapheConfig::resolve(workspace.path(), Path::new("out")),
        workspace.path().join("out")
    );
}

#[test]
#[serial]
fn malformed_file_is_a_config_error() {
    clear_env();
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join(CONFIG_FILE), "[paths\nsource_dir = 1").unwrap();
    let err = ConfigLoader::load_from_workspace(workspace.path()).unwrap_err();
    assert_eq!(err.category, caphe::core::ErrorCategory::ConfigError);
}

#[test]
#[serial]
fn validator_rejects_zero_tag_limit() {
    clear_env();
    let mut config = CapheConfig::default();
    config.index.popular_tag_limit = 0;
    assert!(ConfigValidator::validate(&config).is_err());
}
