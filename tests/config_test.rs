//! Integration tests for layered settings loading.
//!
//! Every layer is passed explicitly (temp directories, in-memory overrides),
//! so the user's own global config and KNUTH_* environment never leak in.

use std::fs;
use std::path::Path;

use config::Config;
use tempfile::TempDir;

use knuth::config::{local_config_path, Settings, SettingsError};
use knuth::domain::DEFAULT_STACK_CAPACITY;
use knuth::Traversal;

fn no_overrides() -> Config {
    Config::builder().build().unwrap()
}

fn load_local(dir: &Path) -> Result<Settings, SettingsError> {
    Settings::load_from(None, Some(dir), &no_overrides())
}

// ============================================================
// Defaults
// ============================================================

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = load_local(dir.path()).expect("load settings");

    assert_eq!(settings.stack.default_capacity, DEFAULT_STACK_CAPACITY);
    assert_eq!(settings.tree.traversal, Traversal::Recursive);
}

// ============================================================
// Local config
// ============================================================

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let config = r#"
[stack]
default_capacity = 4

[tree]
traversal = "iterative"
"#;
    fs::write(local_config_path(dir.path()), config).unwrap();

    let settings = load_local(dir.path()).expect("load settings");

    assert_eq!(settings.stack.default_capacity, 4);
    assert_eq!(settings.tree.traversal, Traversal::Iterative);
}

#[test]
fn given_partial_local_config_when_load_then_unspecified_keys_keep_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[tree]\ntraversal = \"iterative\"\n",
    )
    .unwrap();

    let settings = load_local(dir.path()).expect("load settings");

    assert_eq!(settings.stack.default_capacity, DEFAULT_STACK_CAPACITY);
    assert_eq!(settings.tree.traversal, Traversal::Iterative);
}

#[test]
fn given_invalid_toml_when_load_then_parse_error_names_file() {
    let dir = TempDir::new().unwrap();
    let path = local_config_path(dir.path());
    fs::write(&path, "[stack\ndefault_capacity = ").unwrap();

    let err = load_local(dir.path()).unwrap_err();

    match err {
        SettingsError::Parse { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn given_unknown_strategy_in_file_when_load_then_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[tree]\ntraversal = \"sideways\"\n",
    )
    .unwrap();

    let err = load_local(dir.path()).unwrap_err();

    assert!(matches!(err, SettingsError::Parse { .. }));
}

// ============================================================
// Layering
// ============================================================

#[test]
fn given_global_and_local_config_when_load_then_local_wins_per_key() {
    let global_dir = TempDir::new().unwrap();
    let global_path = global_dir.path().join("knuth.toml");
    fs::write(
        &global_path,
        "[stack]\ndefault_capacity = 32\n\n[tree]\ntraversal = \"iterative\"\n",
    )
    .unwrap();
    let local_dir = TempDir::new().unwrap();
    fs::write(local_config_path(local_dir.path()), "[stack]\ndefault_capacity = 8\n").unwrap();

    let settings = Settings::load_from(
        Some(global_path.as_path()),
        Some(local_dir.path()),
        &no_overrides(),
    )
    .expect("load settings");

    assert_eq!(settings.stack.default_capacity, 8);
    assert_eq!(settings.tree.traversal, Traversal::Iterative);
}

#[test]
fn given_missing_global_file_when_load_then_skipped() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    let settings =
        Settings::load_from(Some(missing.as_path()), None, &no_overrides()).expect("load settings");

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_override_when_load_then_replaces_file_value() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[stack]\ndefault_capacity = 4\n").unwrap();
    let overrides = Config::builder()
        .set_override("stack.default_capacity", "64")
        .unwrap()
        .build()
        .unwrap();

    let settings = Settings::load_from(None, Some(dir.path()), &overrides).expect("load settings");

    assert_eq!(settings.stack.default_capacity, 64);
}

#[test]
fn given_non_numeric_capacity_override_when_load_then_invalid_value() {
    let dir = TempDir::new().unwrap();
    let overrides = Config::builder()
        .set_override("stack.default_capacity", "lots")
        .unwrap()
        .build()
        .unwrap();

    let err = Settings::load_from(None, Some(dir.path()), &overrides).unwrap_err();

    match err {
        SettingsError::InvalidValue { key, .. } => assert_eq!(key, "stack.default_capacity"),
        other => panic!("expected invalid value, got {other:?}"),
    }
}

// ============================================================
// Rendering
// ============================================================

#[test]
fn given_rendered_settings_when_written_and_loaded_then_identical() {
    let dir = TempDir::new().unwrap();
    let mut settings = Settings::default();
    settings.stack.default_capacity = 7;
    settings.tree.traversal = Traversal::Iterative;
    fs::write(local_config_path(dir.path()), settings.to_toml().unwrap()).unwrap();

    let loaded = load_local(dir.path()).expect("load settings");

    assert_eq!(loaded, settings);
}
