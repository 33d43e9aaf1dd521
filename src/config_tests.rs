use super::*;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_config_root(name: &str) -> PathBuf {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    let root = std::env::temp_dir().join(format!("{name}-{}-{now}", std::process::id()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

#[test]
fn missing_optional_file_yields_defaults() {
    let root = temp_config_root("pmaker-config-missing");
    let config = load_config_file(&root.join("config.json"), false).expect("defaults");
    assert_eq!(config, UserConfig::default());
    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_required_file_is_an_error() {
    let root = temp_config_root("pmaker-config-required");
    let err = load_config_file(&root.join("config.json"), true).unwrap_err();
    assert!(matches!(err, ScaffoldError::Io { .. }), "{err}");
    let _ = fs::remove_dir_all(root);
}

#[test]
fn serialized_config_loads_back() {
    let root = temp_config_root("pmaker-config-write");
    let path = root.join("config.json");
    let config = UserConfig {
        templates_dir: Some(PathBuf::from("/opt/pmaker/files")),
        default_flags: vec!["warnings".to_string()],
        default_libs: vec!["threads".to_string()],
        git: true,
        ..UserConfig::default()
    };
    let text = serde_json::to_string_pretty(&config).expect("serialize config");
    fs::write(&path, text).expect("write config");
    assert_eq!(load_config(Some(path.as_path())).expect("load config"), config);
    let _ = fs::remove_dir_all(root);
}

#[test]
fn omitted_fields_default() {
    let root = temp_config_root("pmaker-config-partial");
    let path = root.join("config.json");
    fs::write(&path, r#"{ "schema_version": 1, "git": true }"#).expect("write");
    let config = load_config_file(&path, true).expect("load");
    assert!(config.git);
    assert!(config.default_flags.is_empty());
    assert_eq!(config.templates_dir, None);
    let _ = fs::remove_dir_all(root);
}

#[test]
fn rejects_bad_schema_and_names() {
    let root = temp_config_root("pmaker-config-invalid");
    let path = root.join("config.json");

    fs::write(&path, r#"{ "schema_version": 7 }"#).expect("write");
    let err = load_config_file(&path, true).unwrap_err();
    assert!(err.to_string().contains("schema_version"), "{err}");

    fs::write(&path, r#"{ "schema_version": 1, "default_flags": ["a,b"] }"#).expect("write");
    assert!(matches!(
        load_config_file(&path, true),
        Err(ScaffoldError::Config { .. })
    ));

    fs::write(&path, r#"{ "schema_version": 1, "colour": "red" }"#).expect("write");
    assert!(load_config_file(&path, true).is_err());

    fs::write(&path, "not json").expect("write");
    assert!(load_config_file(&path, true).is_err());
    let _ = fs::remove_dir_all(root);
}
