use metamodel_access::AccessConfig;
use pretty_assertions::assert_eq;
use std::time::Duration;

fn load_config_from_str(contents: &str) -> AccessConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("metamodel.toml");
    std::fs::write(&path, contents).unwrap();
    AccessConfig::load_from(&path)
}

#[test]
fn defaults_are_sensible() {
    let config = AccessConfig::default();
    assert_eq!(config.wait_timeout(), Duration::from_secs(30));
    assert_eq!(config.retry_interval(), Duration::from_millis(50));
    assert_eq!(config.listener_capacity, 16);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AccessConfig::load_from(dir.path().join("nonexistent.toml"));
    assert_eq!(config, AccessConfig::default());
}

#[test]
fn partial_table_keeps_other_defaults() {
    let config = load_config_from_str(
        r#"
[access]
wait_timeout_ms = 500
"#,
    );
    assert_eq!(
        config,
        AccessConfig {
            wait_timeout_ms: 500,
            ..AccessConfig::default()
        }
    );
}

#[test]
fn full_table_is_loaded() {
    let config = load_config_from_str(
        r#"
[access]
wait_timeout_ms = 1000
retry_interval_ms = 5
listener_capacity = 64
"#,
    );
    assert_eq!(config.wait_timeout(), Duration::from_secs(1));
    assert_eq!(config.retry_interval(), Duration::from_millis(5));
    assert_eq!(config.listener_capacity, 64);
}

#[test]
fn invalid_file_falls_back_to_defaults() {
    let config = load_config_from_str("[access]\nwait_timeout_ms = \"soon\"\n");
    assert_eq!(config, AccessConfig::default());
}

#[test]
fn unreadable_path_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(AccessConfig::load_from(dir.path()), AccessConfig::default());
}

#[test]
fn empty_file_gives_defaults() {
    assert_eq!(AccessConfig::from_toml_str("").unwrap(), AccessConfig::default());
}

#[test]
fn zero_retry_interval_is_clamped() {
    let config = AccessConfig {
        retry_interval_ms: 0,
        ..AccessConfig::default()
    };
    assert_eq!(config.retry_interval(), Duration::from_millis(1));
}
