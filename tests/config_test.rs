//! Integration tests for configuration loading

use geoquiz::infra::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[dataset]
id = "bcn-gotic"
catalog_file = "data/bcn-gotic.json"

[engine]
active_radius_m = 40.0
info_radius_m = 400.0
answer_cooldown_ms = 2000

[persistence]
file = "state/answers.json"

[render]
output = "out/intents.jsonl"

[compass]
north_relative_fallback = true
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.dataset_id(), "bcn-gotic");
    assert_eq!(config.catalog_file(), "data/bcn-gotic.json");
    assert_eq!(config.active_radius_m(), 40.0);
    assert_eq!(config.info_radius_m(), 400.0);
    assert_eq!(config.answer_cooldown_ms(), 2000);
    assert_eq!(config.persistence_file(), "state/answers.json");
    assert_eq!(config.render_output(), "out/intents.jsonl");
    assert!(config.north_relative_fallback());
}

#[test]
fn test_partial_config_fills_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[dataset]\nid = \"mad-centro\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.dataset_id(), "mad-centro");
    assert_eq!(config.active_radius_m(), 50.0);
    assert_eq!(config.info_radius_m(), 500.0);
    assert_eq!(config.answer_cooldown_ms(), 3000);
}

#[test]
fn test_inverted_radii_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[engine]\nactive_radius_m = 600.0\ninfo_radius_m = 500.0\n")
        .unwrap();
    temp_file.flush().unwrap();

    assert!(Config::from_file(temp_file.path()).is_err());
}

#[test]
fn test_load_from_path_fallback() {
    let config = Config::load_from_path("/nonexistent/config.toml");
    assert_eq!(config.dataset_id(), "default");
    assert_eq!(config.active_radius_m(), 50.0);
}
