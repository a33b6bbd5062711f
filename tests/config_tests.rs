// Configuration loading tests
// Author: kelexine (https://github.com/kelexine)

use gemini_relay::cli::Args;
use gemini_relay::config::AppConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_without_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let config = AppConfig::load_from(&missing, &Args::default()).unwrap();

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.max_body_bytes, 20 * 1024 * 1024);
    assert!(config.server.require_api_key);
    assert_eq!(config.gemini.model, "gemini-1.5-flash");
    assert_eq!(
        config.gemini.api_base_url,
        "https://generativelanguage.googleapis.com/v1beta"
    );
    assert!(config.gemini.timeout_seconds.is_none());
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_file_values() {
    let file = config_file(
        r#"
[server]
port = 9090
require_api_key = false

[gemini]
model = "gemini-1.5-pro"
api_key = "file-key"
timeout_seconds = 30

[logging]
format = "json"
"#,
    );

    let config = AppConfig::load_from(file.path(), &Args::default()).unwrap();

    assert_eq!(config.server.port, 9090);
    assert!(!config.server.require_api_key);
    assert_eq!(config.gemini.model, "gemini-1.5-pro");
    assert_eq!(config.gemini.api_key.as_ref().unwrap().expose(), "file-key");
    assert_eq!(config.gemini.timeout_seconds, Some(30));
    assert_eq!(config.logging.format, "json");
    // Untouched sections keep their defaults
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn test_cli_arguments_override_file() {
    let file = config_file(
        r#"
[server]
port = 9090

[gemini]
api_key = "file-key"
"#,
    );

    let args = Args {
        port: Some(3000),
        host: Some("127.0.0.1".to_string()),
        api_key: Some("cli-key".to_string()),
        config: None,
    };

    let config = AppConfig::load_from(file.path(), &args).unwrap();

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.gemini.api_key.as_ref().unwrap().expose(), "cli-key");
}

#[test]
fn test_blank_api_key_counts_as_missing() {
    let args = Args {
        api_key: Some("   ".to_string()),
        ..Args::default()
    };
    let dir = tempfile::tempdir().unwrap();

    let config = AppConfig::load_from(&dir.path().join("absent.toml"), &args).unwrap();

    assert!(config.gemini.api_key.is_none());
}

#[test]
fn test_explicit_config_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let args = Args {
        config: Some(dir.path().join("absent.toml")),
        ..Args::default()
    };

    assert!(AppConfig::load(&args).is_err());
}

#[test]
fn test_invalid_config_file_is_an_error() {
    let file = config_file("[server]\nport = \"not a port\"\n");

    assert!(AppConfig::load_from(file.path(), &Args::default()).is_err());
}
